//! Standard slot adapters.
//!
//! - [`LoggingSlot`]: logs every emission
//! - [`TracingSlot`]: runs a slot inside a `tracing` span
//! - [`TimeoutSlot`]: bounds how long a slot may run
//! - [`AsyncSlot`]: drives an async closure to completion as a slot

mod async_slot;
mod logging;
mod timeout;
mod traced;

pub use async_slot::AsyncSlot;
pub use logging::LoggingSlot;
pub use timeout::TimeoutSlot;
pub use traced::TracingSlot;
