//! # herald-std
//!
//! Standard implementations for the Herald signal/slot dispatch primitive.
//!
//! This crate provides:
//! - **Delivery strategies**: [`SequentialDelivery`], [`FanoutDelivery`]
//! - **Slot adapters**: Logging, Tracing, Timeout, Async
//! - **Testing helpers**: recording, counting and failing slots
//!
//! [`SequentialDelivery`]: delivery::SequentialDelivery
//! [`FanoutDelivery`]: delivery::FanoutDelivery

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use herald_core;

// Modules
pub mod delivery;
pub mod slots;
pub mod testing;
