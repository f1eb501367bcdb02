//! # herald - Typed Signal/Slot Dispatch
//!
//! `herald` provides [`Signal`], an event dispatch primitive: components
//! connect callbacks ("slots") to a signal and later broadcast a value to all
//! of them with [`Signal::emit`].
//!
//! Each signal is created in one of two modes:
//!
//! - **Synchronous**: slots run one at a time, in registration order, on the
//!   caller's thread. Dispatch stops at the first failing slot.
//! - **Asynchronous**: every slot runs on its own thread and `emit` blocks
//!   until all of them have finished (fan-out and join). Failures from all
//!   slots are collected.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::prelude::*;
//!
//! let mut on_data = Signal::<String>::synchronous();
//! on_data.connect(|line: &String| println!("got {line}"));
//!
//! let mut broadcast = Signal::<String>::asynchronous();
//! for worker in &workers {
//!     let worker = Arc::clone(worker);
//!     broadcast.connect(move |task: &String| worker.enqueue(task.clone()));
//! }
//!
//! on_data.emit(&"<html>...</html>".to_string())?;
//! broadcast.emit(&"Take backup".to_string())?; // returns once every worker has queued it
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `trace`/`warn` events from emissions and enable the
//!   logging and tracing slot adapters.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod config;
mod signal;

pub use config::{SignalBuilder, SignalConfig};
pub use signal::Signal;

pub use herald_core::{
    // Slots
    BoxSlot,
    // Delivery
    Delivery,
    // Errors
    BoxError,
    EmitError,
    // Modes
    EmitMode,
    IntoSlotResult,
    // Message
    Message,
    Slot,
    // Entries
    SlotEntry,
    SlotError,
    SlotFailure,
    SlotId,
    SlotMeta,
    panic_message,
};

/// Delivery strategies used by signals.
pub mod delivery {
    pub use herald_std::delivery::{DEFAULT_THREAD_PREFIX, FanoutDelivery, SequentialDelivery};
}

/// Standard slot adapters.
pub mod slots {
    pub use herald_std::slots::{AsyncSlot, LoggingSlot, TimeoutSlot, TracingSlot};
}

/// Testing utilities.
pub mod testing {
    pub use herald_std::testing::{
        CountingSlot, FailingSlot, OrderLog, OrderSlot, RecordingSlot, TestFailure,
    };
}

/// Prelude module - common imports for Herald.
///
/// # Usage
///
/// ```rust,ignore
/// use herald::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, EmitError, EmitMode, Signal, SignalBuilder, SignalConfig, Slot, SlotError,
        SlotId, SlotMeta,
    };
}
