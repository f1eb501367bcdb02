//! # herald-core
//!
//! Core traits for the Herald signal/slot dispatch primitive.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! extensions that only need the vocabulary, not the `herald-std`
//! delivery implementations.
//!
//! # Building Blocks
//!
//! ## Slot ([`Slot`])
//!
//! A unit of behavior invoked with a reference to the emitted message.
//! Closures of the form `Fn(&E)` returning `()` or `Result<(), Err>` are slots
//! out of the box.
//!
//! ## Slot Collection ([`SlotEntry`], [`SlotId`], [`SlotMeta`])
//!
//! A signal stores its slots as an ordered list of entries. Each entry carries
//! a stable [`SlotId`] minted on registration and optional metadata used in
//! failure reports.
//!
//! ## Delivery ([`Delivery`])
//!
//! The execution model for one emission: sequential on the caller's thread,
//! or fan-out to concurrent threads followed by a join. The mode is chosen per
//! signal through [`EmitMode`].
//!
//! # Error Types
//!
//! - [`EmitError`] - Returned by an emission that had failing slots
//! - [`SlotFailure`] - One failing slot, tagged with its position
//! - [`SlotError`] - Why a slot failed

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod delivery;
mod entry;
mod error;
mod message;
mod mode;
mod outcome;
mod slot;

// Re-exports
pub use delivery::Delivery;
pub use entry::{SlotEntry, SlotId, SlotMeta};
pub use error::{BoxError, EmitError, SlotError, SlotFailure, panic_message};
pub use message::Message;
pub use mode::EmitMode;
pub use outcome::IntoSlotResult;
pub use slot::{BoxSlot, Slot};
