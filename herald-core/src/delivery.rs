//! Delivery strategy trait.

use crate::{entry::SlotEntry, error::EmitError, message::Message};

/// Strategy for delivering one emission to a resolved list of slots.
///
/// This abstraction allows different execution models (sequential, fan-out)
/// to be plugged into a signal. Implementations must not return before every
/// slot they started has finished.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Delivery` strategy",
    label = "missing `Delivery` implementation",
    note = "Implement `Delivery` to control how slots are executed on emit."
)]
pub trait Delivery: Send + Sync {
    /// Deliver the event to the slots.
    ///
    /// An empty slot list is a no-op that returns `Ok(())`.
    fn deliver<E: Message>(&self, event: &E, slots: &[SlotEntry<E>]) -> Result<(), EmitError>;
}
