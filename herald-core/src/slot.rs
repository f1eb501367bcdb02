//! # Slots
//!
//! A slot is the unit of behavior a signal invokes on every emission.
//!
//! Slots receive the emitted message by reference. In asynchronous mode the
//! same reference is handed to several threads at once, which is why slots
//! must be `Send + Sync` and messages `Sync`.
//!
//! # Captured State
//!
//! Slots are `'static`: whatever they touch is captured by value, usually as
//! an `Arc` handle to the owning component. State mutated by more than one
//! slot belongs to that component and must be guarded there (a `Mutex` or an
//! atomic); the signal never locks on a slot's behalf.

use crate::{error::BoxError, message::Message, outcome::IntoSlotResult};
use std::sync::Arc;

/// A callback registered on a signal.
///
/// Plain closures are slots: any `Fn(&E)` returning `()` or
/// `Result<(), Err>` (with `Err: Into<BoxError>`) implements this trait.
/// Implement it by hand for reusable slot types that carry their own state.
///
/// # Example
///
/// ```rust,ignore
/// struct Audit { log: Arc<Mutex<Vec<String>>> }
///
/// impl Slot<String> for Audit {
///     fn on_emit(&self, event: &String) -> Result<(), BoxError> {
///         self.log.lock().unwrap().push(event.clone());
///         Ok(())
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Slot` for `{E}`",
    label = "missing `Slot` implementation",
    note = "Slots are `Fn(&{E})` closures or types implementing `Slot<{E}>`."
)]
pub trait Slot<E: Message>: Send + Sync + 'static {
    /// Called once per emission with the emitted message.
    fn on_emit(&self, event: &E) -> Result<(), BoxError>;
}

/// A shared, type-erased slot as stored by a signal.
pub type BoxSlot<E> = Arc<dyn Slot<E>>;

impl<E, F, R> Slot<E> for F
where
    E: Message,
    F: Fn(&E) -> R + Send + Sync + 'static,
    R: IntoSlotResult,
{
    fn on_emit(&self, event: &E) -> Result<(), BoxError> {
        self(event).into_slot_result()
    }
}
