//! Async closure adapter.

use futures::executor::block_on;
use herald_core::{BoxError, IntoSlotResult, Message, Slot};
use std::future::Future;

/// A slot backed by an async closure.
///
/// The closure receives an owned clone of the message and its future is
/// driven to completion with [`futures::executor::block_on`] on whichever
/// thread runs the slot: the caller's thread for synchronous signals, a
/// fan-out thread for asynchronous ones. The emission therefore still waits
/// for the future to finish.
///
/// The future must not depend on a specific async runtime's reactor (tokio
/// timers or sockets, for example), since no runtime is driving it. A
/// synchronous signal carrying an `AsyncSlot` must not be emitted from inside
/// another `futures` executor on the same thread.
///
/// # Example
///
/// ```rust,ignore
/// signal.connect_slot(AsyncSlot::new(|line: String| async move {
///     sink.send(line).await
/// }));
/// ```
pub struct AsyncSlot<F> {
    f: F,
}

impl<F> AsyncSlot<F> {
    /// Create a new async slot.
    pub const fn new(f: F) -> Self {
        Self { f }
    }
}

impl<E, F, Fut, R> Slot<E> for AsyncSlot<F>
where
    E: Message + Clone,
    F: Fn(E) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R>,
    R: IntoSlotResult,
{
    fn on_emit(&self, event: &E) -> Result<(), BoxError> {
        block_on((self.f)(event.clone())).into_slot_result()
    }
}
