//! Timeout slot for time-limited execution.
//!
//! Signals have no timeout of their own: a slot that never returns blocks
//! `emit` forever. Wrapping a slot in [`TimeoutSlot`] opts that one slot into
//! a time budget.

use crossbeam_channel::RecvTimeoutError;
use herald_core::{BoxError, Message, Slot, SlotError};
use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
    thread,
    time::Duration,
};

/// A slot that wraps another slot with a timeout.
///
/// The inner slot runs on a helper thread with its own clone of the message.
/// When the budget elapses first, the wrapper fails with
/// [`SlotError::TimedOut`] and the helper thread is left to finish on its own;
/// its result is discarded.
///
/// # Cost
///
/// Every call spawns one OS thread. A thread cannot be cancelled, so each
/// call that times out leaves its helper detached and running until the inner
/// slot returns. Nothing bounds how many such threads pile up: an inner slot
/// that hangs forever leaks one thread per emission. Use this wrapper for
/// slots that are slow now and then, not for slots that may never return.
pub struct TimeoutSlot<S> {
    inner: Arc<S>,
    duration: Duration,
}

impl<S> TimeoutSlot<S> {
    /// Create a new timeout slot.
    pub fn new(inner: S, duration: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            duration,
        }
    }

    /// The configured time budget.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl<E, S> Slot<E> for TimeoutSlot<S>
where
    E: Message + Clone,
    S: Slot<E>,
{
    fn on_emit(&self, event: &E) -> Result<(), BoxError> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let inner = Arc::clone(&self.inner);
        let event = event.clone();

        thread::Builder::new()
            .name("herald-timeout".into())
            .spawn(move || {
                let result = catch_unwind(AssertUnwindSafe(|| inner.on_emit(&event)));
                // The receiver is gone once the wait timed out.
                let _ = tx.send(result);
            })
            .map_err(SlotError::Spawn)?;

        match rx.recv_timeout(self.duration) {
            Ok(Ok(result)) => result,
            Ok(Err(payload)) => Err(Box::new(SlotError::from_panic(payload))),
            Err(RecvTimeoutError::Timeout) => Err(Box::new(SlotError::TimedOut(self.duration))),
            Err(RecvTimeoutError::Disconnected) => Err(Box::new(SlotError::Panicked(
                "timeout worker exited without a result".into(),
            ))),
        }
    }
}
