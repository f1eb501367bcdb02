//! Delivery strategies.
//!
//! - [`SequentialDelivery`]: slots run in order on the caller's thread,
//!   stopping at the first failure.
//! - [`FanoutDelivery`]: every slot runs on its own scoped thread and all of
//!   them are joined before returning; failures are collected.

mod fanout;
mod sequential;

pub use fanout::{DEFAULT_THREAD_PREFIX, FanoutDelivery};
pub use sequential::SequentialDelivery;

use herald_core::{Message, SlotEntry, SlotError, SlotFailure};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Runs one slot, turning a returned error or a panic into a [`SlotError`].
///
/// `AssertUnwindSafe` is used: a slot that panics while holding a lock on
/// shared state leaves that lock poisoned for its owner to deal with.
pub(crate) fn invoke<E: Message>(entry: &SlotEntry<E>, event: &E) -> Result<(), SlotError> {
    match catch_unwind(AssertUnwindSafe(|| entry.call(event))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(SlotError::from_boxed(err)),
        Err(payload) => Err(SlotError::from_panic(payload)),
    }
}

pub(crate) fn failure<E: Message>(
    index: usize,
    entry: &SlotEntry<E>,
    error: SlotError,
) -> SlotFailure {
    #[cfg(feature = "tracing")]
    tracing::warn!(
        slot = index,
        id = %entry.id(),
        name = entry.name().unwrap_or(""),
        kind = error.as_label(),
        %error,
        "slot failed"
    );

    SlotFailure {
        index,
        id: entry.id(),
        name: entry.name(),
        error,
    }
}
