//! Fan-out delivery.
//!
//! ```text
//! deliver(event)
//!     │
//!     ├──► thread "{prefix}-slot-0" ──► slot0.on_emit(&event)
//!     ├──► thread "{prefix}-slot-1" ──► slot1.on_emit(&event)
//!     └──► thread "{prefix}-slot-N" ──► slotN.on_emit(&event)
//!                      │
//!                 join all ──► Ok(()) | EmitError::Failed
//! ```
//!
//! ## Rules
//! - **No cross-slot ordering**: slots start and finish in any order
//! - **Join before return**: threads are scoped, so `deliver` cannot return
//!   while a slot is still running
//! - **Collect all**: every slot runs; errors, panics and spawn failures are
//!   gathered into one [`EmitError::Failed`], ordered by slot index
//! - **No timeout**: a slot that never returns blocks the join forever

use super::{failure, invoke};
use herald_core::{Delivery, EmitError, Message, SlotEntry, SlotError};
use std::{borrow::Cow, thread};

/// Thread name prefix used when none is configured.
pub const DEFAULT_THREAD_PREFIX: &str = "herald";

/// A fan-out delivery strategy.
///
/// Spawns one scoped thread per slot and blocks until all of them have
/// finished.
#[derive(Debug, Default, Clone)]
pub struct FanoutDelivery {
    thread_prefix: Option<Cow<'static, str>>,
}

impl FanoutDelivery {
    /// Create a fan-out strategy with the default thread name prefix.
    pub const fn new() -> Self {
        Self {
            thread_prefix: None,
        }
    }

    /// Create a fan-out strategy whose threads are named after `prefix`.
    pub fn named(prefix: impl Into<Cow<'static, str>>) -> Self {
        Self {
            thread_prefix: Some(prefix.into()),
        }
    }

    /// The prefix used for slot thread names.
    pub fn thread_prefix(&self) -> &str {
        self.thread_prefix.as_deref().unwrap_or(DEFAULT_THREAD_PREFIX)
    }
}

impl Delivery for FanoutDelivery {
    fn deliver<E: Message>(&self, event: &E, slots: &[SlotEntry<E>]) -> Result<(), EmitError> {
        if slots.is_empty() {
            return Ok(());
        }

        let prefix = self.thread_prefix();
        let mut failures = Vec::new();

        #[cfg(feature = "tracing")]
        tracing::trace!(slots = slots.len(), prefix, "fanning out");

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(slots.len());

            for (index, entry) in slots.iter().enumerate() {
                let spawned = thread::Builder::new()
                    .name(format!("{prefix}-slot-{index}"))
                    .spawn_scoped(scope, move || invoke(entry, event));

                match spawned {
                    Ok(handle) => handles.push((index, entry, handle)),
                    Err(err) => failures.push(failure(index, entry, SlotError::Spawn(err))),
                }
            }

            for (index, entry, handle) in handles {
                // `invoke` catches slot panics already.
                let result = handle
                    .join()
                    .unwrap_or_else(|payload| Err(SlotError::from_panic(payload)));
                if let Err(error) = result {
                    failures.push(failure(index, entry, error));
                }
            }
        });

        if failures.is_empty() {
            return Ok(());
        }

        failures.sort_by_key(|f| f.index);
        Err(EmitError::Failed {
            failures,
            attempted: slots.len(),
        })
    }
}
