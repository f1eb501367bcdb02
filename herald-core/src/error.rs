//! Error types for Herald.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`EmitError`] - Returned by `emit` when one or more slots failed
//! - [`SlotFailure`] - A failed slot together with its position in the signal
//! - [`SlotError`] - The cause of a single slot failure

use crate::entry::SlotId;
use std::{any::Any, fmt, time::Duration};
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a single slot failed.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SlotError {
    /// The slot returned an error.
    #[error(transparent)]
    Failed(BoxError),

    /// The slot panicked during execution.
    #[error("slot panicked: {0}")]
    Panicked(String),

    /// The slot did not finish within its time budget.
    #[error("slot timed out after {0:?}")]
    TimedOut(Duration),

    /// No thread could be spawned to run the slot.
    #[error("failed to spawn slot thread")]
    Spawn(#[source] std::io::Error),
}

impl SlotError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SlotError::Failed(_) => "slot_failed",
            SlotError::Panicked(_) => "slot_panicked",
            SlotError::TimedOut(_) => "slot_timed_out",
            SlotError::Spawn(_) => "slot_spawn_failed",
        }
    }

    /// Builds a [`SlotError::Panicked`] from a caught panic payload.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        SlotError::Panicked(panic_message(payload.as_ref()))
    }

    /// Classifies an error returned by a slot.
    ///
    /// Adapters that fail with a `SlotError` of their own (a timeout, say)
    /// keep that classification; anything else becomes [`SlotError::Failed`].
    pub fn from_boxed(err: BoxError) -> Self {
        match err.downcast::<SlotError>() {
            Ok(slot_err) => *slot_err,
            Err(err) => SlotError::Failed(err),
        }
    }
}

impl From<BoxError> for SlotError {
    fn from(err: BoxError) -> Self {
        SlotError::Failed(err)
    }
}

/// A slot that failed during one emission.
#[derive(Error, Debug)]
#[error("slot #{index}{} failed: {error}", DisplayName(.name))]
pub struct SlotFailure {
    /// Position of the slot in the signal at the time of emission.
    pub index: usize,
    /// Identifier returned when the slot was connected.
    pub id: SlotId,
    /// Optional label given when the slot was connected.
    pub name: Option<&'static str>,
    /// The cause.
    #[source]
    pub error: SlotError,
}

struct DisplayName<'a>(&'a Option<&'static str>);

impl fmt::Display for DisplayName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(name) => write!(f, " ({name})"),
            None => Ok(()),
        }
    }
}

/// Errors returned by an emission.
///
/// Which variant is produced depends on the signal's mode: synchronous
/// signals stop at the first failure, asynchronous signals let every slot
/// finish and report all failures together.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EmitError {
    /// Sequential dispatch stopped at a failing slot; later slots did not run.
    #[error("dispatch stopped: {0}")]
    Stopped(#[source] SlotFailure),

    /// One or more concurrently run slots failed.
    #[error("{} of {attempted} slots failed", .failures.len())]
    Failed {
        /// Every failure, ordered by slot index.
        failures: Vec<SlotFailure>,
        /// Number of slots that were run.
        attempted: usize,
    },
}

impl EmitError {
    /// All failures carried by this error, ordered by slot index.
    pub fn failures(&self) -> &[SlotFailure] {
        match self {
            EmitError::Stopped(failure) => std::slice::from_ref(failure),
            EmitError::Failed { failures, .. } => failures,
        }
    }

    /// The failure with the lowest slot index.
    pub fn first(&self) -> Option<&SlotFailure> {
        self.failures().first()
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitError::Stopped(_) => "emit_stopped",
            EmitError::Failed { .. } => "emit_failed",
        }
    }
}

/// Extracts a readable message from a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
