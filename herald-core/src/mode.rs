//! Emission modes.

use std::fmt;

/// How a signal delivers one emission to its slots.
///
/// The mode is fixed when the signal is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmitMode {
    /// Slots run one at a time, in registration order, on the caller's thread.
    ///
    /// Dispatch stops at the first failing slot.
    Synchronous,
    /// Every slot runs on its own thread; `emit` blocks until all of them
    /// have finished.
    ///
    /// No ordering holds between slots. Failures are collected.
    Asynchronous,
}

impl EmitMode {
    /// Returns a short stable label for log fields.
    pub const fn as_label(self) -> &'static str {
        match self {
            EmitMode::Synchronous => "sync",
            EmitMode::Asynchronous => "async",
        }
    }

    /// Whether slots run concurrently in this mode.
    pub const fn is_concurrent(self) -> bool {
        matches!(self, EmitMode::Asynchronous)
    }
}

impl fmt::Display for EmitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}
