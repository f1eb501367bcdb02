//! A slot that records emissions in the log.

use herald_core::{BoxError, Message, Slot};
use std::fmt;

/// Logs every message it receives at `info` level.
///
/// Connect it next to the real slots of a signal to see what flows through
/// it. The optional label ends up in the `slot` field so several logging
/// slots can be told apart. Without the `tracing` feature this is a no-op.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoggingSlot {
    label: Option<&'static str>,
}

impl LoggingSlot {
    /// A logging slot without a label.
    pub const fn new() -> Self {
        Self { label: None }
    }

    /// A logging slot whose records carry `label`.
    pub const fn labeled(label: &'static str) -> Self {
        Self { label: Some(label) }
    }

    /// The label, if any.
    pub const fn label(&self) -> Option<&'static str> {
        self.label
    }
}

impl<E: Message + fmt::Debug> Slot<E> for LoggingSlot {
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn on_emit(&self, event: &E) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        tracing::info!(
            slot = self.label.unwrap_or("logging"),
            message_type = std::any::type_name::<E>(),
            ?event,
            "signal delivered"
        );
        Ok(())
    }
}

impl fmt::Display for LoggingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            Some(label) => write!(f, "logging slot '{label}'"),
            None => f.write_str("logging slot"),
        }
    }
}
