//! Testing utilities for Herald.
//!
//! This module provides slots that make it easy to observe what a signal
//! delivered.
//!
//! # Features
//!
//! - [`RecordingSlot`]: records every message it receives
//! - [`CountingSlot`]: counts invocations
//! - [`FailingSlot`]: always fails with a fixed message
//! - [`OrderLog`]: a shared, ordered log that hands out labelled slots

use herald_core::{BoxError, Message, Slot};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use thiserror::Error;

// ============================================================================
// Recording Slot
// ============================================================================

/// A slot that records all messages it receives.
///
/// Clones share the same record.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingSlot::<String>::new();
/// signal.connect_slot(recorder.clone());
///
/// signal.emit(&"hello".to_string())?;
/// assert_eq!(recorder.events(), vec!["hello".to_string()]);
/// ```
pub struct RecordingSlot<E: Clone> {
    events: Arc<Mutex<Vec<E>>>,
}

impl<E: Clone> RecordingSlot<E> {
    /// Create a new recording slot.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded messages.
    pub fn events(&self) -> Vec<E> {
        self.events.lock().unwrap().clone()
    }

    /// Get the number of recorded messages.
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Clear all recorded messages.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl<E: Clone> Default for RecordingSlot<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Clone for RecordingSlot<E> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<E: Message + Clone> Slot<E> for RecordingSlot<E> {
    fn on_emit(&self, event: &E) -> Result<(), BoxError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

// ============================================================================
// Counting Slot
// ============================================================================

/// A slot that counts invocations.
///
/// Clones share the same counter.
#[derive(Debug, Default, Clone)]
pub struct CountingSlot {
    count: Arc<AtomicUsize>,
}

impl CountingSlot {
    /// Create a new counting slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<E: Message> Slot<E> for CountingSlot {
    fn on_emit(&self, _event: &E) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Failing Slot
// ============================================================================

/// Error returned by [`FailingSlot`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TestFailure(pub String);

/// A slot that always fails with the configured message.
///
/// It still counts how many times it was called.
#[derive(Debug, Clone)]
pub struct FailingSlot {
    message: String,
    calls: Arc<AtomicUsize>,
}

impl FailingSlot {
    /// Create a failing slot.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times the slot was called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<E: Message> Slot<E> for FailingSlot {
    fn on_emit(&self, _event: &E) -> Result<(), BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Box::new(TestFailure(self.message.clone())))
    }
}

// ============================================================================
// Order Log
// ============================================================================

/// A shared, ordered log of labels.
///
/// Each slot created with [`OrderLog::slot`] appends its label when invoked,
/// so the log shows the order in which slots ran.
///
/// # Example
///
/// ```rust,ignore
/// let log = OrderLog::new();
/// signal.connect_slot(log.slot("A"));
/// signal.connect_slot(log.slot("B"));
/// signal.emit(&())?;
/// assert_eq!(log.entries(), vec!["A", "B"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct OrderLog {
    entries: Arc<Mutex<Vec<&'static str>>>,
}

impl OrderLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that appends `label` to this log.
    pub fn slot(&self, label: &'static str) -> OrderSlot {
        OrderSlot {
            label,
            entries: self.entries.clone(),
        }
    }

    /// Get a snapshot of the log.
    pub fn entries(&self) -> Vec<&'static str> {
        self.entries.lock().unwrap().clone()
    }
}

/// A slot handed out by [`OrderLog::slot`].
#[derive(Debug, Clone)]
pub struct OrderSlot {
    label: &'static str,
    entries: Arc<Mutex<Vec<&'static str>>>,
}

impl<E: Message> Slot<E> for OrderSlot {
    fn on_emit(&self, _event: &E) -> Result<(), BoxError> {
        self.entries.lock().unwrap().push(self.label);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_slot_shares_record() {
        let recorder = RecordingSlot::<String>::new();
        let handle = recorder.clone();

        recorder.on_emit(&"one".to_string()).unwrap();
        recorder.on_emit(&"two".to_string()).unwrap();
        assert_eq!(handle.events(), vec!["one".to_string(), "two".to_string()]);

        handle.clear();
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn test_failing_slot_counts_calls() {
        let slot = FailingSlot::new("nope");
        let err = Slot::<()>::on_emit(&slot, &()).unwrap_err();
        assert_eq!(err.to_string(), "nope");
        assert_eq!(slot.call_count(), 1);
    }

    #[test]
    fn test_order_log() {
        let log = OrderLog::new();
        Slot::<()>::on_emit(&log.slot("B"), &()).unwrap();
        Slot::<()>::on_emit(&log.slot("A"), &()).unwrap();
        assert_eq!(log.entries(), vec!["B", "A"]);
    }
}
