#![allow(dead_code)]

use herald::{BoxError, Slot};
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

// ============================================================================
// Test Event Types
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestEvent {
    pub content: String,
}

impl TestEvent {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }
}

// ============================================================================
// Test Slots
// ============================================================================

/// Increments a counter guarded by a mutex, the way a component would
/// protect its own shared state.
pub struct LockedIncrement {
    pub counter: Arc<Mutex<usize>>,
}

impl Slot<TestEvent> for LockedIncrement {
    fn on_emit(&self, _event: &TestEvent) -> Result<(), BoxError> {
        let mut count = self.counter.lock().unwrap();
        *count += 1;
        Ok(())
    }
}

/// Sleeps, then records its id and the event content.
pub struct SlowRecorder {
    pub id: usize,
    pub delay: Duration,
    pub log: Arc<Mutex<Vec<(usize, String)>>>,
}

impl Slot<TestEvent> for SlowRecorder {
    fn on_emit(&self, event: &TestEvent) -> Result<(), BoxError> {
        thread::sleep(self.delay);
        self.log
            .lock()
            .unwrap()
            .push((self.id, event.content.clone()));
        Ok(())
    }
}

/// Tracks how many invocations are running at the same time.
#[derive(Clone, Default)]
pub struct Overlap {
    pub current: Arc<AtomicUsize>,
    pub peak: Arc<AtomicUsize>,
}

impl Slot<TestEvent> for Overlap {
    fn on_emit(&self, _event: &TestEvent) -> Result<(), BoxError> {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        self.current.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}
