use herald::{
    EmitMode, Signal,
    testing::{CountingSlot, OrderLog, RecordingSlot},
};
use std::{
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

mod common;
use common::{SlowRecorder, TestEvent};

#[test]
fn test_slots_run_in_registration_order() {
    let log = OrderLog::new();
    let mut signal = Signal::<TestEvent>::synchronous();
    signal.connect_slot(log.slot("A"));
    signal.connect_slot(log.slot("B"));
    signal.connect_slot(log.slot("C"));

    signal.emit(&TestEvent::new("go")).unwrap();

    assert_eq!(log.entries(), vec!["A", "B", "C"]);
}

#[test]
fn test_each_slot_completes_before_the_next_starts() {
    // Later slots sleep less; a concurrent run would finish them first.
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut signal = Signal::<TestEvent>::synchronous();
    for id in 0..4 {
        signal.connect_slot(SlowRecorder {
            id,
            delay: Duration::from_millis(10 * (4 - id as u64)),
            log: log.clone(),
        });
    }

    signal.emit(&TestEvent::new("payload")).unwrap();

    let ids: Vec<_> = log.lock().unwrap().iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[test]
fn test_runs_on_caller_thread() {
    let caller = thread::current().id();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut signal = Signal::<TestEvent>::synchronous();
    for _ in 0..3 {
        let seen = seen.clone();
        signal.connect(move |_: &TestEvent| seen.lock().unwrap().push(thread::current().id()));
    }

    signal.emit(&TestEvent::new("x")).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|id| *id == caller));
}

#[test]
fn test_k_registrations_give_k_invocations_with_identical_args() {
    for k in [0_usize, 1, 2, 7] {
        let recorder = RecordingSlot::<TestEvent>::new();
        let mut signal = Signal::new(EmitMode::Synchronous);
        for _ in 0..k {
            signal.connect_slot(recorder.clone());
        }

        let event = TestEvent::new("same for everyone");
        signal.emit(&event).unwrap();

        assert_eq!(recorder.count(), k);
        assert!(recorder.events().iter().all(|e| *e == event));
    }
}

#[test]
fn test_emit_without_slots_is_noop() {
    let signal = Signal::<TestEvent>::synchronous();
    assert!(signal.is_empty());
    assert!(signal.emit(&TestEvent::new("nobody listens")).is_ok());
}

#[test]
fn test_repeated_emits_reach_every_slot_each_time() {
    let counter = CountingSlot::new();
    let mut signal = Signal::<u64>::synchronous();
    signal.connect_slot(counter.clone());
    signal.connect_slot(counter.clone());

    for value in 0..5 {
        signal.emit(&value).unwrap();
    }

    assert_eq!(counter.count(), 10);
}

#[test]
fn test_disconnect_preserves_order_of_remaining_slots() {
    let log = OrderLog::new();
    let mut signal = Signal::<()>::synchronous();
    signal.connect_slot(log.slot("A"));
    let b = signal.connect_slot(log.slot("B"));
    signal.connect_slot(log.slot("C"));
    signal.connect_slot(log.slot("D"));

    assert!(signal.disconnect(b));
    signal.emit(&()).unwrap();

    assert_eq!(signal.len(), 3);
    assert_eq!(log.entries(), vec!["A", "C", "D"]);
}

#[test]
fn test_tuple_messages_carry_multiple_arguments() {
    let recorder = RecordingSlot::<(u32, String)>::new();
    let mut signal = Signal::synchronous();
    signal.connect_slot(recorder.clone());
    signal.connect(|(id, body): &(u32, String)| {
        assert_eq!(*id, 4);
        assert_eq!(body, "data");
    });

    signal.emit(&(4, "data".to_string())).unwrap();

    assert_eq!(recorder.events(), vec![(4, "data".to_string())]);
}
