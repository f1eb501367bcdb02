use super::{failure, invoke};
use herald_core::{Delivery, EmitError, Message, SlotEntry};

/// A sequential delivery strategy.
///
/// Executes slots one by one on the calling thread, in registration order.
/// Slot *i* has returned before slot *i + 1* starts. Stops at the first slot
/// that returns an error or panics and reports it as [`EmitError::Stopped`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialDelivery;

impl Delivery for SequentialDelivery {
    fn deliver<E: Message>(&self, event: &E, slots: &[SlotEntry<E>]) -> Result<(), EmitError> {
        for (index, entry) in slots.iter().enumerate() {
            if let Err(error) = invoke(entry, event) {
                return Err(EmitError::Stopped(failure(index, entry, error)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::{SlotError, SlotId, SlotMeta};
    use std::sync::{Arc, Mutex};

    fn entry<F>(raw: u64, f: F) -> SlotEntry<u32>
    where
        F: Fn(&u32) -> Result<(), String> + Send + Sync + 'static,
    {
        SlotEntry::new(SlotId::from_raw(raw), f, SlotMeta::new())
    }

    #[test]
    fn test_runs_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let slots: Vec<_> = (0..4)
            .map(|i| {
                let log = log.clone();
                entry(i, move |event| {
                    log.lock().unwrap().push((i, *event));
                    Ok(())
                })
            })
            .collect();

        SequentialDelivery.deliver(&7, &slots).unwrap();
        assert_eq!(*log.lock().unwrap(), vec![(0, 7), (1, 7), (2, 7), (3, 7)]);
    }

    #[test]
    fn test_empty_is_noop() {
        assert!(SequentialDelivery.deliver::<u32>(&1, &[]).is_ok());
    }

    #[test]
    fn test_panic_stops_dispatch() {
        let ran_last = Arc::new(Mutex::new(false));
        let ran_last_clone = ran_last.clone();
        let slots = vec![
            entry(0, |_| Ok(())),
            entry(1, |_| panic!("slot exploded")),
            entry(2, move |_| {
                *ran_last_clone.lock().unwrap() = true;
                Ok(())
            }),
        ];

        let err = SequentialDelivery.deliver(&0, &slots).unwrap_err();
        let EmitError::Stopped(failure) = err else {
            panic!("expected Stopped, got {err:?}");
        };
        assert_eq!(failure.index, 1);
        assert_eq!(failure.id, SlotId::from_raw(1));
        assert!(matches!(failure.error, SlotError::Panicked(ref msg) if msg == "slot exploded"));
        assert!(!*ran_last.lock().unwrap());
    }
}
