//! The [`Signal`] type.

use crate::config::{SignalBuilder, SignalConfig};
use herald_core::{
    BoxSlot, Delivery, EmitError, EmitMode, IntoSlotResult, Message, Slot, SlotEntry, SlotId,
    SlotMeta,
};
use herald_std::delivery::{FanoutDelivery, SequentialDelivery};
use std::fmt;

/// The execution model picked from the signal's mode at construction.
#[derive(Debug, Clone)]
enum Strategy {
    Sequential(SequentialDelivery),
    Fanout(FanoutDelivery),
}

impl Strategy {
    fn for_config(config: &SignalConfig) -> Self {
        match config.mode {
            EmitMode::Synchronous => Strategy::Sequential(SequentialDelivery),
            EmitMode::Asynchronous => match &config.name {
                Some(name) => Strategy::Fanout(FanoutDelivery::named(name.clone())),
                None => Strategy::Fanout(FanoutDelivery::new()),
            },
        }
    }

    fn deliver<E: Message>(&self, event: &E, slots: &[SlotEntry<E>]) -> Result<(), EmitError> {
        match self {
            Strategy::Sequential(delivery) => delivery.deliver(event, slots),
            Strategy::Fanout(delivery) => delivery.deliver(event, slots),
        }
    }
}

/// A typed event dispatcher.
///
/// A signal owns an ordered list of slots sharing one message type `E` and
/// broadcasts every emitted message to all of them. Whether slots run one
/// after another on the caller's thread or concurrently is fixed by the
/// [`EmitMode`] chosen at construction.
///
/// # Delivery
///
/// | Mode           | Execution                                  | On failure                    |
/// |----------------|--------------------------------------------|-------------------------------|
/// | `Synchronous`  | caller's thread, registration order        | stop, [`EmitError::Stopped`]  |
/// | `Asynchronous` | one thread per slot, joined before return  | run all, [`EmitError::Failed`] |
///
/// In both modes [`emit`](Signal::emit) returns only after every slot it
/// started has finished.
///
/// # Registration and Emission
///
/// [`connect`](Signal::connect) and [`disconnect`](Signal::disconnect) take
/// `&mut self` while [`emit`](Signal::emit) takes `&self`, so the slot list
/// cannot change while an emission is in flight. No lock is held during
/// emission either: a slot may emit on the very signal that invoked it
/// (through an `Arc<Signal<E>>`) without deadlocking.
///
/// # Example
///
/// ```rust,ignore
/// let mut on_boot = Signal::<u32>::synchronous();
/// on_boot.connect(|id: &u32| println!("vm {id} booted"));
/// on_boot.emit(&3)?;
/// ```
pub struct Signal<E: Message> {
    slots: Vec<SlotEntry<E>>,
    config: SignalConfig,
    strategy: Strategy,
    next_id: u64,
}

impl<E: Message> Signal<E> {
    /// Create an empty signal with the given mode.
    pub fn new(mode: EmitMode) -> Self {
        Self::with_config(SignalConfig::new(mode))
    }

    /// Create an empty synchronous signal.
    pub fn synchronous() -> Self {
        Self::new(EmitMode::Synchronous)
    }

    /// Create an empty asynchronous (fan-out) signal.
    pub fn asynchronous() -> Self {
        Self::new(EmitMode::Asynchronous)
    }

    /// Create an empty signal from a configuration.
    pub fn with_config(config: SignalConfig) -> Self {
        Self {
            slots: Vec::new(),
            strategy: Strategy::for_config(&config),
            config,
            next_id: 0,
        }
    }

    /// Start building a signal.
    pub const fn builder(mode: EmitMode) -> SignalBuilder<E> {
        SignalBuilder::new(mode)
    }

    /// The delivery mode.
    pub fn mode(&self) -> EmitMode {
        self.config.mode
    }

    /// The configured name, if any.
    pub fn name(&self) -> Option<&str> {
        self.config.name.as_deref()
    }

    /// The configuration this signal was created with.
    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Connect a closure.
    ///
    /// The closure may return `()` or `Result<(), Err>`. Registration never
    /// fails; the returned id can be passed to [`disconnect`](Self::disconnect).
    pub fn connect<F, R>(&mut self, f: F) -> SlotId
    where
        F: Fn(&E) -> R + Send + Sync + 'static,
        R: IntoSlotResult,
    {
        self.connect_with(f, SlotMeta::new())
    }

    /// Connect a named closure. The name shows up in failures and logs.
    pub fn connect_named<F, R>(&mut self, name: &'static str, f: F) -> SlotId
    where
        F: Fn(&E) -> R + Send + Sync + 'static,
        R: IntoSlotResult,
    {
        self.connect_with(f, SlotMeta::new().with_name(name))
    }

    /// Connect any [`Slot`] implementation.
    pub fn connect_slot<S: Slot<E>>(&mut self, slot: S) -> SlotId {
        self.connect_with(slot, SlotMeta::new())
    }

    /// Connect a slot with explicit metadata.
    pub fn connect_with<S: Slot<E>>(&mut self, slot: S, meta: SlotMeta) -> SlotId {
        let id = self.mint_id();
        self.slots.push(SlotEntry::new(id, slot, meta));
        id
    }

    /// Connect a slot that is already shared, e.g. across several signals.
    pub fn connect_shared(&mut self, slot: BoxSlot<E>, meta: SlotMeta) -> SlotId {
        let id = self.mint_id();
        self.slots.push(SlotEntry::from_shared(id, slot, meta));
        id
    }

    /// Remove a slot. Returns `false` if no slot has that id.
    ///
    /// The remaining slots keep their relative order.
    pub fn disconnect(&mut self, id: SlotId) -> bool {
        match self.slots.iter().position(|entry| entry.id() == id) {
            Some(index) => {
                self.slots.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every slot.
    pub fn disconnect_all(&mut self) {
        self.slots.clear();
    }

    /// Whether a slot with this id is connected.
    pub fn is_connected(&self, id: SlotId) -> bool {
        self.slots.iter().any(|entry| entry.id() == id)
    }

    /// Number of connected slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot is connected.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Ids of the connected slots, in registration order.
    pub fn slot_ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.slots.iter().map(SlotEntry::id)
    }

    /// Broadcast `event` to every connected slot.
    ///
    /// Blocks until the delivery contract of the signal's mode is met (see
    /// the type-level docs). With no slots connected this returns `Ok(())`
    /// immediately.
    ///
    /// # Errors
    ///
    /// - Synchronous: [`EmitError::Stopped`] for the first slot that returned
    ///   an error or panicked; later slots were not invoked.
    /// - Asynchronous: [`EmitError::Failed`] listing every failed slot; all
    ///   slots were invoked.
    pub fn emit(&self, event: &E) -> Result<(), EmitError> {
        if self.slots.is_empty() {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            signal = self.name().unwrap_or(""),
            mode = %self.config.mode,
            slots = self.slots.len(),
            "emit"
        );

        let result = self.strategy.deliver(event, &self.slots);

        #[cfg(feature = "tracing")]
        if let Err(ref error) = result {
            tracing::warn!(
                signal = self.name().unwrap_or(""),
                kind = error.as_label(),
                %error,
                "emit failed"
            );
        }

        result
    }

    fn mint_id(&mut self) -> SlotId {
        let id = SlotId::from_raw(self.next_id);
        self.next_id += 1;
        id
    }
}

impl<E: Message> fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("mode", &self.config.mode)
            .field("name", &self.config.name)
            .field("slots", &self.slots)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_signal_is_send_sync() {
        assert_send_sync::<Signal<String>>();
        assert_send_sync::<Signal<(u32, Vec<u8>)>>();
    }

    #[test]
    fn test_mode_is_fixed_at_construction() {
        assert_eq!(Signal::<()>::synchronous().mode(), EmitMode::Synchronous);
        assert_eq!(Signal::<()>::asynchronous().mode(), EmitMode::Asynchronous);

        let signal = Signal::<()>::builder(EmitMode::Synchronous)
            .mode(EmitMode::Asynchronous)
            .name("jobs")
            .build();
        assert_eq!(signal.mode(), EmitMode::Asynchronous);
        assert_eq!(signal.name(), Some("jobs"));
    }

    #[test]
    fn test_ids_are_unique_and_not_reused() {
        let mut signal = Signal::<()>::synchronous();
        let a = signal.connect(|_: &()| {});
        let b = signal.connect(|_: &()| {});
        assert_ne!(a, b);

        assert!(signal.disconnect(b));
        let c = signal.connect(|_: &()| {});
        assert_ne!(b, c);
        assert_eq!(signal.slot_ids().collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn test_disconnect_unknown_id() {
        let mut signal = Signal::<()>::synchronous();
        let id = signal.connect(|_: &()| {});
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        assert!(!signal.is_connected(id));
        assert!(signal.is_empty());
    }

    #[test]
    fn test_shared_slot_on_two_signals() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        let shared: BoxSlot<u8> = Arc::new(move |_: &u8| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        let mut first = Signal::synchronous();
        let mut second = Signal::asynchronous();
        first.connect_shared(shared.clone(), SlotMeta::new());
        second.connect_shared(shared, SlotMeta::new());

        first.emit(&1).unwrap();
        second.emit(&2).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_named_slot_failure_carries_name() {
        let mut signal = Signal::<u8>::synchronous();
        signal.connect_named("validator", |_: &u8| Err::<(), _>("invalid"));

        let err = signal.emit(&0).unwrap_err();
        let failure = err.first().unwrap();
        assert_eq!(failure.name, Some("validator"));
        assert_eq!(failure.index, 0);
    }

    #[test]
    fn test_debug_lists_slots() {
        let mut signal = Signal::<u8>::builder(EmitMode::Synchronous)
            .name("debugged")
            .build();
        signal.connect(|_: &u8| {});
        let rendered = format!("{signal:?}");
        assert!(rendered.contains("debugged"));
        assert!(rendered.contains("SlotEntry"));
    }

    #[test]
    fn test_emit_does_not_change_slots() {
        let seen = Arc::new(Mutex::new(0));
        let seen_clone = seen.clone();
        let mut signal = Signal::<u8>::synchronous();
        signal.connect(move |v: &u8| *seen_clone.lock().unwrap() += *v as u32);

        signal.emit(&2).unwrap();
        signal.emit(&3).unwrap();
        assert_eq!(signal.len(), 1);
        assert_eq!(*seen.lock().unwrap(), 5);
    }
}
