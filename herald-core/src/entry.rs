//! Registered slot entries.

use crate::{
    error::BoxError,
    message::Message,
    slot::{BoxSlot, Slot},
};
use std::{fmt, sync::Arc};

/// Identifier of a connected slot.
///
/// Returned by `connect`, accepted by `disconnect`. Ids are never reused
/// within one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u64);

impl SlotId {
    /// Creates an id from its raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value of this id.
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot-{}", self.0)
    }
}

/// Metadata attached to a slot at registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotMeta {
    /// Optional label, reported in failures and log fields.
    pub name: Option<&'static str>,
}

impl SlotMeta {
    /// Create empty metadata.
    pub const fn new() -> Self {
        Self { name: None }
    }

    /// Set the label.
    pub const fn with_name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }
}

/// A slot together with its id and metadata.
pub struct SlotEntry<E: Message> {
    id: SlotId,
    meta: SlotMeta,
    slot: BoxSlot<E>,
}

impl<E: Message> SlotEntry<E> {
    /// Create a new entry.
    pub fn new<S: Slot<E>>(id: SlotId, slot: S, meta: SlotMeta) -> Self {
        Self {
            id,
            meta,
            slot: Arc::new(slot),
        }
    }

    /// Create an entry from an already shared slot.
    pub fn from_shared(id: SlotId, slot: BoxSlot<E>, meta: SlotMeta) -> Self {
        Self { id, meta, slot }
    }

    /// The slot's id.
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// The slot's metadata.
    pub fn meta(&self) -> &SlotMeta {
        &self.meta
    }

    /// The slot's label, if any.
    pub fn name(&self) -> Option<&'static str> {
        self.meta.name
    }

    /// The slot itself.
    pub fn slot(&self) -> &dyn Slot<E> {
        &*self.slot
    }

    /// Invoke the slot.
    pub fn call(&self, event: &E) -> Result<(), BoxError> {
        self.slot.on_emit(event)
    }
}

impl<E: Message> Clone for SlotEntry<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            meta: self.meta.clone(),
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<E: Message> fmt::Debug for SlotEntry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotEntry")
            .field("id", &self.id)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}
