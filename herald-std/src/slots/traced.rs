use herald_core::{BoxError, Message, Slot};

/// A slot wrapper that instruments execution with a `tracing` span.
///
/// Every invocation of the inner slot runs inside an `info` span named
/// `slot`, carrying the configured slot name. Without the `tracing` feature
/// the wrapper is a plain pass-through.
pub struct TracingSlot<S> {
    inner: S,
    name: &'static str,
}

impl<S> TracingSlot<S> {
    /// Create a new `TracingSlot` wrapper around a slot.
    pub const fn new(inner: S, name: &'static str) -> Self {
        Self { inner, name }
    }

    /// The name recorded on the span.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<S: Clone> Clone for TracingSlot<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            name: self.name,
        }
    }
}

impl<E, S> Slot<E> for TracingSlot<S>
where
    E: Message,
    S: Slot<E>,
{
    #[cfg(feature = "tracing")]
    fn on_emit(&self, event: &E) -> Result<(), BoxError> {
        let span = tracing::info_span!("slot", slot = %self.name);
        let _entered = span.enter();

        let result = self.inner.on_emit(event);
        if let Err(ref error) = result {
            tracing::debug!(%error, "slot returned an error");
        }
        result
    }

    #[cfg(not(feature = "tracing"))]
    fn on_emit(&self, event: &E) -> Result<(), BoxError> {
        self.inner.on_emit(event)
    }
}
