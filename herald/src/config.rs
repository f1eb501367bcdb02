//! Signal configuration.

use crate::signal::Signal;
use herald_core::{EmitMode, Message};
use std::{borrow::Cow, marker::PhantomData};

/// Construction-time settings of a [`Signal`].
///
/// Fixed for the lifetime of the signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalConfig {
    /// How emissions are delivered.
    pub mode: EmitMode,
    /// Optional name used in log fields and fan-out thread names.
    pub name: Option<Cow<'static, str>>,
}

impl SignalConfig {
    /// Create a configuration for the given mode.
    pub const fn new(mode: EmitMode) -> Self {
        Self { mode, name: None }
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Builder for a [`Signal`].
///
/// # Example
///
/// ```rust,ignore
/// let broadcast = Signal::<String>::builder(EmitMode::Asynchronous)
///     .name("host.broadcast")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct SignalBuilder<E> {
    config: SignalConfig,
    _phantom: PhantomData<fn() -> E>,
}

impl<E: Message> SignalBuilder<E> {
    /// Start a builder for the given mode.
    pub const fn new(mode: EmitMode) -> Self {
        Self::from_config(SignalConfig::new(mode))
    }

    /// Start a builder from an existing configuration.
    pub const fn from_config(config: SignalConfig) -> Self {
        Self {
            config,
            _phantom: PhantomData,
        }
    }

    /// Override the mode.
    pub fn mode(mut self, mode: EmitMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the name.
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Build an empty signal.
    pub fn build(self) -> Signal<E> {
        Signal::with_config(self.config)
    }
}
