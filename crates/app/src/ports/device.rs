//! Device port — the contract a device implements to be pluggable.
//!
//! A device declares which [`MessageKind`]s it executes and provides one
//! handler per kind. Concrete devices usually keep a [`HandlerTable`] and
//! delegate both [`Device::capabilities`] and [`Device::handle`] to it, so the
//! capability set can never drift from the handlers that actually exist.

use std::collections::BTreeMap;

use futures::future::BoxFuture;
use homebus_domain::capability::CapabilitySet;
use homebus_domain::error::DeviceError;
use homebus_domain::message::MessageKind;
use homebus_domain::state::DeviceSnapshot;

/// Future returned by a device handler.
pub type HandlerFuture<'a> = BoxFuture<'a, Result<DeviceSnapshot, DeviceError>>;

/// A handler for one message kind on a device of type `D`.
///
/// Receives the device and the message payload, if any.
pub type Handler<D> = for<'a> fn(&'a D, Option<&'a str>) -> HandlerFuture<'a>;

/// A registrable device.
///
/// Handlers may suspend (simulated latency) and may fail. A handler must only
/// touch its own device's state, and two handlers running on the same device
/// must not interleave their effects: the device serialises them itself.
pub trait Device: Send + Sync {
    /// Human readable name, used in errors and logs.
    fn name(&self) -> &str;

    /// The message kinds this device executes.
    fn capabilities(&self) -> CapabilitySet;

    /// Build the handler future for `kind`.
    ///
    /// Returns `None` when the device has no handler for `kind`. Nothing runs
    /// until the returned future is polled.
    fn handle<'a>(
        &'a self,
        kind: MessageKind,
        payload: Option<&'a str>,
    ) -> Option<HandlerFuture<'a>>;
}

/// Lookup table from [`MessageKind`] to handler for devices of type `D`.
pub struct HandlerTable<D> {
    handlers: BTreeMap<MessageKind, Handler<D>>,
}

impl<D> Default for HandlerTable<D> {
    fn default() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }
}

impl<D> Clone for HandlerTable<D> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<D> std::fmt::Debug for HandlerTable<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

impl<D> HandlerTable<D> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`, replacing any previous one.
    #[must_use]
    pub fn on(mut self, kind: MessageKind, handler: Handler<D>) -> Self {
        self.handlers.insert(kind, handler);
        self
    }

    /// The kinds that have a handler.
    #[must_use]
    pub fn capabilities(&self) -> CapabilitySet {
        self.handlers.keys().copied().collect()
    }

    /// Build the handler future for `kind` on `device`.
    pub fn invoke<'a>(
        &self,
        device: &'a D,
        kind: MessageKind,
        payload: Option<&'a str>,
    ) -> Option<HandlerFuture<'a>> {
        self.handlers
            .get(&kind)
            .map(|handler| handler(device, payload))
    }
}
