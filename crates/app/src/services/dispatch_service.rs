//! Dispatch service — the single entry point for commanding devices.
//!
//! `send` resolves the message target through the [`Registry`], checks the
//! device's capability set, then awaits the handler. It never retries, never
//! reorders, and never swallows a failure: every error reaches the caller.

use std::sync::Arc;

use homebus_domain::error::{DeviceExecutionError, DispatchError, UnsupportedCommandError};
use homebus_domain::message::Message;
use homebus_domain::outcome::HandlerOutcome;
use homebus_domain::time::now;
use tokio_util::sync::CancellationToken;

use crate::registry::Registry;

/// Routes messages to registered devices.
#[derive(Debug, Clone)]
pub struct DispatchService {
    registry: Arc<Registry>,
}

impl DispatchService {
    /// Create a new service that resolves targets through `registry`.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// The registry targets are resolved against.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Deliver `message` to its target and await the handler.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::UnknownDevice`] when the target is not registered
    /// - [`DispatchError::UnsupportedCommand`] when the device cannot execute
    ///   the message kind; no handler runs in that case
    /// - [`DispatchError::DeviceExecution`] when the handler fails
    #[tracing::instrument(
        skip(self, message),
        fields(message_id = %message.id(), device_id = %message.target(), kind = %message.kind())
    )]
    pub async fn send(&self, message: Message) -> Result<HandlerOutcome, DispatchError> {
        self.dispatch(message, None).await
    }

    /// Like [`send`](Self::send), but gives up if `token` is cancelled before
    /// the handler starts. A handler that already started runs to completion.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send), plus [`DispatchError::Cancelled`].
    #[tracing::instrument(
        skip(self, message, token),
        fields(message_id = %message.id(), device_id = %message.target(), kind = %message.kind())
    )]
    pub async fn send_cancellable(
        &self,
        message: Message,
        token: &CancellationToken,
    ) -> Result<HandlerOutcome, DispatchError> {
        self.dispatch(message, Some(token)).await
    }

    async fn dispatch(
        &self,
        message: Message,
        token: Option<&CancellationToken>,
    ) -> Result<HandlerOutcome, DispatchError> {
        let device_id = message.target();
        let kind = message.kind();
        let device = self.registry.resolve(device_id)?;

        let unsupported = || UnsupportedCommandError {
            device_id,
            device: device.name().to_string(),
            kind,
        };
        if !device.capabilities().contains(kind) {
            return Err(unsupported().into());
        }
        let handler = device
            .handle(kind, message.payload())
            .ok_or_else(unsupported)?;

        if token.is_some_and(CancellationToken::is_cancelled) {
            tracing::debug!("cancelled before handler start");
            return Err(DispatchError::Cancelled);
        }

        tracing::debug!(device = device.name(), "handler started");
        let started_at = now();
        let snapshot = handler.await.map_err(|source| DeviceExecutionError {
            device_id,
            kind,
            source,
        })?;
        tracing::debug!(state = %snapshot.state, "handler completed");

        Ok(HandlerOutcome {
            message_id: message.id(),
            device_id,
            kind,
            snapshot,
            started_at,
            completed_at: now(),
        })
    }
}
