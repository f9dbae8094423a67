//! Handler outcome — the successful result of dispatching one message.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, MessageId};
use crate::message::MessageKind;
use crate::state::DeviceSnapshot;
use crate::time::{Timestamp, elapsed_between};

/// What `send` returns when the device handler succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerOutcome {
    pub message_id: MessageId,
    pub device_id: DeviceId,
    pub kind: MessageKind,
    pub snapshot: DeviceSnapshot,
    pub started_at: Timestamp,
    pub completed_at: Timestamp,
}

impl HandlerOutcome {
    /// How long the device took to handle the message.
    #[must_use]
    pub fn latency(&self) -> Duration {
        elapsed_between(self.started_at, self.completed_at)
    }
}
