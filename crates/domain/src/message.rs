//! Message — an immutable command addressed to a registered device.

use serde::{Deserialize, Serialize};

use crate::error::UnknownMessageKindError;
use crate::id::{DeviceId, MessageId};

/// Closed set of commands a device may be asked to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    SwitchOn,
    SwitchOff,
    PlaySong,
    Flush,
    Clean,
}

impl MessageKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::SwitchOn,
        Self::SwitchOff,
        Self::PlaySong,
        Self::Flush,
        Self::Clean,
    ];

    /// Wire name of the kind (`snake_case`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SwitchOn => "switch_on",
            Self::SwitchOff => "switch_off",
            Self::PlaySong => "play_song",
            Self::Flush => "flush",
            Self::Clean => "clean",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MessageKind {
    type Err = UnknownMessageKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownMessageKindError(s.to_string()))
    }
}

/// A command for one device.
///
/// The target is held by identity, never by reference: the dispatch service
/// resolves it through the registry at send time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    target: DeviceId,
    kind: MessageKind,
    payload: Option<String>,
}

impl Message {
    /// Create a message without payload.
    #[must_use]
    pub fn new(target: DeviceId, kind: MessageKind) -> Self {
        Self {
            id: MessageId::new(),
            target,
            kind,
            payload: None,
        }
    }

    /// Create a message carrying a payload (e.g. the song to play).
    #[must_use]
    pub fn with_payload(target: DeviceId, kind: MessageKind, payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            ..Self::new(target, kind)
        }
    }

    #[must_use]
    pub fn id(&self) -> MessageId {
        self.id
    }

    #[must_use]
    pub fn target(&self) -> DeviceId {
        self.target
    }

    #[must_use]
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_kind_in_snake_case() {
        assert_eq!(MessageKind::SwitchOn.to_string(), "switch_on");
        assert_eq!(MessageKind::PlaySong.to_string(), "play_song");
    }

    #[test]
    fn should_serialize_kind_like_display() {
        for kind in MessageKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn should_parse_every_kind_from_its_display() {
        for kind in MessageKind::ALL {
            assert_eq!(kind.to_string().parse::<MessageKind>(), Ok(kind));
        }
    }

    #[test]
    fn should_reject_unknown_kind_name() {
        let err = "dance".parse::<MessageKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown message kind: dance");
    }

    #[test]
    fn should_build_message_without_payload() {
        let target = DeviceId::new();
        let msg = Message::new(target, MessageKind::Flush);
        assert_eq!(msg.target(), target);
        assert_eq!(msg.kind(), MessageKind::Flush);
        assert!(msg.payload().is_none());
    }

    #[test]
    fn should_build_message_with_payload() {
        let msg = Message::with_payload(
            DeviceId::new(),
            MessageKind::PlaySong,
            "Rick Astley - Never Gonna Give You Up",
        );
        assert_eq!(
            msg.payload(),
            Some("Rick Astley - Never Gonna Give You Up")
        );
    }

    #[test]
    fn should_stamp_distinct_ids_on_each_message() {
        let target = DeviceId::new();
        let a = Message::new(target, MessageKind::SwitchOn);
        let b = Message::new(target, MessageKind::SwitchOn);
        assert_ne!(a.id(), b.id());
    }
}
