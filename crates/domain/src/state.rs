//! Device state — what a handler reports after applying a command.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Discrete operational state of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    On,
    Off,
    Playing,
    Flushed,
    Clean,
    #[default]
    Unknown,
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
            Self::Playing => f.write_str("playing"),
            Self::Flushed => f.write_str("flushed"),
            Self::Clean => f.write_str("clean"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// A single typed attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Point-in-time view of a device, returned by its handlers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub state: DeviceState,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl DeviceSnapshot {
    #[must_use]
    pub fn new(state: DeviceState) -> Self {
        Self {
            state,
            attributes: BTreeMap::new(),
        }
    }

    /// Attach an attribute, replacing any previous value under `key`.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }
}
