//! Capability set — the message kinds a device can execute.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::message::MessageKind;

/// Ordered set of [`MessageKind`]s supported by a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<MessageKind>);

impl CapabilitySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `kind` belongs to the set.
    #[must_use]
    pub fn contains(&self, kind: MessageKind) -> bool {
        self.0.contains(&kind)
    }

    /// Add `kind`, returning `false` if it was already present.
    pub fn insert(&mut self, kind: MessageKind) -> bool {
        self.0.insert(kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = MessageKind> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<MessageKind> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = MessageKind>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (idx, kind) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{kind}")?;
        }
        f.write_str("]")
    }
}
