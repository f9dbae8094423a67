//! Routine — a named script of message batches.
//!
//! A routine is an ordered list of [`Step`]s. Each step holds a batch of
//! messages that run either all at once ([`Step::Parallel`]) or one after
//! another ([`Step::Sequence`]). Steps themselves always run in order.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::message::Message;

/// How the messages of one step are executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "messages", rename_all = "snake_case")]
pub enum Step {
    /// Start every message before awaiting any of them.
    Parallel(Vec<Message>),
    /// Await each message before sending the next; stop at the first failure.
    Sequence(Vec<Message>),
}

impl Step {
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        match self {
            Self::Parallel(messages) | Self::Sequence(messages) => messages,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parallel(messages) => write!(f, "parallel({})", messages.len()),
            Self::Sequence(messages) => write!(f, "sequence({})", messages.len()),
        }
    }
}

/// A named, validated list of steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub name: String,
    pub steps: Vec<Step>,
}

impl Routine {
    /// Create a builder for constructing a [`Routine`].
    #[must_use]
    pub fn builder() -> RoutineBuilder {
        RoutineBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the name is empty, there is no
    /// step, or a step carries no message.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.steps.is_empty() {
            return Err(ValidationError::NoSteps);
        }
        if let Some(index) = self.steps.iter().position(|s| s.messages().is_empty()) {
            return Err(ValidationError::EmptyStep { index });
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Routine`].
#[derive(Debug, Default)]
pub struct RoutineBuilder {
    name: Option<String>,
    steps: Vec<Step>,
}

impl RoutineBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn parallel(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.steps.push(Step::Parallel(messages.into_iter().collect()));
        self
    }

    #[must_use]
    pub fn sequence(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.steps.push(Step::Sequence(messages.into_iter().collect()));
        self
    }

    /// Consume the builder, validate, and return a [`Routine`].
    ///
    /// # Errors
    ///
    /// See [`Routine::validate`].
    pub fn build(self) -> Result<Routine, ValidationError> {
        let routine = Routine {
            name: self.name.unwrap_or_default(),
            steps: self.steps,
        };
        routine.validate()?;
        Ok(routine)
    }
}
