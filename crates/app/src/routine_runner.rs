//! Routine runner — executes a [`Routine`] step by step.
//!
//! Each step is handed to [`run_parallel`] or [`run_sequence`] depending on
//! its mode. Steps run strictly in order and the first failing step aborts
//! the routine.

use std::sync::Arc;

use homebus_domain::error::{AggregateExecutionError, DispatchError};
use homebus_domain::message::Message;
use homebus_domain::outcome::HandlerOutcome;
use homebus_domain::routine::{Routine, Step};
use tokio_util::sync::CancellationToken;

use crate::combinators::{run_parallel, run_sequence};
use crate::services::dispatch_service::DispatchService;

/// Why a routine stopped.
#[derive(Debug, thiserror::Error)]
pub enum RoutineError {
    /// A message of a sequential step failed.
    #[error("routine {routine:?} failed at step {step}")]
    Sequence {
        routine: String,
        step: usize,
        #[source]
        source: DispatchError,
    },

    /// One or more messages of a parallel step failed.
    #[error("routine {routine:?} failed at step {step}")]
    Parallel {
        routine: String,
        step: usize,
        #[source]
        source: AggregateExecutionError,
    },
}

impl RoutineError {
    /// Index of the step that failed.
    #[must_use]
    pub fn step(&self) -> usize {
        match self {
            Self::Sequence { step, .. } | Self::Parallel { step, .. } => *step,
        }
    }
}

/// Drives routines through a shared [`DispatchService`].
#[derive(Debug, Clone)]
pub struct RoutineRunner {
    dispatcher: Arc<DispatchService>,
}

impl RoutineRunner {
    pub fn new(dispatcher: Arc<DispatchService>) -> Self {
        Self { dispatcher }
    }

    /// Run every step of `routine` and return all outcomes, in step order.
    ///
    /// # Errors
    ///
    /// Returns a [`RoutineError`] for the first step that fails.
    pub async fn run(&self, routine: Routine) -> Result<Vec<HandlerOutcome>, RoutineError> {
        self.execute(routine, None).await
    }

    /// Like [`run`](Self::run), but messages not yet started when `token` is
    /// cancelled fail with [`DispatchError::Cancelled`].
    ///
    /// # Errors
    ///
    /// Returns a [`RoutineError`] for the first step that fails.
    pub async fn run_cancellable(
        &self,
        routine: Routine,
        token: &CancellationToken,
    ) -> Result<Vec<HandlerOutcome>, RoutineError> {
        self.execute(routine, Some(token)).await
    }

    #[tracing::instrument(skip_all, fields(routine = %routine.name))]
    async fn execute(
        &self,
        routine: Routine,
        token: Option<&CancellationToken>,
    ) -> Result<Vec<HandlerOutcome>, RoutineError> {
        let Routine { name, steps } = routine;
        let mut outcomes = Vec::new();

        for (step, batch) in steps.into_iter().enumerate() {
            tracing::info!(step, %batch, "running step");
            match batch {
                Step::Parallel(messages) => {
                    let ops = messages.into_iter().map(|m| self.dispatch(m, token));
                    let done = run_parallel(ops).await.map_err(|source| {
                        RoutineError::Parallel {
                            routine: name.clone(),
                            step,
                            source,
                        }
                    })?;
                    outcomes.extend(done);
                }
                Step::Sequence(messages) => {
                    let ops = messages.into_iter().map(|m| self.dispatch(m, token));
                    let done = run_sequence(ops).await.map_err(|source| {
                        RoutineError::Sequence {
                            routine: name.clone(),
                            step,
                            source,
                        }
                    })?;
                    outcomes.extend(done);
                }
            }
        }

        Ok(outcomes)
    }

    async fn dispatch(
        &self,
        message: Message,
        token: Option<&CancellationToken>,
    ) -> Result<HandlerOutcome, DispatchError> {
        match token {
            Some(token) => self.dispatcher.send_cancellable(message, token).await,
            None => self.dispatcher.send(message).await,
        }
    }
}
