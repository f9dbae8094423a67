//! Execution combinators — run a batch of pending dispatches.
//!
//! Both take the operations as not-yet-polled futures (for instance the
//! result of calling [`DispatchService::send`](crate::services::dispatch_service::DispatchService::send)
//! without awaiting it). Nothing runs until the combinator polls them.

use std::future::Future;

use homebus_domain::error::{AggregateExecutionError, DispatchError};
use homebus_domain::outcome::HandlerOutcome;

/// Run `operations` one after the other.
///
/// Each operation completes before the next one is polled for the first time.
/// The first failure stops the batch; operations after it never start.
///
/// # Errors
///
/// Returns the error of the first failing operation.
pub async fn run_sequence<I, F>(operations: I) -> Result<Vec<HandlerOutcome>, DispatchError>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<HandlerOutcome, DispatchError>>,
{
    let mut outcomes = Vec::new();
    for operation in operations {
        outcomes.push(operation.await?);
    }
    Ok(outcomes)
}

/// Run `operations` concurrently and wait for all of them.
///
/// Every operation is started before any of them is awaited. A failure does
/// not interrupt the others; all failures are collected.
///
/// # Errors
///
/// Returns an [`AggregateExecutionError`] holding every failure, tagged with
/// its position in `operations`.
pub async fn run_parallel<I, F>(
    operations: I,
) -> Result<Vec<HandlerOutcome>, AggregateExecutionError>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<HandlerOutcome, DispatchError>>,
{
    let results = futures::future::join_all(operations).await;

    let mut outcomes = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => failures.push((index, err)),
        }
    }

    if failures.is_empty() {
        Ok(outcomes)
    } else {
        Err(AggregateExecutionError {
            failures,
            succeeded: outcomes.len(),
        })
    }
}
