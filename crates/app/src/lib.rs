//! # homebus-app
//!
//! Application layer — the device **port**, the registry and the dispatch
//! use-cases.
//!
//! ## Responsibilities
//! - Define the [`Device`](ports::Device) port every pluggable device implements,
//!   and the [`HandlerTable`](ports::HandlerTable) mapping message kinds to handlers
//! - Assign identities and keep the identity → device mapping ([`registry::Registry`])
//! - Resolve, capability-check and execute messages
//!   ([`services::dispatch_service::DispatchService`])
//! - Compose dispatches sequentially or in parallel ([`combinators`])
//! - Run declarative [`Routine`](homebus_domain::routine::Routine)s ([`routine_runner`])
//!
//! ## Dependency rule
//! Depends on `homebus-domain` only (plus `futures` / `tokio-util` for future
//! plumbing and cancellation). Never imports adapter crates.

pub mod combinators;
pub mod ports;
pub mod registry;
pub mod routine_runner;
pub mod services;

#[cfg(test)]
mod test_support;
