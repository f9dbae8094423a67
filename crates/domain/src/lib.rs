//! # homebus-domain
//!
//! Pure domain model for the homebus message bus.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Messages** (addressed, immutable commands) and the closed set of
//!   **Message kinds** a device may accept
//! - Define **Capability sets** (which kinds a device executes)
//! - Define **Device snapshots** and **Handler outcomes** (what a handler reports)
//! - Define **Routines** (named batches of parallel / sequential messages)
//! - Define the dispatch **error taxonomy**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod capability;
pub mod message;
pub mod outcome;
pub mod routine;
pub mod state;
