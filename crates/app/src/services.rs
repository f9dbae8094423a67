//! Application services — use-case implementations.

pub mod dispatch_service;
