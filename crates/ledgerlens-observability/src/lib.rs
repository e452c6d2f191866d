//! # ledgerlens-observability
//!
//! Tracing subscriber setup, span macros per operation, and the structured
//! events the other crates emit.

pub mod tracing_setup;

pub use tracing_setup::{events, init_tracing, init_tracing_with_filter, spans, TracingInitError};
