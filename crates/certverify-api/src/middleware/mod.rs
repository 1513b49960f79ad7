//! # Middleware
//!
//! - `metrics`: request and lookup-outcome counters.
//! - `tracing_layer`: per-request tracing spans.

pub mod metrics;
pub mod tracing_layer;
