//! Observability.
//!
//! # Responsibilities
//! - Structured logging via `tracing` (initialized in main)
//! - Request counters and latency histograms via `metrics`

pub mod metrics;
