// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Metrics instrumentation for lucene-translate.
//!
//! Uses the `metrics` crate for backend-agnostic metrics collection.
//! The embedding application chooses the exporter (Prometheus, OTEL, etc.);
//! without an installed recorder every call here is a no-op.
//!
//! # Metric Naming Convention
//! - `lucene_translate_` prefix for all metrics
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Labels
//! - `frontend`: dsl, predicate
//! - `status`: success, error
//! - `reason`: error kind (see [`TranslateError::reason`](crate::TranslateError::reason))

use metrics::{counter, histogram};
use std::time::{Duration, Instant};

/// Front-end label for the JSON DSL path
pub const FRONTEND_DSL: &str = "dsl";
/// Front-end label for the predicate path
pub const FRONTEND_PREDICATE: &str = "predicate";

/// Record a finished translation
pub fn record_operation(frontend: &str, status: &str) {
    counter!(
        "lucene_translate_operations_total",
        "frontend" => frontend.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a rejected input, labelled by error kind
pub fn record_rejection(frontend: &str, reason: &str) {
    counter!(
        "lucene_translate_rejections_total",
        "frontend" => frontend.to_string(),
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Record translation latency
pub fn record_latency(frontend: &str, duration: Duration) {
    histogram!(
        "lucene_translate_operation_seconds",
        "frontend" => frontend.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Record the size of an accepted DSL document
pub fn record_input_bytes(bytes: usize) {
    histogram!("lucene_translate_input_bytes").record(bytes as f64);
}

/// Record success/error for a translation result and pass it through.
pub fn observe<T>(frontend: &str, result: crate::Result<T>) -> crate::Result<T> {
    match &result {
        Ok(_) => record_operation(frontend, "success"),
        Err(e) => {
            record_operation(frontend, "error");
            record_rejection(frontend, e.reason());
        }
    }
    result
}

/// Timer that records latency on drop
pub struct LatencyTimer {
    frontend: &'static str,
    start: Instant,
}

impl LatencyTimer {
    /// Start a new latency timer
    pub fn new(frontend: &'static str) -> Self {
        Self {
            frontend,
            start: Instant::now(),
        }
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_latency(self.frontend, self.start.elapsed());
    }
}
