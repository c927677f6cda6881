//! Metrics — opt-in counters for parse outcomes.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for a parsing run.
///
/// All updates use `Ordering::Relaxed`; snapshot reads may tear across
/// fields, which is acceptable for observability counters. Attached to a
/// parser via `LineParser::with_metrics`; without one, parsing keeps its
/// silent-skip default.
#[derive(Debug, Default)]
pub struct ParserMetrics {
    pub lines_seen: AtomicU64,
    pub records_emitted: AtomicU64,
    pub lines_skipped: AtomicU64,
    pub coercion_failures: AtomicU64,
}

impl ParserMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_line(&self) {
        self.lines_seen.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_emitted(&self) {
        self.records_emitted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_skipped(&self) {
        self.lines_skipped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_coercion_failure(&self) {
        self.coercion_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time view of the counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lines_seen: self.lines_seen.load(Ordering::Relaxed),
            records_emitted: self.records_emitted.load(Ordering::Relaxed),
            lines_skipped: self.lines_skipped.load(Ordering::Relaxed),
            coercion_failures: self.coercion_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub lines_seen: u64,
    pub records_emitted: u64,
    pub lines_skipped: u64,
    pub coercion_failures: u64,
}
