//! Save metrics and statistics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Save counters shared by every save path.
///
/// Uses atomics for lock-free access across threads.
#[derive(Debug, Default)]
pub struct SaveMetrics {
    /// Saves that eventually succeeded
    saved: AtomicU64,

    /// Saves that exhausted every attempt
    failed: AtomicU64,

    /// Individual attempts that failed and were retried
    retried: AtomicU64,
}

impl SaveMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self) {
        self.saved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_retry(&self) {
        self.retried.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> SaveMetricsSnapshot {
        SaveMetricsSnapshot {
            saved: self.saved.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            retried: self.retried.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`SaveMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveMetricsSnapshot {
    pub saved: u64,
    pub failed: u64,
    pub retried: u64,
}
