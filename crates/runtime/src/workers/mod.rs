//! Background duties behind the player data manager.
//!
//! The save worker runs the bounded retry loop on a blocking-pool thread,
//! while the autosave worker periodically flushes every cached profile.

mod autosave;
mod metrics;
mod save;

pub(crate) use autosave::run_autosave;
pub use metrics::{SaveMetrics, SaveMetricsSnapshot};
pub(crate) use save::save_cached;
pub use save::save_with_retry;
