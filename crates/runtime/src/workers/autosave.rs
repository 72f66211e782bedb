//! Periodic flush of every cached profile.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info};

use crate::manager::PlayerDataManager;

pub(crate) async fn run_autosave(manager: Arc<PlayerDataManager>, period: Duration) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // First tick completes immediately.
    ticker.tick().await;
    info!("Autosave started (every {:?})", period);

    loop {
        ticker.tick().await;

        if manager.cache_size() == 0 {
            debug!("Autosave skipped: no cached profiles");
            continue;
        }

        let worker = Arc::clone(&manager);
        match tokio::task::spawn_blocking(move || worker.save_all_profiles()).await {
            Ok(report) => debug!(
                "Autosave finished: {} saved, {} failed",
                report.saved, report.failed
            ),
            Err(e) => error!("Autosave task failed: {}", e),
        }
    }
}
