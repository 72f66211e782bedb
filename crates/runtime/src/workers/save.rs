//! Save worker: bounded retry with exponential backoff.
//!
//! Backoff sleeps block the calling thread. Background saves therefore run on
//! tokio's blocking pool, and only shutdown/flush paths call this inline.

use std::thread;

use progression_core::{PlayerId, SkillProfile};
use tracing::{debug, error, info, warn};

use super::SaveMetrics;
use crate::config::RetryPolicy;
use crate::manager::CachedProfile;
use crate::repository::ProfileRepository;

/// Save `profile`, retrying up to `policy.max_attempts()` times.
///
/// Returns `false` once every attempt has failed; that outcome is logged at
/// error level because the in-memory progress may never reach disk.
pub fn save_with_retry(
    repository: &dyn ProfileRepository,
    player: &PlayerId,
    profile: &SkillProfile,
    policy: RetryPolicy,
    metrics: &SaveMetrics,
) -> bool {
    for attempt in 0..policy.max_attempts() {
        match repository.save(player, profile) {
            Ok(()) => {
                if attempt > 0 {
                    info!(
                        "Profile[{}] saved successfully after {} retries",
                        player, attempt
                    );
                } else {
                    debug!("Profile[{}] saved", player);
                }
                metrics.record_success();
                return true;
            }
            Err(e) if attempt + 1 < policy.max_attempts() => {
                let delay = policy.backoff(attempt);
                warn!(
                    "Failed to save profile[{}] (attempt {}/{}): {}. Retrying in {:?}...",
                    player,
                    attempt + 1,
                    policy.max_attempts(),
                    e,
                    delay
                );
                metrics.record_retry();
                thread::sleep(delay);
            }
            Err(e) => {
                error!(
                    "FATAL: Failed to save profile[{}] after {} attempts: {}. Data may be lost!",
                    player, policy.max_attempts(), e
                );
            }
        }
    }

    metrics.record_failure();
    false
}

/// Save the current state of a cached profile.
///
/// Saves of one player are serialized by the profile's save gate, and the
/// snapshot is taken inside the gate, so a slower older save can never
/// overwrite a newer one.
pub(crate) fn save_cached(
    repository: &dyn ProfileRepository,
    player: &PlayerId,
    cached: &CachedProfile,
    policy: RetryPolicy,
    metrics: &SaveMetrics,
) -> bool {
    let _gate = cached.save_gate();
    let snapshot = cached.snapshot();

    let saved = save_with_retry(repository, player, &snapshot, policy, metrics);
    if saved {
        cached.lock().mark_as_existing();
    }
    saved
}
