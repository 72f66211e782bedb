//! Cached player profiles and the experience-award transaction.
//!
//! # Concurrency
//!
//! - The cache maps each player to a slot holding a `OnceLock`. The slot is
//!   inserted under the write lock and initialised through `get_or_init`, so
//!   exactly one load-or-create runs per player.
//! - Every profile sits behind its own mutex: awards to the same player are
//!   serialized, awards to different players proceed independently.
//! - Saves copy the profile under its mutex and write the copy outside it.
//!   Background saves run on the blocking pool; backoff sleeps never occupy a
//!   caller's thread.
//! - A quitting player stays cached until the quit save returns. A rejoin in
//!   that window keeps the same profile.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock};
use std::time::Duration;

use progression_core::{ExperienceResult, LevelFormula, PlayerId, SkillKind, SkillProfile};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::RetryPolicy;
use crate::repository::ProfileRepository;
use crate::workers::{SaveMetrics, SaveMetricsSnapshot, run_autosave, save_cached};

/// A profile owned by the cache.
#[derive(Debug)]
pub struct CachedProfile {
    profile: Mutex<SkillProfile>,
    save_gate: Mutex<()>,
    /// Set by `on_quit`, cleared by a rejoin. Read and written under the
    /// cache write lock.
    departing: AtomicBool,
}

impl CachedProfile {
    fn new(profile: SkillProfile) -> Self {
        Self {
            profile: Mutex::new(profile),
            save_gate: Mutex::new(()),
            departing: AtomicBool::new(false),
        }
    }

    /// Exclusive access to the profile. Mutations are visible to every holder.
    pub fn lock(&self) -> MutexGuard<'_, SkillProfile> {
        self.profile.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SkillProfile {
        self.lock().clone()
    }

    pub(crate) fn save_gate(&self) -> MutexGuard<'_, ()> {
        self.save_gate.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Outcome of [`PlayerDataManager::save_all_profiles`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub saved: usize,
    pub failed: usize,
}

type Slot = Arc<OnceLock<Arc<CachedProfile>>>;

/// Owns the profile cache and coordinates loading and saving.
///
/// Storage errors never escape: a failed load yields a fresh profile and a
/// failed save is logged and reported as `false`.
pub struct PlayerDataManager {
    repository: Arc<dyn ProfileRepository>,
    formula: LevelFormula,
    retry: RetryPolicy,
    handle: Handle,
    metrics: Arc<SaveMetrics>,
    cache: RwLock<HashMap<PlayerId, Slot>>,
}

impl PlayerDataManager {
    /// `handle` runs background saves and the autosave task.
    pub fn new(
        repository: Arc<dyn ProfileRepository>,
        formula: LevelFormula,
        retry: RetryPolicy,
        handle: Handle,
    ) -> Self {
        Self {
            repository,
            formula,
            retry,
            handle,
            metrics: Arc::new(SaveMetrics::new()),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn formula(&self) -> LevelFormula {
        self.formula
    }

    pub fn metrics(&self) -> SaveMetricsSnapshot {
        self.metrics.snapshot()
    }

    fn slot(&self, player: PlayerId) -> Slot {
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(slot) = cache.get(&player) {
                return Arc::clone(slot);
            }
        }
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(player).or_default())
    }

    fn cached(&self, player: &PlayerId) -> Option<Arc<CachedProfile>> {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        cache.get(player).and_then(|slot| slot.get()).cloned()
    }

    fn load_or_create(&self, player: PlayerId) -> SkillProfile {
        match self.repository.load(&player) {
            Ok(Some(profile)) => {
                info!("Loaded profile for player {}", player);
                profile
            }
            Ok(None) => {
                info!("Created new profile for player {}", player);
                SkillProfile::new(player, self.formula)
            }
            Err(e) => {
                error!(
                    "Failed to load profile for player {}: {}. Using a fresh profile",
                    player, e
                );
                SkillProfile::new(player, self.formula)
            }
        }
    }

    /// Cached profile of `player`, loading or creating it on first access.
    pub fn get_profile(&self, player: PlayerId) -> Arc<CachedProfile> {
        let slot = self.slot(player);
        let cached =
            slot.get_or_init(|| Arc::new(CachedProfile::new(self.load_or_create(player))));
        Arc::clone(cached)
    }

    /// Add experience to one skill of `player`.
    ///
    /// Non-positive or non-finite amounts change nothing and return an empty
    /// result without touching the cache.
    pub fn award_experience(&self, player: PlayerId, kind: SkillKind, amount: f64) -> ExperienceResult {
        if !(amount.is_finite() && amount > 0.0) {
            return ExperienceResult::none(kind);
        }

        let cached = self.get_profile(player);
        let mut profile = cached.lock();
        let Some(skill) = profile.get_skill_mut(kind) else {
            return ExperienceResult::none(kind);
        };

        let before = skill.level();
        skill.add_experience(amount);
        let levels_gained = skill.level() - before;

        if levels_gained > 0 {
            debug!(
                "Player {} reached {} level {}",
                player,
                kind.display_name(),
                skill.level()
            );
        }
        ExperienceResult::new(kind, amount, levels_gained)
    }

    /// Schedule a background save. `None` if the player is not cached.
    pub fn save_profile(&self, player: PlayerId) -> Option<JoinHandle<bool>> {
        let Some(cached) = self.cached(&player) else {
            warn!("Cannot save profile for player {}: not cached", player);
            return None;
        };

        let repository = Arc::clone(&self.repository);
        let metrics = Arc::clone(&self.metrics);
        let retry = self.retry;
        Some(self.handle.spawn_blocking(move || {
            save_cached(repository.as_ref(), &player, &cached, retry, &metrics)
        }))
    }

    /// Save on the calling thread. For shutdown and explicit flushes only.
    pub fn save_profile_sync(&self, player: PlayerId) -> bool {
        let Some(cached) = self.cached(&player) else {
            warn!("Cannot save profile for player {}: not cached", player);
            return false;
        };
        save_cached(
            self.repository.as_ref(),
            &player,
            &cached,
            self.retry,
            &self.metrics,
        )
    }

    /// Save every cached profile on the calling thread. One failure does not
    /// stop the others.
    pub fn save_all_profiles(&self) -> SaveReport {
        let entries: Vec<(PlayerId, Arc<CachedProfile>)> = {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            cache
                .iter()
                .filter_map(|(player, slot)| slot.get().map(|cached| (*player, Arc::clone(cached))))
                .collect()
        };

        let mut report = SaveReport::default();
        for (player, cached) in entries {
            if save_cached(
                self.repository.as_ref(),
                &player,
                &cached,
                self.retry,
                &self.metrics,
            ) {
                report.saved += 1;
            } else {
                report.failed += 1;
            }
        }

        if report.failed > 0 {
            error!(
                "Saved {} profiles, {} failed. Some player data may not have been saved!",
                report.saved, report.failed
            );
        } else {
            info!("Saved {} profiles", report.saved);
        }
        report
    }

    /// Drop a player's cache entry without saving. Returns whether one existed.
    pub fn remove_from_cache(&self, player: PlayerId) -> bool {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.remove(&player).is_some()
    }

    pub fn is_cached(&self, player: PlayerId) -> bool {
        self.cached(&player).is_some()
    }

    pub fn cache_size(&self) -> usize {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        cache.values().filter(|slot| slot.get().is_some()).count()
    }

    /// Discard every cached profile without saving. Unsaved progress is lost.
    pub fn clear_cache(&self) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        warn!("Clearing profile cache: {} entries discarded unsaved", cache.len());
        cache.clear();
    }

    /// Session start: load or create the profile. Returns whether the player
    /// has never been saved before.
    ///
    /// A profile still waiting for its quit save is reclaimed as is.
    pub fn on_join(&self, player: PlayerId) -> bool {
        let cached = self
            .reclaim(player)
            .unwrap_or_else(|| self.get_profile(player));
        let is_new = cached.lock().is_new();
        if is_new {
            info!("First-time player joined: {}", player);
        } else {
            info!("Player joined: {}", player);
        }
        is_new
    }

    /// Session end: schedule a save and evict the player once it finished.
    ///
    /// The profile stays cached until the save completes, so a quick rejoin
    /// keeps working on the same copy. Eviction is skipped if the player
    /// rejoined in the meantime.
    pub fn on_quit(self: &Arc<Self>, player: PlayerId) -> Option<JoinHandle<bool>> {
        let Some(cached) = self.cached(&player) else {
            warn!("Cannot save profile for player {}: not cached", player);
            return None;
        };
        {
            let _cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
            cached.departing.store(true, Ordering::SeqCst);
        }

        let manager = Arc::clone(self);
        Some(self.handle.spawn_blocking(move || {
            let saved = save_cached(
                manager.repository.as_ref(),
                &player,
                &cached,
                manager.retry,
                &manager.metrics,
            );
            if manager.evict_departed(player, &cached) {
                debug!("Removed player {} from cache", player);
            }
            saved
        }))
    }

    /// Cancel a pending quit eviction and hand back the cached profile.
    fn reclaim(&self, player: PlayerId) -> Option<Arc<CachedProfile>> {
        let cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let cached = cache.get(&player)?.get()?;
        cached.departing.store(false, Ordering::SeqCst);
        Some(Arc::clone(cached))
    }

    /// Remove `cached` if it is still the player's entry and still departing.
    fn evict_departed(&self, player: PlayerId, cached: &Arc<CachedProfile>) -> bool {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let current = cache
            .get(&player)
            .and_then(|slot| slot.get())
            .is_some_and(|entry| Arc::ptr_eq(entry, cached));
        if current && cached.departing.load(Ordering::SeqCst) {
            cache.remove(&player);
            return true;
        }
        false
    }

    /// Periodically run [`Self::save_all_profiles`] on the blocking pool.
    pub fn spawn_autosave(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        self.handle.spawn(run_autosave(Arc::clone(self), period))
    }
}
