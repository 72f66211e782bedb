//! In-memory ProfileRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use progression_core::{PlayerId, SkillProfile};

use crate::repository::{ProfileRepository, RepositoryError, Result};

/// In-memory implementation of ProfileRepository.
///
/// Keeps a cloned snapshot per player; loaded copies come back marked as
/// existing, like records read from disk.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<PlayerId, SkillProfile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles.
    pub fn len(&self) -> usize {
        self.profiles.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn save(&self, player: &PlayerId, profile: &SkillProfile) -> Result<()> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        profiles.insert(*player, profile.clone());
        Ok(())
    }

    fn load(&self, player: &PlayerId) -> Result<Option<SkillProfile>> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(profiles.get(player).cloned().map(|mut profile| {
            profile.mark_as_existing();
            profile
        }))
    }

    fn exists(&self, player: &PlayerId) -> bool {
        self.profiles
            .read()
            .map(|profiles| profiles.contains_key(player))
            .unwrap_or(false)
    }
}
