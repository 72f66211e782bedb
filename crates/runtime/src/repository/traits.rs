//! Repository contract for durable player profiles.

use progression_core::{PlayerId, SkillProfile};

use super::Result;

/// Durable store holding one record per player.
pub trait ProfileRepository: Send + Sync {
    /// Prepare the backing store. Called once before first use.
    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    /// Persist the full profile, replacing any previous record.
    fn save(&self, player: &PlayerId, profile: &SkillProfile) -> Result<()>;

    /// Load a profile. `Ok(None)` when the player has no record.
    fn load(&self, player: &PlayerId) -> Result<Option<SkillProfile>>;

    /// Whether a current record exists.
    fn exists(&self, player: &PlayerId) -> bool;
}
