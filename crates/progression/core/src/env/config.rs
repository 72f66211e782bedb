//! Configuration oracle for exposing host settings to the progression rules.

use crate::bonus::BonusKind;
use crate::skill::SkillKind;

/// Passive key-value provider for multipliers, curve parameters and bonus rates.
///
/// Implementations are expected to return in-domain values (positive
/// multipliers and curve parameters, non-negative rates). Validation happens
/// where the values are loaded, not where they are read.
pub trait ConfigOracle: Send + Sync {
    /// Factor applied to every base XP value of `kind`.
    fn experience_multiplier(&self, kind: SkillKind) -> f64;

    fn base_xp(&self) -> f64;

    fn exponent(&self) -> f64;

    /// Global switch; when off every bonus resolves to its neutral value.
    fn bonuses_enabled(&self) -> bool;

    /// Per-level increment, in percent, of the given bonus.
    fn bonus_rate(&self, bonus: BonusKind) -> f64;

    fn is_skill_enabled(&self, kind: SkillKind) -> bool;
}
