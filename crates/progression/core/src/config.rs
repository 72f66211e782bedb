//! Default settings for the progression rules.

use crate::bonus::BonusKind;
use crate::env::ConfigOracle;
use crate::skill::{LevelFormula, SkillKind};

/// Rejected setting value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a positive finite number, got {value}")]
    NonPositive { key: &'static str, value: f64 },

    #[error("{key} must be a non-negative finite number, got {value}")]
    Negative { key: &'static str, value: f64 },
}

/// In-memory settings with the stock defaults.
///
/// Per-skill values are stored in arrays indexed by [`SkillKind::index`];
/// each bonus rate lives at the index of the skill that owns it.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillsConfig {
    multipliers: [f64; SkillKind::COUNT],
    bonus_rates: [f64; SkillKind::COUNT],
    enabled: [bool; SkillKind::COUNT],
    formula: LevelFormula,
    bonuses_enabled: bool,
}

impl SkillsConfig {
    pub const DEFAULT_MULTIPLIER: f64 = 1.0;

    pub fn new() -> Self {
        let mut bonus_rates = [0.0; SkillKind::COUNT];
        for bonus in BonusKind::ALL {
            bonus_rates[bonus.skill().index()] = bonus.default_rate();
        }
        Self {
            multipliers: [Self::DEFAULT_MULTIPLIER; SkillKind::COUNT],
            bonus_rates,
            enabled: [true; SkillKind::COUNT],
            formula: LevelFormula::default(),
            bonuses_enabled: true,
        }
    }

    pub fn formula(&self) -> LevelFormula {
        self.formula
    }

    pub fn with_formula(mut self, base_xp: f64, exponent: f64) -> Result<Self, ConfigError> {
        self.formula = LevelFormula::new(base_xp, exponent)?;
        Ok(self)
    }

    pub fn with_multiplier(mut self, kind: SkillKind, multiplier: f64) -> Result<Self, ConfigError> {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(ConfigError::NonPositive {
                key: "experience-multiplier",
                value: multiplier,
            });
        }
        self.multipliers[kind.index()] = multiplier;
        Ok(self)
    }

    pub fn with_bonus_rate(mut self, bonus: BonusKind, rate: f64) -> Result<Self, ConfigError> {
        if !(rate.is_finite() && rate >= 0.0) {
            return Err(ConfigError::Negative {
                key: bonus.key(),
                value: rate,
            });
        }
        self.bonus_rates[bonus.skill().index()] = rate;
        Ok(self)
    }

    pub fn with_bonuses_enabled(mut self, enabled: bool) -> Self {
        self.bonuses_enabled = enabled;
        self
    }

    pub fn with_skill_enabled(mut self, kind: SkillKind, enabled: bool) -> Self {
        self.enabled[kind.index()] = enabled;
        self
    }
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigOracle for SkillsConfig {
    fn experience_multiplier(&self, kind: SkillKind) -> f64 {
        self.multipliers[kind.index()]
    }

    fn base_xp(&self) -> f64 {
        self.formula.base_xp()
    }

    fn exponent(&self) -> f64 {
        self.formula.exponent()
    }

    fn bonuses_enabled(&self) -> bool {
        self.bonuses_enabled
    }

    fn bonus_rate(&self, bonus: BonusKind) -> f64 {
        self.bonus_rates[bonus.skill().index()]
    }

    fn is_skill_enabled(&self, kind: SkillKind) -> bool {
        self.enabled[kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_settings() {
        let config = SkillsConfig::default();
        assert_eq!(config.base_xp(), 100.0);
        assert_eq!(config.exponent(), 1.5);
        assert!(config.bonuses_enabled());
        for kind in SkillKind::ALL {
            assert_eq!(config.experience_multiplier(kind), 1.0);
            assert!(config.is_skill_enabled(kind));
        }
        assert_eq!(config.bonus_rate(BonusKind::MiningDoubleDrop), 0.5);
        assert_eq!(config.bonus_rate(BonusKind::CombatDamage), 0.5);
        assert_eq!(config.bonus_rate(BonusKind::FishingTreasure), 0.3);
        assert_eq!(config.bonus_rate(BonusKind::TradingDiscount), 0.3);
    }

    #[test]
    fn builders_override_single_entries() {
        let config = SkillsConfig::new()
            .with_multiplier(SkillKind::Mining, 2.0)
            .unwrap()
            .with_bonus_rate(BonusKind::TradingDiscount, 1.0)
            .unwrap()
            .with_skill_enabled(SkillKind::Fishing, false);

        assert_eq!(config.experience_multiplier(SkillKind::Mining), 2.0);
        assert_eq!(config.experience_multiplier(SkillKind::Combat), 1.0);
        assert_eq!(config.bonus_rate(BonusKind::TradingDiscount), 1.0);
        assert!(!config.is_skill_enabled(SkillKind::Fishing));
    }

    #[test]
    fn rejects_out_of_domain_values() {
        assert!(SkillsConfig::new().with_multiplier(SkillKind::Mining, 0.0).is_err());
        assert!(
            SkillsConfig::new()
                .with_bonus_rate(BonusKind::CombatDamage, -0.1)
                .is_err()
        );
        assert!(SkillsConfig::new().with_formula(100.0, 0.0).is_err());
    }
}
