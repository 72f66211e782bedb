use std::sync::Arc;

use super::{EntityKind, Material, TradeOffer, tables};
use crate::env::ConfigOracle;
use crate::skill::SkillKind;

/// Maps a gameplay stimulus to the experience it is worth.
///
/// Each method looks up the base value in [`tables`] and scales it by the
/// configured multiplier of the owning skill. An absent stimulus (`None`)
/// earns nothing, except for fishing where any cast that lands counts.
#[derive(Clone)]
pub struct ExperienceCalculator {
    config: Arc<dyn ConfigOracle>,
}

impl ExperienceCalculator {
    pub fn new(config: Arc<dyn ConfigOracle>) -> Self {
        Self { config }
    }

    #[inline]
    fn scaled(&self, kind: SkillKind, base: f64) -> f64 {
        base * self.config.experience_multiplier(kind)
    }

    pub fn mining_xp(&self, block: Option<Material>) -> f64 {
        match block {
            Some(block) => self.scaled(SkillKind::Mining, tables::mining(block)),
            None => 0.0,
        }
    }

    pub fn woodcutting_xp(&self, block: Option<Material>) -> f64 {
        match block {
            Some(block) => self.scaled(SkillKind::Woodcutting, tables::woodcutting(block)),
            None => 0.0,
        }
    }

    pub fn combat_xp(&self, entity: Option<EntityKind>) -> f64 {
        match entity {
            Some(entity) => self.scaled(SkillKind::Combat, tables::combat(entity)),
            None => 0.0,
        }
    }

    pub fn farming_xp(&self, crop: Option<Material>) -> f64 {
        match crop {
            Some(crop) => self.scaled(SkillKind::Farming, tables::farming(crop)),
            None => 0.0,
        }
    }

    pub fn fishing_xp(&self, caught: Option<Material>) -> f64 {
        let base = caught.map_or(tables::FISHING_BASE_XP, tables::fishing);
        self.scaled(SkillKind::Fishing, base)
    }

    /// Linear in the enchantment cost: `cost * 5`.
    pub fn enchanting_xp(&self, cost: u32) -> f64 {
        if cost == 0 {
            return 0.0;
        }
        self.scaled(
            SkillKind::Enchanting,
            f64::from(cost) * tables::ENCHANTING_XP_PER_LEVEL,
        )
    }

    /// Tier value of the result item times the result amount.
    pub fn trading_xp(&self, trade: Option<&TradeOffer>) -> f64 {
        let Some(trade) = trade else {
            return 0.0;
        };
        let base = match trade.result {
            Some(result) => tables::trade_value(result.material) * f64::from(result.amount),
            None => tables::TRADE_BASE_XP,
        };
        self.scaled(SkillKind::Trading, base)
    }
}
