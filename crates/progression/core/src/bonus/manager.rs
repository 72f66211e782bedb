use std::sync::Arc;

use super::BonusKind;
use crate::env::{ConfigOracle, RandomSource};
use crate::experience::{Material, tables};

/// Resolves level-derived bonuses.
///
/// `total = level * rate`, clamped to [`BonusKind::cap`]. Chance bonuses draw
/// `r` in `[0, 100)` from the shared random source and trigger iff `r < total`.
/// With bonuses disabled every method returns its neutral value and the
/// random source is left untouched.
#[derive(Clone)]
pub struct BonusManager {
    config: Arc<dyn ConfigOracle>,
    rng: Arc<dyn RandomSource>,
}

impl BonusManager {
    pub fn new(config: Arc<dyn ConfigOracle>, rng: Arc<dyn RandomSource>) -> Self {
        Self { config, rng }
    }

    pub fn enabled(&self) -> bool {
        self.config.bonuses_enabled()
    }

    /// Accumulated bonus in percent for a skill at `level`.
    pub fn total_bonus(&self, bonus: BonusKind, level: u32) -> f64 {
        let total = f64::from(level) * self.config.bonus_rate(bonus);
        match bonus.cap() {
            Some(cap) => total.min(cap),
            None => total,
        }
    }

    fn roll(&self, bonus: BonusKind, level: u32) -> bool {
        let chance = self.total_bonus(bonus, level);
        self.rng.roll_percent() < chance
    }

    /// Extra copy of the mined block, if the double-drop roll succeeds.
    pub fn mining_extra_drop(&self, level: u32, block: Material) -> Option<Material> {
        if !self.enabled() {
            return None;
        }
        self.roll(BonusKind::MiningDoubleDrop, level)
            .then_some(block)
    }

    /// Extra copy of the felled log, if the double-drop roll succeeds.
    pub fn woodcutting_extra_drop(&self, level: u32, block: Material) -> Option<Material> {
        if !self.enabled() {
            return None;
        }
        self.roll(BonusKind::WoodcuttingDoubleDrop, level)
            .then_some(block)
    }

    /// Extra crop item, if the roll succeeds and the block has a known drop.
    pub fn farming_extra_crop(&self, level: u32, crop: Material) -> Option<Material> {
        if !self.enabled() {
            return None;
        }
        if self.roll(BonusKind::FarmingDoubleCrop, level) {
            crop.crop_drop()
        } else {
            None
        }
    }

    /// Item the player receives for a catch; may be upgraded to treasure.
    ///
    /// An absent catch stays absent. The treasure is picked with a second
    /// draw from the same source.
    pub fn fishing_catch(&self, level: u32, caught: Option<Material>) -> Option<Material> {
        if !self.enabled() || caught.is_none() {
            return caught;
        }
        if self.roll(BonusKind::FishingTreasure, level) {
            let index = self.rng.index(tables::TREASURE.len());
            return Some(tables::TREASURE[index]);
        }
        caught
    }

    /// Damage multiplier, `1 + total/100`. Uncapped.
    pub fn combat_damage_multiplier(&self, level: u32) -> f64 {
        if !self.enabled() {
            return 1.0;
        }
        1.0 + self.total_bonus(BonusKind::CombatDamage, level) / 100.0
    }

    /// Reduced enchantment cost, rounded down, never below 1.
    pub fn enchanting_cost(&self, level: u32, base_cost: u32) -> u32 {
        if !self.enabled() {
            return base_cost;
        }
        let reduction = self.total_bonus(BonusKind::EnchantingCostReduction, level);
        let reduced = (f64::from(base_cost) * (1.0 - reduction / 100.0)) as u32;
        reduced.max(1)
    }

    /// Price multiplier, `1 - total/100`.
    pub fn trading_discount(&self, level: u32) -> f64 {
        if !self.enabled() {
            return 1.0;
        }
        1.0 - self.total_bonus(BonusKind::TradingDiscount, level) / 100.0
    }
}
