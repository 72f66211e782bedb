//! Dispatch from raw gameplay stimuli to experience awards and bonuses.
//!
//! The host engine decides when something happened and reports it as a
//! [`Stimulus`]; the handler picks the skill, computes the experience, awards
//! it and resolves the bonus the host should apply.

use std::sync::Arc;

use progression_core::{
    BonusManager, ConfigOracle, EntityKind, ExperienceCalculator, ExperienceResult, ItemStack,
    Material, PlayerId, SkillKind, TradeOffer, experience::tables,
};
use tracing::debug;

use crate::manager::PlayerDataManager;

/// Something a player did that may be worth experience.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stimulus {
    /// A block was broken. `fully_grown` only matters for crops.
    BlockBroken { block: Material, fully_grown: bool },
    /// Items picked up from the ground, e.g. ore drops.
    ItemPickedUp(ItemStack),
    /// The player dealt `damage` to an entity.
    EntityDamaged { damage: f64 },
    EntityKilled(EntityKind),
    /// A fishing line landed; `None` when nothing came up.
    FishCaught(Option<Material>),
    /// An enchantment was bought for `cost` levels.
    Enchanted { cost: u32 },
    /// A merchant trade; `None` when no recipe was selected.
    Traded(Option<TradeOffer>),
}

/// What the host should change in the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BonusOutcome {
    None,
    /// Drop one extra item at the broken block.
    ExtraDrop(Material),
    /// Give this item instead of the original catch.
    Catch(Option<Material>),
    /// Replace the dealt damage.
    Damage(f64),
    /// Charge this many levels instead.
    EnchantCost(u32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StimulusOutcome {
    /// `None` when the stimulus earned nothing.
    pub result: Option<ExperienceResult>,
    pub bonus: BonusOutcome,
}

impl StimulusOutcome {
    fn nothing() -> Self {
        Self {
            result: None,
            bonus: BonusOutcome::None,
        }
    }
}

/// Awards at most one skill per stimulus.
pub struct StimulusHandler {
    manager: Arc<PlayerDataManager>,
    calculator: ExperienceCalculator,
    bonuses: BonusManager,
    config: Arc<dyn ConfigOracle>,
}

impl StimulusHandler {
    pub fn new(
        manager: Arc<PlayerDataManager>,
        calculator: ExperienceCalculator,
        bonuses: BonusManager,
        config: Arc<dyn ConfigOracle>,
    ) -> Self {
        Self {
            manager,
            calculator,
            bonuses,
            config,
        }
    }

    pub fn manager(&self) -> &Arc<PlayerDataManager> {
        &self.manager
    }

    fn level(&self, player: PlayerId, kind: SkillKind) -> u32 {
        self.manager
            .get_profile(player)
            .lock()
            .get_skill(kind)
            .map_or(1, |skill| skill.level())
    }

    /// Award `amount` if positive and the skill is enabled. A level-up
    /// schedules an immediate background save.
    fn award(&self, player: PlayerId, kind: SkillKind, amount: f64) -> Option<ExperienceResult> {
        if amount <= 0.0 || !self.config.is_skill_enabled(kind) {
            return None;
        }
        let result = self.manager.award_experience(player, kind, amount);
        if result.leveled_up {
            debug!("Saving player {} after {} level-up", player, kind.display_name());
            // Detached: the save reports its own outcome.
            drop(self.manager.save_profile(player));
        }
        Some(result)
    }

    pub fn handle(&self, player: PlayerId, stimulus: Stimulus) -> StimulusOutcome {
        match stimulus {
            Stimulus::BlockBroken { block, fully_grown } => {
                self.block_broken(player, block, fully_grown)
            }
            Stimulus::ItemPickedUp(stack) => self.item_picked_up(player, stack),
            Stimulus::EntityDamaged { damage } => self.entity_damaged(player, damage),
            Stimulus::EntityKilled(entity) => {
                let amount = self.calculator.combat_xp(Some(entity));
                StimulusOutcome {
                    result: self.award(player, SkillKind::Combat, amount),
                    bonus: BonusOutcome::None,
                }
            }
            Stimulus::FishCaught(caught) => self.fish_caught(player, caught),
            Stimulus::Enchanted { cost } => self.enchanted(player, cost),
            Stimulus::Traded(trade) => StimulusOutcome {
                result: self.award(
                    player,
                    SkillKind::Trading,
                    self.calculator.trading_xp(trade.as_ref()),
                ),
                bonus: BonusOutcome::None,
            },
        }
    }

    fn block_broken(&self, player: PlayerId, block: Material, fully_grown: bool) -> StimulusOutcome {
        let mining = self.calculator.mining_xp(Some(block));
        if mining > 0.0 {
            let result = self.award(player, SkillKind::Mining, mining);
            let bonus = result
                .and_then(|_| {
                    self.bonuses
                        .mining_extra_drop(self.level(player, SkillKind::Mining), block)
                })
                .map_or(BonusOutcome::None, BonusOutcome::ExtraDrop);
            return StimulusOutcome { result, bonus };
        }

        let woodcutting = self.calculator.woodcutting_xp(Some(block));
        if woodcutting > 0.0 {
            let result = self.award(player, SkillKind::Woodcutting, woodcutting);
            let bonus = result
                .and_then(|_| {
                    self.bonuses
                        .woodcutting_extra_drop(self.level(player, SkillKind::Woodcutting), block)
                })
                .map_or(BonusOutcome::None, BonusOutcome::ExtraDrop);
            return StimulusOutcome { result, bonus };
        }

        if !(fully_grown && tables::is_crop(block)) {
            return StimulusOutcome::nothing();
        }
        let farming = self.calculator.farming_xp(Some(block));
        let result = self.award(player, SkillKind::Farming, farming);
        let bonus = result
            .and_then(|_| {
                self.bonuses
                    .farming_extra_crop(self.level(player, SkillKind::Farming), block)
            })
            .map_or(BonusOutcome::None, BonusOutcome::ExtraDrop);
        StimulusOutcome { result, bonus }
    }

    fn item_picked_up(&self, player: PlayerId, stack: ItemStack) -> StimulusOutcome {
        let amount = f64::from(stack.amount);

        let mining = self.calculator.mining_xp(Some(stack.material)) * amount;
        if mining > 0.0 {
            return StimulusOutcome {
                result: self.award(player, SkillKind::Mining, mining),
                bonus: BonusOutcome::None,
            };
        }

        let woodcutting = self.calculator.woodcutting_xp(Some(stack.material)) * amount;
        StimulusOutcome {
            result: self.award(player, SkillKind::Woodcutting, woodcutting),
            bonus: BonusOutcome::None,
        }
    }

    fn entity_damaged(&self, player: PlayerId, damage: f64) -> StimulusOutcome {
        if !self.config.is_skill_enabled(SkillKind::Combat) {
            return StimulusOutcome::nothing();
        }
        let multiplier = self
            .bonuses
            .combat_damage_multiplier(self.level(player, SkillKind::Combat));
        let bonus = if multiplier != 1.0 {
            BonusOutcome::Damage(damage * multiplier)
        } else {
            BonusOutcome::None
        };
        StimulusOutcome { result: None, bonus }
    }

    /// The catch may be upgraded first; experience is always for the
    /// original catch.
    fn fish_caught(&self, player: PlayerId, caught: Option<Material>) -> StimulusOutcome {
        let enabled = self.config.is_skill_enabled(SkillKind::Fishing);
        let bonus = match caught {
            Some(_) if enabled => {
                let upgraded = self
                    .bonuses
                    .fishing_catch(self.level(player, SkillKind::Fishing), caught);
                if upgraded != caught {
                    BonusOutcome::Catch(upgraded)
                } else {
                    BonusOutcome::None
                }
            }
            _ => BonusOutcome::None,
        };

        let amount = self.calculator.fishing_xp(caught);
        let result = self.award(player, SkillKind::Fishing, amount);
        StimulusOutcome { result, bonus }
    }

    /// The cost is reduced first; experience is for the original cost.
    fn enchanted(&self, player: PlayerId, cost: u32) -> StimulusOutcome {
        let enabled = self.config.is_skill_enabled(SkillKind::Enchanting);
        let bonus = if enabled {
            let reduced = self
                .bonuses
                .enchanting_cost(self.level(player, SkillKind::Enchanting), cost);
            if reduced != cost {
                BonusOutcome::EnchantCost(reduced)
            } else {
                BonusOutcome::None
            }
        } else {
            BonusOutcome::None
        };

        let amount = self.calculator.enchanting_xp(cost);
        let result = self.award(player, SkillKind::Enchanting, amount);
        StimulusOutcome { result, bonus }
    }

    /// Price multiplier for the player's next trade.
    pub fn trading_discount(&self, player: PlayerId) -> f64 {
        if !self.config.is_skill_enabled(SkillKind::Trading) {
            return 1.0;
        }
        self.bonuses
            .trading_discount(self.level(player, SkillKind::Trading))
    }
}
