//! Run one gameplay event through the stimulus handler and save the result.

use anyhow::{Result, bail};
use clap::Subcommand;
use console::style;
use progression_core::{EntityKind, ItemStack, Material, PlayerId, TradeOffer};
use runtime::{BonusOutcome, Stimulus, StimulusOutcome};

use crate::context::Context;

/// Gameplay events
#[derive(Subcommand, Debug)]
pub enum StimulusCommand {
    /// A block was broken
    Break {
        player: PlayerId,
        block: Material,
        /// The crop had reached full growth
        #[arg(long)]
        grown: bool,
    },

    /// Items were picked up
    Pickup {
        player: PlayerId,
        item: Material,
        #[arg(default_value_t = 1)]
        amount: u32,
    },

    /// The player hit an entity
    Damage { player: PlayerId, damage: f64 },

    /// The player killed an entity
    Kill { player: PlayerId, entity: EntityKind },

    /// A fishing line was reeled in
    Fish {
        player: PlayerId,
        /// What came up, if anything
        caught: Option<Material>,
    },

    /// An enchantment was bought
    Enchant { player: PlayerId, cost: u32 },

    /// A villager trade completed
    Trade {
        player: PlayerId,
        /// Result item; omitted for an offer without output
        result: Option<Material>,
        #[arg(long, default_value_t = 1)]
        amount: u32,
    },
}

impl StimulusCommand {
    fn into_parts(self) -> (PlayerId, Stimulus) {
        match self {
            Self::Break {
                player,
                block,
                grown,
            } => (
                player,
                Stimulus::BlockBroken {
                    block,
                    fully_grown: grown,
                },
            ),
            Self::Pickup {
                player,
                item,
                amount,
            } => (player, Stimulus::ItemPickedUp(ItemStack::new(item, amount))),
            Self::Damage { player, damage } => (player, Stimulus::EntityDamaged { damage }),
            Self::Kill { player, entity } => (player, Stimulus::EntityKilled(entity)),
            Self::Fish { player, caught } => (player, Stimulus::FishCaught(caught)),
            Self::Enchant { player, cost } => (player, Stimulus::Enchanted { cost }),
            Self::Trade {
                player,
                result,
                amount,
            } => {
                let offer = match result {
                    Some(material) => TradeOffer::new(ItemStack::new(material, amount)),
                    None => TradeOffer::empty(),
                };
                (player, Stimulus::Traded(Some(offer)))
            }
        }
    }

    pub fn execute(self, context: &Context) -> Result<()> {
        let (player, stimulus) = self.into_parts();
        let outcome = context.handler.handle(player, stimulus);
        print_outcome(&outcome);

        if outcome.result.is_some() && !context.manager.save_profile_sync(player) {
            bail!("failed to save profile of {}", player);
        }
        Ok(())
    }
}

fn print_outcome(outcome: &StimulusOutcome) {
    match outcome.result {
        Some(result) => {
            println!(
                "{} +{:.1} {} XP",
                style("✓").green().bold(),
                result.experience_gained,
                result.skill_kind.display_name()
            );
            if result.leveled_up {
                println!(
                    "  {} gained {} level(s)",
                    style("▲").yellow().bold(),
                    result.levels_gained
                );
            }
        }
        None => println!("{} No experience", style("-").dim()),
    }

    match outcome.bonus {
        BonusOutcome::None => {}
        BonusOutcome::ExtraDrop(item) => println!("  Bonus: extra {}", item),
        BonusOutcome::Catch(Some(item)) => println!("  Bonus: catch became {}", item),
        BonusOutcome::Catch(None) => {}
        BonusOutcome::Damage(damage) => println!("  Bonus: damage raised to {:.2}", damage),
        BonusOutcome::EnchantCost(cost) => println!("  Bonus: cost reduced to {}", cost),
    }
}
