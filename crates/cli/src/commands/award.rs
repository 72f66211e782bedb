//! Grant experience directly, bypassing the stimulus tables.

use anyhow::{Result, bail};
use clap::Parser;
use console::style;
use progression_core::{PlayerId, SkillKind};

use crate::context::Context;

/// Add experience to one skill of a player
#[derive(Parser, Debug)]
pub struct Award {
    /// Player UUID
    pub player: PlayerId,

    /// Skill name, e.g. `mining`
    pub skill: SkillKind,

    /// Experience to add; non-positive amounts change nothing
    pub amount: f64,
}

impl Award {
    pub fn execute(self, context: &Context) -> Result<()> {
        let result = context
            .manager
            .award_experience(self.player, self.skill, self.amount);

        if result.is_empty() {
            println!("{} Nothing awarded", style("-").dim());
            return Ok(());
        }

        let level = context
            .manager
            .get_profile(self.player)
            .lock()
            .get_skill(self.skill)
            .map_or(1, |skill| skill.level());

        println!(
            "{} +{:.1} {} XP (level {})",
            style("✓").green().bold(),
            result.experience_gained,
            self.skill.display_name(),
            level
        );
        if result.leveled_up {
            println!(
                "  {} gained {} level(s)",
                style("▲").yellow().bold(),
                result.levels_gained
            );
        }

        if !context.manager.save_profile_sync(self.player) {
            bail!("failed to save profile of {}", self.player);
        }
        Ok(())
    }
}
