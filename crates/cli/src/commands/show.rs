//! Print a stored profile.

use anyhow::Result;
use clap::Parser;
use console::style;
use progression_core::{PlayerId, SkillProfile};
use runtime::ProfileRepository;

use crate::context::Context;

/// Print a player's skills
#[derive(Parser, Debug)]
pub struct Show {
    /// Player UUID
    pub player: PlayerId,
}

impl Show {
    pub fn execute(self, context: &Context) -> Result<()> {
        match context.repository.load(&self.player)? {
            Some(profile) => print_profile(&profile),
            None => println!(
                "{} No profile stored for {}",
                style("✗").red().bold(),
                self.player
            ),
        }
        Ok(())
    }
}

fn print_profile(profile: &SkillProfile) {
    println!("{}", style(format!("Player {}", profile.player_id())).bold());

    for skill in profile.skills() {
        let required = skill.required_experience();
        let progress = if required > 0.0 {
            skill.experience() / required * 100.0
        } else {
            0.0
        };
        let marker = if profile.displayed_skill() == Some(skill.kind()) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<12} lvl {:>5}  {:>12.1} / {:<12.1} ({:.0}%)",
            marker,
            skill.kind().display_name(),
            skill.level(),
            skill.experience(),
            required,
            progress
        );
    }

    println!("  Total level: {}", style(profile.total_level()).cyan());
}
