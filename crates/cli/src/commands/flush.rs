//! Rewrite stored records through the current schema.
//!
//! Loading repairs clamped fields and fills missing skills; saving writes the
//! repaired record back. Records that cannot be read are left untouched.

use std::fs;

use anyhow::{Result, bail};
use clap::Parser;
use console::style;
use progression_core::PlayerId;
use runtime::{ProfileRepository, SaveMetrics, save_with_retry};

use crate::context::Context;

/// Load and rewrite stored profiles
#[derive(Parser, Debug)]
pub struct Flush {
    /// Players to rewrite (default: every record in the store)
    pub players: Vec<PlayerId>,
}

impl Flush {
    pub fn execute(self, context: &Context) -> Result<()> {
        let players = if self.players.is_empty() {
            stored_players(context)?
        } else {
            self.players
        };

        let metrics = SaveMetrics::new();
        let mut unreadable = 0usize;

        for player in &players {
            let profile = match context.repository.load(player) {
                Ok(Some(profile)) => profile,
                Ok(None) => {
                    println!("{} {} has no record", style("-").dim(), player);
                    continue;
                }
                Err(e) => {
                    eprintln!("{} {}: {}", style("✗").red().bold(), player, e);
                    unreadable += 1;
                    continue;
                }
            };

            if save_with_retry(
                context.repository.as_ref(),
                player,
                &profile,
                context.config.retry,
                &metrics,
            ) {
                println!("{} {}", style("✓").green(), player);
            }
        }

        let summary = metrics.snapshot();
        println!(
            "\nRewrote {} profile(s), {} failed, {} unreadable",
            summary.saved, summary.failed, unreadable
        );
        if summary.failed > 0 {
            bail!("{} profile(s) could not be saved", summary.failed);
        }
        Ok(())
    }
}

/// Players with a current record file, from `<uuid>.json` names.
fn stored_players(context: &Context) -> Result<Vec<PlayerId>> {
    let mut players = Vec::new();
    for entry in fs::read_dir(context.repository.base_dir())? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json")
            && let Some(player) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<PlayerId>().ok())
        {
            players.push(player);
        }
    }
    players.sort();
    Ok(players)
}
