//! Operator tool for skill progression data.
//!
//! Reads configuration from the environment (and `.env`), opens the profile
//! store and runs one command against it. Logs go to stderr; command output
//! goes to stdout.

mod commands;
mod context;

use anyhow::Result;
use clap::Parser;
use commands::{Award, Flush, Show, StimulusCommand};
use context::Context;

/// Inspect and edit skill progression profiles
#[derive(Parser)]
#[command(name = "skills")]
#[command(about = "Skill progression tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Add experience to one skill of a player
    Award(Award),

    /// Print a player's skills
    Show(Show),

    /// Feed a gameplay event through the stimulus handler
    #[command(subcommand)]
    Stimulus(StimulusCommand),

    /// Load and rewrite stored profiles, repairing damaged fields
    Flush(Flush),
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();
    let context = Context::from_env()?;

    match cli.command {
        Command::Award(cmd) => cmd.execute(&context),
        Command::Show(cmd) => cmd.execute(&context),
        Command::Stimulus(cmd) => cmd.execute(&context),
        Command::Flush(cmd) => cmd.execute(&context),
    }
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
