//! # quest-cli
//!
//! Command-line interface for Eternal Quest.
//!
//! - `quest add simple|eternal|checklist ...` — create a goal
//! - `quest record <number>` — record an event against a goal
//! - `quest list` / `quest score` — show goals and the current score
//! - `quest menu` — interactive menu loop

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quest_goal::ProjectConfig;
use tracing_subscriber::EnvFilter;

use commands::Session;

/// Eternal Quest — track goals and earn points.
#[derive(Parser)]
#[command(name = "quest", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Save file to use instead of the configured one.
    #[arg(long)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new goal.
    Add {
        #[command(subcommand)]
        goal: commands::goal::NewGoal,
    },
    /// Record an event against a goal (numbered as in `list`).
    Record {
        /// Goal number, starting at 1.
        number: usize,
    },
    /// List all goals.
    List,
    /// Show the current score.
    Score,
    /// Run the interactive menu.
    Menu,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with rendered goal lists.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quest_goal=warn,quest=warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project = ProjectConfig::for_project(&cli.project_root);
    let session = Session::open(&project, cli.file.as_deref());

    match &cli.command {
        Commands::Add { goal } => commands::goal::add(&session, goal),
        Commands::Record { number } => commands::goal::record(&session, *number),
        Commands::List => commands::goal::list(&session),
        Commands::Score => commands::goal::score(&session),
        Commands::Menu => commands::menu::run(&session),
    }
}
