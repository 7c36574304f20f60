mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dayplan_core::DayplanConfig;
use dayplan_core::PlanRepository;

#[derive(Parser)]
#[command(name = "dayplan")]
#[command(about = "Manage your daily plans and spaced-repetition reminders")]
struct Cli {
    /// Enable debug diagnostics (RUST_LOG still takes precedence)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a plan
    Add {
        /// Plan text
        text: String,

        /// Target date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Create a spaced-repetition family (today, +1, +3, +6, +14, +29 days)
        /// instead of a single plan
        #[arg(short, long)]
        repeat: bool,
    },
    /// List plans on a date
    List {
        /// Date to list (YYYY-MM-DD), defaults to today
        date: Option<String>,
    },
    /// Toggle a plan's completion
    Done {
        /// Date the plan lives on (YYYY-MM-DD)
        date: String,
        /// Plan id (see `dayplan list`)
        id: i64,
    },
    /// Edit a plan's text
    Edit {
        date: String,
        id: i64,
        text: String,

        /// Apply to every member of the plan's repetition family
        #[arg(long)]
        all: bool,
    },
    /// Delete a plan
    Rm {
        date: String,
        id: i64,

        /// Delete every member of the plan's repetition family
        #[arg(long)]
        all: bool,
    },
    /// Show every date that has plans
    Dates,
    /// Export the full plan document as a JSON backup
    Export {
        /// Output path (defaults to plan-backup-<date>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a JSON backup, replacing the current document
    Import { path: PathBuf },
    /// Show or change configuration and settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Set a settings key (theme, showWarning, killAnimation, killSound,
    /// whiteNoiseType, deepseekApiKey, quickTasks)
    Set { key: String, value: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut env_filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    if cli.verbose > 0 {
        env_filter = env_filter
            .add_directive("dayplan=debug".parse()?)
            .add_directive("dayplan_core=debug".parse()?);
    }
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = DayplanConfig::load()?;
    let repo = PlanRepository::new(config.store());

    match cli.command {
        Commands::Add { text, date, repeat } => {
            commands::add::run(&repo, date.as_deref(), &text, repeat)
        }
        Commands::List { date } => commands::list::run(&repo, date.as_deref()),
        Commands::Done { date, id } => commands::done::run(&repo, &date, id),
        Commands::Edit { date, id, text, all } => {
            commands::edit::run(&repo, &date, id, &text, all)
        }
        Commands::Rm { date, id, all } => commands::remove::run(&repo, &date, id, all),
        Commands::Dates => commands::dates::run(&repo),
        Commands::Export { output } => commands::export::run(&repo, output),
        Commands::Import { path } => commands::import::run(&repo, &path),
        Commands::Config { action } => commands::config::run(&repo, &config, action),
    }
}
