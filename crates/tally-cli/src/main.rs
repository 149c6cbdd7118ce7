//! Tally CLI - Weekly household budget tracker
//!
//! Usage:
//!   tally init                    Initialize database
//!   tally add -- -12.5 groceries  Log an expense in the current week
//!   tally week-stats current      Compare actuals against estimates
//!   tally balance                 Project the balance forward
//!   tally chat                    Interactive chat session

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Status => commands::cmd_status(&cli.db),
        Commands::SetBalance { amount } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_set_balance(&db, amount)
        }
        Commands::Balance { weeks } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_balance(&db, weeks)
        }
        Commands::Add {
            amount,
            category,
            week,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_add(&db, amount, &category, &week)
        }
        Commands::SetWeekly {
            week,
            kind,
            category,
            amount,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_set_weekly(&db, &week, &kind, &category, amount)
        }
        Commands::ShowWeekly { week } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_show_weekly(&db, &week)
        }
        Commands::CurrentWeek => commands::cmd_current_week(),
        Commands::ShowRecords { week } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_show_records(&db, &week)
        }
        Commands::WeekStats { week } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_week_stats(&db, &week)
        }
        Commands::Chat => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_chat(&db)
        }
    }
}
