//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Weekly household budget tracker
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Track weekly income/expense records against estimates", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database (creates default settings)
    Init,

    /// Show database status
    Status,

    /// Set the initial balance
    SetBalance {
        /// New initial balance
        amount: f64,
    },

    /// Project the balance over upcoming weeks
    Balance {
        /// Number of week buckets, current week included
        #[arg(long, default_value_t = tally_core::PROJECTION_WEEKS)]
        weeks: usize,
    },

    /// Log a record (negative amount = expense, positive = income)
    Add {
        /// Signed amount
        #[arg(allow_hyphen_values = true)]
        amount: f64,

        /// Category (must match the amount's sign)
        category: String,

        /// Week bucket: 'current' or YYYY-WW
        #[arg(long, default_value = "current")]
        week: String,
    },

    /// Set one weekly estimate (week, income|expense, category, amount)
    SetWeekly {
        /// Week: 'current' or YYYY-WW
        week: String,

        /// income or expense
        kind: String,

        /// Category from the kind's fixed set
        category: String,

        /// Signed amount (income >= 0, expense <= 0)
        #[arg(allow_hyphen_values = true)]
        amount: f64,
    },

    /// Show a week's estimates
    ShowWeekly {
        /// Week: 'current' or YYYY-WW
        week: String,
    },

    /// Show the current week and this month's week ranges
    CurrentWeek,

    /// Show a week's records grouped by day
    ShowRecords {
        /// Week: 'current' or YYYY-WW
        week: String,
    },

    /// Compare a week's actuals against its estimates
    WeekStats {
        /// Week: 'current' or YYYY-WW
        week: String,
    },

    /// Interactive chat session (reads commands from stdin)
    Chat,
}
