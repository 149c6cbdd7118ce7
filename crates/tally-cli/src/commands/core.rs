//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` / `resolve_week` - Shared utilities
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Show database status

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tally_core::{Database, YearWeek};

/// Open the database, running migrations if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

/// Resolve a week argument: 'current' or YYYY-WW
pub fn resolve_week(input: &str) -> Result<YearWeek> {
    YearWeek::resolve(input, Utc::now().date_naive())
        .map_err(|e| anyhow::anyhow!("{} (use 'current' or YYYY-WW)", e))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let (settings, created) = db.ensure_settings().context("Failed to create settings")?;
    if created {
        println!("   Created default settings with balance = 0");
    } else {
        println!(
            "   Settings already present (initial balance: {})",
            settings.initial_balance
        );
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Set your balance: tally set-balance 1000");
    println!("  2. Log a record: tally add -- -12.5 groceries");

    Ok(())
}

pub fn cmd_status(db_path: &Path) -> Result<()> {
    use std::fs;

    println!();
    println!("📊 Tally Status");
    println!("   ─────────────────────────────────────────────");

    println!("   Database: {}", db_path.display());

    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }

        let db = open_db(db_path)?;
        match db.get_settings()? {
            Some(settings) => println!("   Initial balance: {}", settings.initial_balance),
            None => println!("   Initial balance: (not set, run 'tally init')"),
        }
        println!("   Total recorded: {}", db.total_recorded()?);
    } else {
        println!("   Size: (database not initialized)");
    }

    println!();
    Ok(())
}
