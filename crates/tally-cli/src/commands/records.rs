//! Record command implementations (add, show-records)

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use tally_core::{Database, EstimateKind, NewRecord};

use super::resolve_week;

pub fn cmd_add(db: &Database, amount: f64, category: &str, week: &str) -> Result<()> {
    let category = category.to_lowercase();
    let week = resolve_week(week)?;

    let Some(kind) = EstimateKind::of_category(&category) else {
        bail!(
            "Unknown category '{}'. Valid: {}",
            category,
            tally_core::models::record_categories().join(", ")
        );
    };
    if !kind.accepts_amount(amount) {
        bail!(
            "Invalid combination: '{}' is an {} category, amount {} has the wrong sign",
            category,
            kind,
            amount
        );
    }

    let user = std::env::var("USER").ok();
    db.insert_record(&NewRecord {
        user,
        amount,
        category: category.clone(),
        week,
    })?;

    println!("✅ Added {} ({}) for week {}", amount, category, week);
    Ok(())
}

pub fn cmd_show_records(db: &Database, week: &str) -> Result<()> {
    let week = resolve_week(week)?;
    let records = db.records_for_week(week)?;

    if records.is_empty() {
        println!("No records found for {}", week);
        return Ok(());
    }

    // Group by day then category, summing amounts
    let mut days: BTreeMap<String, BTreeMap<&str, f64>> = BTreeMap::new();
    for r in &records {
        let day = r.recorded_at.format("%d.%m").to_string();
        *days
            .entry(day)
            .or_default()
            .entry(r.category.as_str())
            .or_default() += r.amount;
    }

    println!();
    println!("📒 Records for {}", week);
    println!("   ─────────────────────────────");
    for (day, categories) in &days {
        println!("   {}:", day);
        for (category, total) in categories {
            println!("     {:15} {:>10.2}", category, total);
        }
    }
    println!();

    Ok(())
}
