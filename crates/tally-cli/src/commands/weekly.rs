//! Estimate command implementations (set-weekly, show-weekly, current-week,
//! week-stats)

use anyhow::{bail, Result};
use chrono::Utc;
use tally_core::{weeks_of_month, CategoryDiff, Database, EstimateKind, YearWeek};

use super::resolve_week;

pub fn cmd_set_weekly(
    db: &Database,
    week: &str,
    kind: &str,
    category: &str,
    amount: f64,
) -> Result<()> {
    let week = resolve_week(week)?;
    let kind: EstimateKind = match kind.parse() {
        Ok(kind) => kind,
        Err(e) => bail!(e),
    };

    let category = category.to_lowercase();
    if !kind.categories().contains(&category.as_str()) {
        bail!(
            "Invalid {} category '{}'. Valid: {}",
            kind,
            category,
            kind.categories().join(", ")
        );
    }
    if !kind.accepts_amount(amount) {
        match kind {
            EstimateKind::Income => bail!("Income cannot be negative"),
            EstimateKind::Expense => bail!("Expense must be negative"),
        }
    }

    db.set_estimate(week, kind, &category, amount)?;
    println!(
        "✅ Set {} estimate for {} = {} in {}",
        kind, category, amount, week
    );
    Ok(())
}

pub fn cmd_show_weekly(db: &Database, week: &str) -> Result<()> {
    let week = resolve_week(week)?;
    let Some(estimates) = db.get_week_estimates(week)? else {
        println!("No estimates found for week {}", week);
        return Ok(());
    };

    println!();
    println!("📅 Estimates for {}", week);
    println!("   ─────────────────────────────");
    println!("   💰 Incomes:");
    for (category, amount) in &estimates.incomes {
        println!("     {:15} {:>10.2}", category, amount);
    }
    println!("   💸 Expenses:");
    for (category, amount) in &estimates.expenses {
        println!("     {:15} {:>10.2}", category, amount);
    }
    println!();
    println!("   Net: {:.2}", estimates.net());

    Ok(())
}

pub fn cmd_current_week() -> Result<()> {
    let today = Utc::now().date_naive();
    println!("Current week is {}", YearWeek::from_date(today));
    println!();
    for w in weeks_of_month(today) {
        println!(
            "{} - {}    {}",
            w.start.format("%d.%m"),
            w.end.format("%d.%m"),
            w.week
        );
    }
    Ok(())
}

pub fn cmd_week_stats(db: &Database, week: &str) -> Result<()> {
    let week = resolve_week(week)?;
    let stats = db.week_stats(week)?;

    println!();
    println!("📊 Stats for {}", week);
    println!("   ─────────────────────────────────────────────────────");
    println!(
        "   {:15} │ {:>10} │ {:>10} │ {:>10}",
        "Category", "Expected", "Real", "Diff"
    );
    println!("   ────────────────┼────────────┼────────────┼────────────");

    print_section("💰 Incomes", &stats.incomes);
    print_section("💸 Expenses", &stats.expenses);

    println!();
    println!("   📌 Totals");
    println!(
        "   Income:  expected {:.2}, real {:.2}, diff {:.2}",
        stats.income_totals.expected, stats.income_totals.real, stats.income_totals.diff
    );
    println!(
        "   Expense: expected {:.2}, real {:.2}, diff {:.2}",
        stats.expense_totals.expected, stats.expense_totals.real, stats.expense_totals.diff
    );
    println!(
        "   Balance difference (real - expected): {:.2}",
        stats.balance_diff
    );

    Ok(())
}

fn print_section(title: &str, diffs: &[CategoryDiff]) {
    println!("   {}", title);
    if diffs.is_empty() {
        println!("     (none)");
        return;
    }
    for d in diffs {
        println!(
            "   {:15} │ {:>10.2} │ {:>10.2} │ {:>10.2}",
            d.category, d.expected, d.real, d.diff
        );
    }
}
