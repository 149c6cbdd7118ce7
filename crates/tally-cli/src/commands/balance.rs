//! Balance command implementations (set-balance, balance projection)

use anyhow::Result;
use chrono::Utc;
use tally_core::Database;

pub fn cmd_set_balance(db: &Database, amount: f64) -> Result<()> {
    db.set_initial_balance(amount)?;
    println!("💰 Initial balance set to {}", amount);
    Ok(())
}

pub fn cmd_balance(db: &Database, weeks: usize) -> Result<()> {
    let today = Utc::now().date_naive();
    let projection = db.balance_projection(today, weeks)?;

    println!();
    println!("💵 Balance Projection");
    println!("   ─────────────────────────────────────────────");
    println!("   Current balance: {:.2}", projection.current_balance);
    println!();
    println!(
        "   {:10} │ {:>10} │ {:6} │ {:>10}",
        "Week", "Delta", "Source", "Balance"
    );
    println!("   ───────────┼────────────┼────────┼────────────");

    for week in &projection.weeks {
        println!(
            "   {:10} │ {:>10.2} │ {:6} │ {:>10.2}",
            week.week.to_string(),
            week.delta,
            week.source.as_str(),
            week.balance
        );
    }

    println!();
    Ok(())
}
