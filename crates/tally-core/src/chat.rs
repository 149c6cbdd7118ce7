//! Chat command router
//!
//! Framework-agnostic conversational surface: one inbound line of text in,
//! reply lines out. A session holds the database handle plus at most one
//! in-flight wizard; the surrounding transport (CLI REPL, a chat bot
//! adapter) only shuttles strings.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::db::Database;
use crate::error::Result;
use crate::models::{Projection, Record, WeekEstimates, WeekStats};
use crate::stats::PROJECTION_WEEKS;
use crate::week::{weeks_of_month, YearWeek};
use crate::wizard::{EstimateWizard, RecordWizard, StepResult};

const COMMANDS_HELP: &str = "Available commands:\n\
    /start - settings and this menu\n\
    /setbalance <amount> - set the initial balance\n\
    /balance - balance projection\n\
    /add - log a record\n\
    /setweekly - set weekly estimates\n\
    /showweekly <year-week> - show estimates\n\
    /currentweek - current week and month calendar\n\
    /showrecords <year-week> - show records\n\
    /weekstats <year-week> - actual vs. estimated\n\
    /cancel - cancel the current entry";

enum ActiveWizard {
    Add(RecordWizard),
    Weekly(EstimateWizard),
}

/// One user's conversation with the tracker
pub struct ChatSession {
    db: Database,
    /// Who is typing; attribution only
    user: Option<String>,
    wizard: Option<ActiveWizard>,
}

impl ChatSession {
    pub fn new(db: Database, user: Option<String>) -> Self {
        Self {
            db,
            user,
            wizard: None,
        }
    }

    /// Handle one inbound message using today's date
    pub fn handle(&mut self, text: &str) -> Result<Vec<String>> {
        self.handle_at(text, Utc::now().date_naive())
    }

    /// Handle one inbound message with an explicit "today" (testable clock)
    pub fn handle_at(&mut self, text: &str, today: NaiveDate) -> Result<Vec<String>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(vec![]);
        }

        if let Some(command) = text.strip_prefix('/') {
            let mut parts = command.split_whitespace();
            let name = parts.next().unwrap_or_default().to_lowercase();
            let arg = parts.next();
            debug!(command = %name, "Dispatching chat command");
            return self.dispatch(&name, arg, today);
        }

        // Plain text feeds the in-flight wizard, if any
        match self.wizard.take() {
            Some(wizard) => self.step_wizard(wizard, text, today),
            None => Ok(vec![
                "Use /start to see available commands.".to_string(),
            ]),
        }
    }

    fn dispatch(
        &mut self,
        name: &str,
        arg: Option<&str>,
        today: NaiveDate,
    ) -> Result<Vec<String>> {
        match name {
            "start" => self.cmd_start(),
            "setbalance" => self.cmd_setbalance(arg),
            "balance" => self.cmd_balance(today),
            "add" => {
                let (wizard, prompt) = RecordWizard::start(self.user.clone());
                self.wizard = Some(ActiveWizard::Add(wizard));
                Ok(vec![prompt])
            }
            "setweekly" => {
                let (wizard, prompt) = EstimateWizard::start();
                self.wizard = Some(ActiveWizard::Weekly(wizard));
                Ok(vec![prompt])
            }
            "showweekly" => self.cmd_showweekly(arg),
            "currentweek" => Ok(vec![render_current_week(today)]),
            "showrecords" => self.cmd_showrecords(arg),
            "weekstats" => self.cmd_weekstats(arg),
            "cancel" => {
                if self.wizard.take().is_some() {
                    Ok(vec!["❌ Canceled.".to_string()])
                } else {
                    Ok(vec!["Nothing to cancel.".to_string()])
                }
            }
            _ => Ok(vec!["❌ Unknown command. Try /start.".to_string()]),
        }
    }

    fn step_wizard(
        &mut self,
        wizard: ActiveWizard,
        input: &str,
        today: NaiveDate,
    ) -> Result<Vec<String>> {
        match wizard {
            ActiveWizard::Add(mut wizard) => match wizard.step(input, today) {
                StepResult::Continue(reply) => {
                    self.wizard = Some(ActiveWizard::Add(wizard));
                    Ok(vec![reply])
                }
                StepResult::SaveRecord(record, reply) => {
                    self.db.insert_record(&record)?;
                    Ok(vec![reply])
                }
                StepResult::Finish(reply) => Ok(vec![reply]),
                // The record wizard never emits estimates
                StepResult::SaveEstimate(_, reply) => Ok(vec![reply]),
            },
            ActiveWizard::Weekly(mut wizard) => match wizard.step(input, today) {
                StepResult::Continue(reply) => {
                    self.wizard = Some(ActiveWizard::Weekly(wizard));
                    Ok(vec![reply])
                }
                StepResult::SaveEstimate(entry, reply) => {
                    self.db.upsert_estimate(&entry)?;
                    self.wizard = Some(ActiveWizard::Weekly(wizard));
                    Ok(vec![reply])
                }
                StepResult::Finish(reply) => Ok(vec![reply]),
                // The estimate wizard never emits records
                StepResult::SaveRecord(_, reply) => Ok(vec![reply]),
            },
        }
    }

    fn cmd_start(&mut self) -> Result<Vec<String>> {
        let (settings, created) = self.db.ensure_settings()?;
        let greeting = if created {
            "No settings found. Created default settings with balance = 0.\n\
             Use /setbalance <amount> to change it."
                .to_string()
        } else {
            format!(
                "Welcome! Current initial balance: {}.\nUse /setbalance <amount> to update.",
                settings.initial_balance
            )
        };
        Ok(vec![greeting, COMMANDS_HELP.to_string()])
    }

    fn cmd_setbalance(&mut self, arg: Option<&str>) -> Result<Vec<String>> {
        let Some(amount) = arg.and_then(|a| a.parse::<f64>().ok()) else {
            return Ok(vec!["Usage: /setbalance <amount>".to_string()]);
        };
        self.db.set_initial_balance(amount)?;
        Ok(vec![format!("Initial balance set to {}", amount)])
    }

    fn cmd_balance(&mut self, today: NaiveDate) -> Result<Vec<String>> {
        let projection = self.db.balance_projection(today, PROJECTION_WEEKS)?;
        Ok(vec![render_projection(&projection)])
    }

    fn cmd_showweekly(&mut self, arg: Option<&str>) -> Result<Vec<String>> {
        let Some(week) = arg.and_then(|a| a.parse::<YearWeek>().ok()) else {
            return Ok(vec!["Usage: /showweekly <year-week>".to_string()]);
        };
        match self.db.get_week_estimates(week)? {
            Some(estimates) => Ok(vec![render_estimates(week, &estimates)]),
            None => Ok(vec![format!("No estimates found for week {}", week)]),
        }
    }

    fn cmd_showrecords(&mut self, arg: Option<&str>) -> Result<Vec<String>> {
        let Some(week) = arg.and_then(|a| a.parse::<YearWeek>().ok()) else {
            return Ok(vec!["Usage: /showrecords <year-week>".to_string()]);
        };
        let records = self.db.records_for_week(week)?;
        if records.is_empty() {
            return Ok(vec![format!("No records found for {}", week)]);
        }
        Ok(vec![render_records(week, &records)])
    }

    fn cmd_weekstats(&mut self, arg: Option<&str>) -> Result<Vec<String>> {
        // Parse before touching the store
        let Some(week) = arg.and_then(|a| a.parse::<YearWeek>().ok()) else {
            return Ok(vec!["Usage: /weekstats <year-week>".to_string()]);
        };
        let stats = self.db.week_stats(week)?;
        Ok(vec![render_week_stats(&stats)])
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn render_projection(projection: &Projection) -> String {
    let mut msg = format!("💵 Current balance: {}\n", projection.current_balance);
    msg.push_str(&format!(
        "\nProjection for the next {} weeks:\n",
        projection.weeks.len()
    ));
    for week in &projection.weeks {
        msg.push_str(&format!(
            "{}: {} ({}) -> balance {}\n",
            week.week, week.delta, week.source, week.balance
        ));
    }
    msg
}

pub fn render_estimates(week: YearWeek, estimates: &WeekEstimates) -> String {
    let mut msg = format!("Estimates for {}:\n\n", week);

    msg.push_str("💰 Incomes:\n");
    for (category, amount) in &estimates.incomes {
        msg.push_str(&format!("- {}: {}\n", category, amount));
    }

    msg.push_str("\n💸 Expenses:\n");
    for (category, amount) in &estimates.expenses {
        msg.push_str(&format!("- {}: {}\n", category, amount));
    }

    msg
}

pub fn render_records(week: YearWeek, records: &[Record]) -> String {
    // Group by day then category, summing amounts
    let mut days: BTreeMap<String, BTreeMap<&str, f64>> = BTreeMap::new();
    for r in records {
        let day = r.recorded_at.format("%d.%m").to_string();
        *days
            .entry(day)
            .or_default()
            .entry(r.category.as_str())
            .or_default() += r.amount;
    }

    let mut msg = format!("📒 Records for {}:\n\n", week);
    for (day, categories) in &days {
        msg.push_str(&format!("{}:\n", day));
        for (category, total) in categories {
            msg.push_str(&format!("  {}: {}\n", category, total));
        }
        msg.push('\n');
    }
    msg
}

pub fn render_week_stats(stats: &WeekStats) -> String {
    let mut msg = format!("📊 Stats for {}\n\n", stats.week);

    msg.push_str("💰 Incomes:\n");
    if stats.incomes.is_empty() {
        msg.push_str("None\n");
    }
    for diff in &stats.incomes {
        msg.push_str(&format!(
            "- {}: expected {}, real {}, diff {}\n",
            diff.category, diff.expected, diff.real, diff.diff
        ));
    }

    msg.push_str("\n💸 Expenses:\n");
    if stats.expenses.is_empty() {
        msg.push_str("None\n");
    }
    for diff in &stats.expenses {
        msg.push_str(&format!(
            "- {}: expected {}, real {}, diff {}\n",
            diff.category, diff.expected, diff.real, diff.diff
        ));
    }

    msg.push_str("\n📌 Totals:\n");
    msg.push_str(&format!(
        "Income: expected {}, real {}, diff {}\n",
        stats.income_totals.expected, stats.income_totals.real, stats.income_totals.diff
    ));
    msg.push_str(&format!(
        "Expense: expected {}, real {}, diff {}\n",
        stats.expense_totals.expected, stats.expense_totals.real, stats.expense_totals.diff
    ));
    msg.push_str(&format!(
        "Balance difference (real - expected): {}\n",
        stats.balance_diff
    ));

    msg
}

pub fn render_current_week(today: NaiveDate) -> String {
    let current = YearWeek::from_date(today);
    let mut msg = format!("Current week is {}\n\n", current);
    for w in weeks_of_month(today) {
        msg.push_str(&format!(
            "{} - {}    {}\n",
            w.start.format("%d.%m"),
            w.end.format("%d.%m"),
            w.week
        ));
    }
    msg
}
