//! Conversation wizards: linear multi-step data entry
//!
//! Each wizard is a fixed, one-path sequence of prompts. Every step
//! validates its input and either advances or re-prompts; the terminal
//! step yields the accumulated value for the caller to persist. The
//! wizards hold no database handle, so they stay trivially testable.

use chrono::NaiveDate;

use crate::models::{EstimateEntry, EstimateKind, NewRecord};
use crate::week::YearWeek;

/// Outcome of feeding one line of input to a wizard
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    /// Reply to send; the wizard stays active
    Continue(String),
    /// An estimate to upsert immediately, plus the reply; the wizard stays
    /// active waiting for "add more" or "done"
    SaveEstimate(EstimateEntry, String),
    /// The accumulated record, plus the reply; the wizard is finished
    SaveRecord(NewRecord, String),
    /// The wizard is finished (completed or aborted) with a final reply
    Finish(String),
}

fn amount_prompt_for_record() -> String {
    "Enter amount (use negative for expense, positive for income):".to_string()
}

fn week_prompt() -> String {
    "Use 'current' week or enter year-week (e.g. 2025-39):".to_string()
}

fn category_menu(categories: &[&str]) -> String {
    categories
        .iter()
        .map(|c| format!("- {}", c))
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Record wizard: amount -> category -> week
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum RecordStep {
    Amount,
    Category { amount: f64 },
    Week { amount: f64, category: String },
}

/// Wizard behind `/add`
#[derive(Debug)]
pub struct RecordWizard {
    user: Option<String>,
    step: RecordStep,
}

impl RecordWizard {
    /// Start the wizard, returning it together with the first prompt
    pub fn start(user: Option<String>) -> (Self, String) {
        (
            Self {
                user,
                step: RecordStep::Amount,
            },
            amount_prompt_for_record(),
        )
    }

    pub fn step(&mut self, input: &str, today: NaiveDate) -> StepResult {
        match &self.step {
            RecordStep::Amount => {
                let Ok(amount) = input.trim().parse::<f64>() else {
                    return StepResult::Continue("Please enter a valid number.".to_string());
                };
                self.step = RecordStep::Category { amount };
                StepResult::Continue(format!(
                    "Choose a category:\n{}",
                    category_menu(&crate::models::record_categories())
                ))
            }
            RecordStep::Category { amount } => {
                let amount = *amount;
                let category = input.trim().to_lowercase();

                let Some(kind) = EstimateKind::of_category(&category) else {
                    return StepResult::Continue("Please choose a valid category.".to_string());
                };

                if !kind.accepts_amount(amount) {
                    // Invalid domain combination aborts, it does not re-prompt
                    return StepResult::Finish(
                        "❌ Invalid combination of amount and category. Canceled.".to_string(),
                    );
                }

                self.step = RecordStep::Week { amount, category };
                StepResult::Continue(week_prompt())
            }
            RecordStep::Week { amount, category } => {
                let Ok(week) = YearWeek::resolve(input, today) else {
                    return StepResult::Continue(
                        "Invalid format. Use 'current' or 'YYYY-WW'.".to_string(),
                    );
                };

                let record = NewRecord {
                    user: self.user.clone(),
                    amount: *amount,
                    category: category.clone(),
                    week,
                };
                let reply = format!(
                    "✅ Added {} ({}) for week {}",
                    record.amount, record.category, week
                );
                StepResult::SaveRecord(record, reply)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Estimate wizard: week -> kind -> category -> amount -> (add more | done)
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum EstimateStep {
    Week,
    Kind { week: YearWeek },
    Category { week: YearWeek, kind: EstimateKind },
    Amount {
        week: YearWeek,
        kind: EstimateKind,
        category: String,
    },
    Continue { week: YearWeek },
}

/// Wizard behind `/setweekly`. Each accepted amount is handed back for an
/// immediate upsert, one category at a time.
#[derive(Debug)]
pub struct EstimateWizard {
    step: EstimateStep,
}

impl EstimateWizard {
    pub fn start() -> (Self, String) {
        (
            Self {
                step: EstimateStep::Week,
            },
            week_prompt(),
        )
    }

    pub fn step(&mut self, input: &str, today: NaiveDate) -> StepResult {
        match &self.step {
            EstimateStep::Week => {
                let Ok(week) = YearWeek::resolve(input, today) else {
                    return StepResult::Continue(
                        "❌ Invalid format. Use 'current' or 'YYYY-WW'.".to_string(),
                    );
                };
                self.step = EstimateStep::Kind { week };
                StepResult::Continue("Is this for income or expense?".to_string())
            }
            EstimateStep::Kind { week } => {
                let week = *week;
                let Ok(kind) = input.trim().to_lowercase().parse::<EstimateKind>() else {
                    return StepResult::Continue(
                        "❌ Please choose 'income' or 'expense'.".to_string(),
                    );
                };
                self.step = EstimateStep::Category { week, kind };
                StepResult::Continue(format!(
                    "Choose a category for {}:\n{}",
                    kind,
                    category_menu(kind.categories())
                ))
            }
            EstimateStep::Category { week, kind } => {
                let (week, kind) = (*week, *kind);
                let category = input.trim().to_lowercase();
                if !kind.categories().contains(&category.as_str()) {
                    return StepResult::Continue(
                        "❌ Invalid category, choose from the list.".to_string(),
                    );
                }
                self.step = EstimateStep::Amount {
                    week,
                    kind,
                    category,
                };
                StepResult::Continue(
                    "Enter amount (use + for income, - for expense):".to_string(),
                )
            }
            EstimateStep::Amount {
                week,
                kind,
                category,
            } => {
                let (week, kind) = (*week, *kind);
                let Ok(amount) = input.trim().parse::<f64>() else {
                    return StepResult::Continue("❌ Please enter a valid number.".to_string());
                };
                if !kind.accepts_amount(amount) {
                    let reply = match kind {
                        EstimateKind::Income => "❌ Income cannot be negative.",
                        EstimateKind::Expense => "❌ Expense must be negative.",
                    };
                    return StepResult::Continue(reply.to_string());
                }

                let entry = EstimateEntry {
                    week,
                    kind,
                    category: category.clone(),
                    amount,
                };
                self.step = EstimateStep::Continue { week };
                let reply = format!(
                    "✅ Set {} estimate for {} = {} in {}\nAdd more or finish? (add more / done)",
                    kind, entry.category, amount, week
                );
                StepResult::SaveEstimate(entry, reply)
            }
            EstimateStep::Continue { week } => {
                let week = *week;
                if input.trim().to_lowercase() == "add more" {
                    self.step = EstimateStep::Kind { week };
                    StepResult::Continue("Income or expense?".to_string())
                } else {
                    StepResult::Finish("✅ Weekly estimates updated. Finished.".to_string())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 24).unwrap() // ISO week 2025-09
    }

    fn expect_continue(result: StepResult) -> String {
        match result {
            StepResult::Continue(reply) => reply,
            other => panic!("expected Continue, got {:?}", other),
        }
    }

    #[test]
    fn record_wizard_happy_path() {
        let (mut wizard, prompt) = RecordWizard::start(Some("sam".to_string()));
        assert!(prompt.contains("amount"));

        expect_continue(wizard.step("-10", today()));
        expect_continue(wizard.step("groceries", today()));

        match wizard.step("2025-09", today()) {
            StepResult::SaveRecord(record, reply) => {
                assert_eq!(record.amount, -10.0);
                assert_eq!(record.category, "groceries");
                assert_eq!(record.week, YearWeek::new(2025, 9));
                assert_eq!(record.user.as_deref(), Some("sam"));
                assert!(reply.contains("2025-09"));
            }
            other => panic!("expected SaveRecord, got {:?}", other),
        }
    }

    #[test]
    fn record_wizard_current_week() {
        let (mut wizard, _) = RecordWizard::start(None);
        wizard.step("500", today());
        wizard.step("salary", today());

        match wizard.step("current", today()) {
            StepResult::SaveRecord(record, _) => {
                assert_eq!(record.week, YearWeek::new(2025, 9));
            }
            other => panic!("expected SaveRecord, got {:?}", other),
        }
    }

    #[test]
    fn record_wizard_reprompts_on_bad_amount() {
        let (mut wizard, _) = RecordWizard::start(None);
        let reply = expect_continue(wizard.step("abc", today()));
        assert!(reply.contains("valid number"));

        // Still on the amount step
        expect_continue(wizard.step("-10", today()));
    }

    #[test]
    fn record_wizard_reprompts_on_unknown_category() {
        let (mut wizard, _) = RecordWizard::start(None);
        wizard.step("-10", today());
        let reply = expect_continue(wizard.step("yachts", today()));
        assert!(reply.contains("valid category"));
    }

    #[test]
    fn record_wizard_aborts_on_sign_mismatch() {
        // Negative salary is an invalid combination, not a re-prompt
        let (mut wizard, _) = RecordWizard::start(None);
        wizard.step("-100", today());
        match wizard.step("salary", today()) {
            StepResult::Finish(reply) => assert!(reply.contains("Invalid combination")),
            other => panic!("expected Finish, got {:?}", other),
        }

        // Positive expense category is rejected the same way
        let (mut wizard, _) = RecordWizard::start(None);
        wizard.step("50", today());
        match wizard.step("groceries", today()) {
            StepResult::Finish(reply) => assert!(reply.contains("Invalid combination")),
            other => panic!("expected Finish, got {:?}", other),
        }
    }

    #[test]
    fn record_wizard_reprompts_on_bad_week() {
        let (mut wizard, _) = RecordWizard::start(None);
        wizard.step("-10", today());
        wizard.step("groceries", today());
        let reply = expect_continue(wizard.step("nope", today()));
        assert!(reply.contains("'current' or 'YYYY-WW'"));
    }

    #[test]
    fn estimate_wizard_happy_path_with_loop() {
        let (mut wizard, prompt) = EstimateWizard::start();
        assert!(prompt.contains("year-week"));

        expect_continue(wizard.step("2025-09", today()));
        expect_continue(wizard.step("income", today()));
        expect_continue(wizard.step("salary", today()));

        match wizard.step("1000", today()) {
            StepResult::SaveEstimate(entry, reply) => {
                assert_eq!(entry.week, YearWeek::new(2025, 9));
                assert_eq!(entry.kind, EstimateKind::Income);
                assert_eq!(entry.category, "salary");
                assert_eq!(entry.amount, 1000.0);
                assert!(reply.contains("Add more or finish?"));
            }
            other => panic!("expected SaveEstimate, got {:?}", other),
        }

        // Loop back to the kind step, same week
        expect_continue(wizard.step("add more", today()));
        expect_continue(wizard.step("expense", today()));
        expect_continue(wizard.step("rent", today()));

        match wizard.step("-500", today()) {
            StepResult::SaveEstimate(entry, _) => {
                assert_eq!(entry.week, YearWeek::new(2025, 9));
                assert_eq!(entry.kind, EstimateKind::Expense);
                assert_eq!(entry.amount, -500.0);
            }
            other => panic!("expected SaveEstimate, got {:?}", other),
        }

        match wizard.step("done", today()) {
            StepResult::Finish(reply) => assert!(reply.contains("Finished")),
            other => panic!("expected Finish, got {:?}", other),
        }
    }

    #[test]
    fn estimate_wizard_enforces_sign_rules() {
        let (mut wizard, _) = EstimateWizard::start();
        wizard.step("current", today());
        wizard.step("income", today());
        wizard.step("salary", today());

        let reply = expect_continue(wizard.step("-100", today()));
        assert!(reply.contains("Income cannot be negative"));

        // Re-prompted, the corrected amount goes through
        assert!(matches!(
            wizard.step("100", today()),
            StepResult::SaveEstimate(_, _)
        ));
    }

    #[test]
    fn estimate_wizard_rejects_expense_positive() {
        let (mut wizard, _) = EstimateWizard::start();
        wizard.step("current", today());
        wizard.step("expense", today());
        wizard.step("rent", today());

        let reply = expect_continue(wizard.step("500", today()));
        assert!(reply.contains("Expense must be negative"));
    }

    #[test]
    fn estimate_wizard_rejects_category_from_wrong_side() {
        let (mut wizard, _) = EstimateWizard::start();
        wizard.step("current", today());
        wizard.step("income", today());

        // groceries is an expense category
        let reply = expect_continue(wizard.step("groceries", today()));
        assert!(reply.contains("Invalid category"));
    }

    #[test]
    fn estimate_wizard_reprompts_on_bad_week_and_kind() {
        let (mut wizard, _) = EstimateWizard::start();
        let reply = expect_continue(wizard.step("week nine", today()));
        assert!(reply.contains("Invalid format"));

        expect_continue(wizard.step("2025-09", today()));
        let reply = expect_continue(wizard.step("savings", today()));
        assert!(reply.contains("'income' or 'expense'"));
    }
}
