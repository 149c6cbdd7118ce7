//! Aggregation engine: week statistics and balance projection
//!
//! Pure reductions over in-memory collections; fetching the inputs is the
//! storage layer's job (`Database::week_stats`, `Database::balance_projection`).
//! Everything here is deterministic given its inputs.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::models::{
    CategoryDiff, DeltaSource, Projection, ProjectedWeek, Record, SectionTotals, WeekEstimates,
    WeekStats,
};
use crate::week::YearWeek;

/// Default number of week buckets in a balance projection, current week included
pub const PROJECTION_WEEKS: usize = 4;

/// Compare a week's estimates against its actual records.
///
/// For each section the category set is the union of categories present in
/// the estimate map and categories of matching-sign records (income >= 0,
/// expense < 0). A missing estimate document or an empty record set reads
/// as all zeros, never an error.
pub fn compute_week_stats(
    week: YearWeek,
    estimates: Option<&WeekEstimates>,
    records: &[Record],
) -> WeekStats {
    let empty = WeekEstimates::default();
    let estimates = estimates.unwrap_or(&empty);

    let mut real_incomes: BTreeMap<String, f64> = BTreeMap::new();
    let mut real_expenses: BTreeMap<String, f64> = BTreeMap::new();
    for r in records {
        let section = if r.amount >= 0.0 {
            &mut real_incomes
        } else {
            &mut real_expenses
        };
        *section.entry(r.category.clone()).or_default() += r.amount;
    }

    let incomes = section_diffs(&estimates.incomes, &real_incomes);
    let expenses = section_diffs(&estimates.expenses, &real_expenses);
    let income_totals = section_totals(&incomes);
    let expense_totals = section_totals(&expenses);

    let balance_diff = (income_totals.real + expense_totals.real)
        - (income_totals.expected + expense_totals.expected);

    WeekStats {
        week,
        incomes,
        expenses,
        income_totals,
        expense_totals,
        balance_diff,
    }
}

/// Per-category diffs over the union of estimated and actual categories
fn section_diffs(
    expected: &BTreeMap<String, f64>,
    real: &BTreeMap<String, f64>,
) -> Vec<CategoryDiff> {
    let mut categories: Vec<&String> = expected.keys().chain(real.keys()).collect();
    categories.sort();
    categories.dedup();

    categories
        .into_iter()
        .map(|category| {
            let e = expected.get(category).copied().unwrap_or(0.0);
            let r = real.get(category).copied().unwrap_or(0.0);
            CategoryDiff {
                category: category.clone(),
                expected: e,
                real: r,
                diff: r - e,
            }
        })
        .collect()
}

fn section_totals(diffs: &[CategoryDiff]) -> SectionTotals {
    let expected = diffs.iter().map(|d| d.expected).sum::<f64>();
    let real = diffs.iter().map(|d| d.real).sum::<f64>();
    SectionTotals {
        expected,
        real,
        diff: real - expected,
    }
}

/// Known facts about one upcoming week, assembled by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct WeekOutlook {
    pub week: YearWeek,
    /// Net sum of the week's actual records, if the week has any records
    /// at all. All-or-nothing: one record on either side counts.
    pub actual: Option<f64>,
    /// The week's estimate net (expenses stored negative)
    pub estimated: f64,
}

/// The week buckets a projection covers: today's week plus the following
/// ones, found by stepping 7 days at a time
pub fn projection_weeks(today: NaiveDate, horizon: usize) -> Vec<YearWeek> {
    (0..horizon)
        .map(|i| YearWeek::from_date(today + Days::new(7 * i as u64)))
        .collect()
}

/// Project the balance forward.
///
/// `total_recorded` is the sum of every record ever logged, with no time
/// filter; the current balance deliberately mirrors the original system's
/// cumulative total. Each week then contributes its actual net when the
/// week has records, and its estimate net otherwise, accumulating into a
/// running balance.
pub fn project_balance(
    initial_balance: f64,
    total_recorded: f64,
    outlooks: &[WeekOutlook],
) -> Projection {
    let current_balance = initial_balance + total_recorded;

    let mut running = current_balance;
    let weeks = outlooks
        .iter()
        .map(|o| {
            let (delta, source) = match o.actual {
                Some(net) => (net, DeltaSource::Real),
                None => (o.estimated, DeltaSource::Est),
            };
            running += delta;
            ProjectedWeek {
                week: o.week,
                delta,
                source,
                balance: running,
            }
        })
        .collect();

    Projection {
        current_balance,
        weeks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn record(amount: f64, category: &str) -> Record {
        Record {
            id: 0,
            user: None,
            amount,
            category: category.to_string(),
            recorded_at: Utc.with_ymd_and_hms(2025, 2, 24, 12, 0, 0).unwrap(),
            week: YearWeek::new(2025, 9),
        }
    }

    fn estimates(incomes: &[(&str, f64)], expenses: &[(&str, f64)]) -> WeekEstimates {
        WeekEstimates {
            incomes: incomes
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            expenses: expenses
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }

    #[test]
    fn category_union_covers_both_sources() {
        let est = estimates(&[("salary", 1000.0)], &[("rent", -500.0)]);
        let records = vec![record(50.0, "tips"), record(-30.0, "groceries")];

        let stats = compute_week_stats(YearWeek::new(2025, 9), Some(&est), &records);

        let income_cats: Vec<&str> =
            stats.incomes.iter().map(|d| d.category.as_str()).collect();
        assert_eq!(income_cats, vec!["salary", "tips"]);

        let expense_cats: Vec<&str> =
            stats.expenses.iter().map(|d| d.category.as_str()).collect();
        assert_eq!(expense_cats, vec!["groceries", "rent"]);
    }

    #[test]
    fn diff_is_real_minus_expected() {
        let est = estimates(&[("salary", 1000.0)], &[]);
        let stats = compute_week_stats(YearWeek::new(2025, 9), Some(&est), &[]);

        assert_eq!(stats.incomes.len(), 1);
        let salary = &stats.incomes[0];
        assert_eq!(salary.expected, 1000.0);
        assert_eq!(salary.real, 0.0);
        assert_eq!(salary.diff, -1000.0);
        assert_eq!(stats.balance_diff, -1000.0);
    }

    #[test]
    fn records_of_same_category_are_summed() {
        let records = vec![
            record(-10.0, "groceries"),
            record(-25.5, "groceries"),
            record(100.0, "salary"),
        ];
        let stats = compute_week_stats(YearWeek::new(2025, 9), None, &records);

        let groceries = stats
            .expenses
            .iter()
            .find(|d| d.category == "groceries")
            .unwrap();
        assert_eq!(groceries.real, -35.5);
        assert_eq!(groceries.expected, 0.0);
        assert_eq!(groceries.diff, -35.5);
        assert_eq!(stats.income_totals.real, 100.0);
        assert_eq!(stats.expense_totals.real, -35.5);
    }

    #[test]
    fn missing_inputs_read_as_zero() {
        let stats = compute_week_stats(YearWeek::new(2025, 9), None, &[]);
        assert!(stats.incomes.is_empty());
        assert!(stats.expenses.is_empty());
        assert_eq!(stats.balance_diff, 0.0);
    }

    #[test]
    fn totals_and_balance_diff() {
        let est = estimates(&[("salary", 1000.0)], &[("rent", -500.0), ("groceries", -100.0)]);
        let records = vec![record(900.0, "salary"), record(-450.0, "rent")];
        let stats = compute_week_stats(YearWeek::new(2025, 9), Some(&est), &records);

        assert_eq!(stats.income_totals.expected, 1000.0);
        assert_eq!(stats.income_totals.real, 900.0);
        assert_eq!(stats.income_totals.diff, -100.0);
        assert_eq!(stats.expense_totals.expected, -600.0);
        assert_eq!(stats.expense_totals.real, -450.0);
        assert_eq!(stats.expense_totals.diff, 150.0);
        // (900 - 450) - (1000 - 600)
        assert_eq!(stats.balance_diff, 50.0);
    }

    #[test]
    fn projection_weeks_step_by_seven_days() {
        let today = NaiveDate::from_ymd_opt(2025, 2, 24).unwrap();
        let weeks = projection_weeks(today, 4);
        assert_eq!(
            weeks,
            vec![
                YearWeek::new(2025, 9),
                YearWeek::new(2025, 10),
                YearWeek::new(2025, 11),
                YearWeek::new(2025, 12),
            ]
        );
    }

    #[test]
    fn projection_weeks_cross_year_boundary() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 22).unwrap();
        let weeks = projection_weeks(today, 3);
        assert_eq!(weeks[0], YearWeek::new(2025, 52));
        assert_eq!(weeks[1], YearWeek::new(2026, 1));
        assert_eq!(weeks[2], YearWeek::new(2026, 2));
    }

    #[test]
    fn real_weeks_take_precedence_over_estimates() {
        let outlooks = vec![
            WeekOutlook {
                week: YearWeek::new(2025, 9),
                actual: Some(-120.0),
                estimated: 400.0,
            },
            WeekOutlook {
                week: YearWeek::new(2025, 10),
                actual: None,
                estimated: 400.0,
            },
        ];

        let projection = project_balance(1000.0, -120.0, &outlooks);

        assert_eq!(projection.current_balance, 880.0);
        assert_eq!(projection.weeks[0].delta, -120.0);
        assert_eq!(projection.weeks[0].source, DeltaSource::Real);
        assert_eq!(projection.weeks[0].balance, 760.0);
        assert_eq!(projection.weeks[1].delta, 400.0);
        assert_eq!(projection.weeks[1].source, DeltaSource::Est);
        assert_eq!(projection.weeks[1].balance, 1160.0);
    }

    #[test]
    fn projection_is_idempotent() {
        let outlooks = vec![
            WeekOutlook {
                week: YearWeek::new(2025, 9),
                actual: None,
                estimated: 250.0,
            },
            WeekOutlook {
                week: YearWeek::new(2025, 10),
                actual: Some(10.0),
                estimated: 0.0,
            },
        ];

        let a = project_balance(50.0, 10.0, &outlooks);
        let b = project_balance(50.0, 10.0, &outlooks);
        assert_eq!(a.current_balance, b.current_balance);
        assert_eq!(a.weeks, b.weeks);
    }

    #[test]
    fn empty_outlooks_yield_only_current_balance() {
        let projection = project_balance(100.0, 25.0, &[]);
        assert_eq!(projection.current_balance, 125.0);
        assert!(projection.weeks.is_empty());
    }
}
