//! Domain models for Tally

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::week::YearWeek;

/// Categories a positive (income) record or estimate may use
pub const INCOME_CATEGORIES: &[&str] = &["salary", "tips", "bonus"];

/// Categories a negative (expense) record or estimate may use
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "groceries",
    "rent",
    "travels",
    "supplies",
    "subscription",
    "party",
    "other",
];

/// Every category a record may use: both sides of the ledger
pub fn record_categories() -> Vec<&'static str> {
    INCOME_CATEGORIES
        .iter()
        .chain(EXPENSE_CATEGORIES)
        .copied()
        .collect()
}

/// Whether an estimate (or a record's category) is on the income or
/// expense side of the ledger. The two category sets are disjoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateKind {
    Income,
    Expense,
}

impl EstimateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// The fixed category set for this kind
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            Self::Income => INCOME_CATEGORIES,
            Self::Expense => EXPENSE_CATEGORIES,
        }
    }

    /// Look up which side of the ledger a category belongs to
    pub fn of_category(category: &str) -> Option<Self> {
        if INCOME_CATEGORIES.contains(&category) {
            Some(Self::Income)
        } else if EXPENSE_CATEGORIES.contains(&category) {
            Some(Self::Expense)
        } else {
            None
        }
    }

    /// Sign rule for this kind: income amounts must be >= 0,
    /// expense amounts must be <= 0
    pub fn accepts_amount(&self, amount: f64) -> bool {
        match self {
            Self::Income => amount >= 0.0,
            Self::Expense => amount <= 0.0,
        }
    }
}

impl std::str::FromStr for EstimateKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown kind: {} (use income or expense)", s)),
        }
    }
}

impl std::fmt::Display for EstimateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Singleton settings document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub initial_balance: f64,
    pub updated_at: DateTime<Utc>,
}

/// A logged transaction. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    /// Who entered it; attribution only, all users share one ledger
    pub user: Option<String>,
    /// Signed: positive income, negative expense
    pub amount: f64,
    pub category: String,
    pub recorded_at: DateTime<Utc>,
    pub week: YearWeek,
}

/// A record about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub user: Option<String>,
    pub amount: f64,
    pub category: String,
    pub week: YearWeek,
}

/// One incremental estimate upsert: a single (week, kind, category) amount
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateEntry {
    pub week: YearWeek,
    pub kind: EstimateKind,
    pub category: String,
    pub amount: f64,
}

/// Per-week expected amounts, one map per ledger side.
/// Expense amounts are stored negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekEstimates {
    pub incomes: BTreeMap<String, f64>,
    pub expenses: BTreeMap<String, f64>,
}

impl WeekEstimates {
    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty()
    }

    /// Expected net for the week: income total plus (negative) expense total
    pub fn net(&self) -> f64 {
        self.incomes.values().sum::<f64>() + self.expenses.values().sum::<f64>()
    }
}

/// Expected vs. actual amounts for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDiff {
    pub category: String,
    pub expected: f64,
    pub real: f64,
    /// real - expected
    pub diff: f64,
}

/// Totals over one section (income or expense) of a week
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionTotals {
    pub expected: f64,
    pub real: f64,
    pub diff: f64,
}

/// Actual-vs-estimated comparison for one week
#[derive(Debug, Clone, Serialize)]
pub struct WeekStats {
    pub week: YearWeek,
    pub incomes: Vec<CategoryDiff>,
    pub expenses: Vec<CategoryDiff>,
    pub income_totals: SectionTotals,
    pub expense_totals: SectionTotals,
    /// (real income + real expense) - (expected income + expected expense)
    pub balance_diff: f64,
}

/// Where a projected week's delta came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaSource {
    /// Actual records existed for the week
    Real,
    /// No records; fell back to the week's estimate net
    Est,
}

impl DeltaSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Real => "real",
            Self::Est => "est",
        }
    }
}

impl std::fmt::Display for DeltaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One week of a balance projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedWeek {
    pub week: YearWeek,
    pub delta: f64,
    pub source: DeltaSource,
    /// Running balance after applying this week's delta
    pub balance: f64,
}

/// Forward balance projection
#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    /// Initial balance plus the sum of every record ever logged
    pub current_balance: f64,
    pub weeks: Vec<ProjectedWeek>,
}
