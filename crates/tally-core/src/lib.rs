//! Tally Core Library
//!
//! Shared functionality for the Tally weekly budget tracker:
//! - SQLite storage for settings, records and weekly estimates
//! - ISO year-week arithmetic and month calendar helpers
//! - Aggregation engine: week statistics and balance projection
//! - Linear conversation wizards for structured data entry
//! - Chat command router mapping message text to reply text

pub mod chat;
pub mod db;
pub mod error;
pub mod models;
pub mod stats;
pub mod week;
pub mod wizard;

pub use chat::ChatSession;
pub use db::Database;
pub use error::{Error, Result};
pub use models::{
    CategoryDiff, DeltaSource, EstimateEntry, EstimateKind, NewRecord, Projection, ProjectedWeek,
    Record, SectionTotals, Settings, WeekEstimates, WeekStats, EXPENSE_CATEGORIES,
    INCOME_CATEGORIES,
};
pub use stats::{compute_week_stats, project_balance, WeekOutlook, PROJECTION_WEEKS};
pub use week::{weeks_of_month, MonthWeek, YearWeek};
pub use wizard::{EstimateWizard, RecordWizard, StepResult};
