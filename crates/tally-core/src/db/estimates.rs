//! Weekly estimate operations

use rusqlite::params;
use tracing::debug;

use super::Database;
use crate::error::Result;
use crate::models::{EstimateEntry, EstimateKind, WeekEstimates};
use crate::week::YearWeek;

impl Database {
    /// Upsert one (week, kind, category) estimate amount
    pub fn upsert_estimate(&self, entry: &EstimateEntry) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO week_estimates (year_week, kind, category, amount, updated_at)
            VALUES (?1, ?2, ?3, ?4, CURRENT_TIMESTAMP)
            ON CONFLICT(year_week, kind, category) DO UPDATE SET
                amount = excluded.amount,
                updated_at = CURRENT_TIMESTAMP
            "#,
            params![
                entry.week.to_string(),
                entry.kind.as_str(),
                entry.category,
                entry.amount,
            ],
        )?;
        debug!(
            week = %entry.week,
            kind = %entry.kind,
            category = %entry.category,
            amount = entry.amount,
            "Estimate upserted"
        );
        Ok(())
    }

    /// The estimate document for a week, or None when no estimates exist
    pub fn get_week_estimates(&self, week: YearWeek) -> Result<Option<WeekEstimates>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT kind, category, amount FROM week_estimates WHERE year_week = ?1",
        )?;

        let mut estimates = WeekEstimates::default();
        let rows = stmt.query_map(params![week.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?;

        for row in rows {
            let (kind, category, amount) = row?;
            match kind.as_str() {
                "income" => estimates.incomes.insert(category, amount),
                _ => estimates.expenses.insert(category, amount),
            };
        }

        Ok((!estimates.is_empty()).then_some(estimates))
    }

    /// Net estimate for a week (0 when no estimates exist)
    pub fn estimate_net(&self, week: YearWeek) -> Result<f64> {
        Ok(self
            .get_week_estimates(week)?
            .map(|e| e.net())
            .unwrap_or(0.0))
    }

    /// Convenience wrapper used by tests and the CLI's direct subcommand
    pub fn set_estimate(
        &self,
        week: YearWeek,
        kind: EstimateKind,
        category: &str,
        amount: f64,
    ) -> Result<()> {
        self.upsert_estimate(&EstimateEntry {
            week,
            kind,
            category: category.to_string(),
            amount,
        })
    }
}
