//! Report glue: fetch inputs and hand them to the aggregation engine

use chrono::NaiveDate;

use super::Database;
use crate::error::Result;
use crate::models::{Projection, WeekStats};
use crate::stats::{self, WeekOutlook};
use crate::week::YearWeek;

impl Database {
    /// Actual-vs-estimated statistics for one week
    pub fn week_stats(&self, week: YearWeek) -> Result<WeekStats> {
        let estimates = self.get_week_estimates(week)?;
        let records = self.records_for_week(week)?;
        Ok(stats::compute_week_stats(week, estimates.as_ref(), &records))
    }

    /// Balance projection over `horizon` week buckets starting at today's
    /// week. The current balance is the initial balance plus the sum of
    /// every record ever logged.
    pub fn balance_projection(&self, today: NaiveDate, horizon: usize) -> Result<Projection> {
        let (settings, _) = self.ensure_settings()?;
        let total_recorded = self.total_recorded()?;

        let mut outlooks = Vec::with_capacity(horizon);
        for week in stats::projection_weeks(today, horizon) {
            outlooks.push(WeekOutlook {
                week,
                actual: self.week_net(week)?,
                estimated: self.estimate_net(week)?,
            });
        }

        Ok(stats::project_balance(
            settings.initial_balance,
            total_recorded,
            &outlooks,
        ))
    }
}
