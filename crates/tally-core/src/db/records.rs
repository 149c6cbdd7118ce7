//! Record operations

use rusqlite::params;
use tracing::debug;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewRecord, Record};
use crate::week::YearWeek;

impl Database {
    /// Append a record, returning its id
    pub fn insert_record(&self, record: &NewRecord) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO records (user, amount, category, year, week)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                record.user,
                record.amount,
                record.category,
                record.week.year,
                record.week.week,
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!(
            id,
            amount = record.amount,
            category = %record.category,
            week = %record.week,
            "Record inserted"
        );
        Ok(id)
    }

    /// All records in a week bucket, oldest first
    pub fn records_for_week(&self, week: YearWeek) -> Result<Vec<Record>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user, amount, category, recorded_at
            FROM records
            WHERE year = ?1 AND week = ?2
            ORDER BY recorded_at, id
            "#,
        )?;

        let records = stmt
            .query_map(params![week.year, week.week], |row| {
                Ok(Record {
                    id: row.get(0)?,
                    user: row.get(1)?,
                    amount: row.get(2)?,
                    category: row.get(3)?,
                    recorded_at: parse_datetime(&row.get::<_, String>(4)?),
                    week,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// Net sum of a week's records, or None when the bucket is empty.
    ///
    /// All-or-nothing: a single record on either side of the ledger makes
    /// the week "real" for projection purposes.
    pub fn week_net(&self, week: YearWeek) -> Result<Option<f64>> {
        let conn = self.conn()?;
        let (count, net): (i64, f64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(amount), 0) FROM records WHERE year = ?1 AND week = ?2",
            params![week.year, week.week],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok((count > 0).then_some(net))
    }

    /// Sum of every record ever logged, with no time filter
    pub fn total_recorded(&self) -> Result<f64> {
        let conn = self.conn()?;
        let total: f64 =
            conn.query_row("SELECT COALESCE(SUM(amount), 0) FROM records", [], |row| {
                row.get(0)
            })?;
        Ok(total)
    }
}
