//! Singleton settings document

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::Settings;

impl Database {
    /// Fetch the settings row, if it exists
    pub fn get_settings(&self) -> Result<Option<Settings>> {
        let conn = self.conn()?;
        let settings = conn
            .query_row(
                "SELECT initial_balance, updated_at FROM settings WHERE id = 1",
                [],
                |row| {
                    Ok(Settings {
                        initial_balance: row.get(0)?,
                        updated_at: parse_datetime(&row.get::<_, String>(1)?),
                    })
                },
            )
            .optional()?;
        Ok(settings)
    }

    /// Fetch settings, creating the default row (balance 0) on first access.
    ///
    /// Returns the settings and whether they were just created.
    pub fn ensure_settings(&self) -> Result<(Settings, bool)> {
        if let Some(settings) = self.get_settings()? {
            return Ok((settings, false));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO settings (id, initial_balance) VALUES (1, 0)",
            [],
        )?;
        info!("Created default settings with balance 0");

        let settings = self
            .get_settings()?
            .expect("settings row inserted above");
        Ok((settings, true))
    }

    /// Overwrite the initial balance (creates the row if missing)
    pub fn set_initial_balance(&self, amount: f64) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO settings (id, initial_balance, updated_at)
            VALUES (1, ?1, CURRENT_TIMESTAMP)
            ON CONFLICT(id) DO UPDATE SET
                initial_balance = excluded.initial_balance,
                updated_at = CURRENT_TIMESTAMP
            "#,
            params![amount],
        )?;
        info!(amount, "Initial balance updated");
        Ok(())
    }
}
