//! Key/value site settings.

use rusqlite::params;

use crate::{
    error::{DatabaseResultExt, Result},
    models::{SettingKey, Settings},
};

impl super::Database {
    /// Reads every stored setting over the defaults.
    pub fn get_settings(&self) -> Result<Settings> {
        let mut stmt = self
            .connection
            .prepare("SELECT key, value FROM settings")
            .db_context("Failed to prepare query")?;

        let pairs = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .db_context("Failed to query settings")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch settings")?;

        Ok(Settings::from_pairs(pairs))
    }

    /// Validates and stores one setting; returns the stored value.
    pub fn set_setting(&mut self, key: SettingKey, value: &str) -> Result<String> {
        let value = key.normalize(value)?;
        self.connection
            .execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key.as_str(), value],
            )
            .db_context("Failed to store setting")?;
        Ok(value)
    }
}
