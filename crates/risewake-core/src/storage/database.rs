//! SQLite-backed local persistence.
//!
//! Provides:
//! - a key-value store holding the serialized progression snapshot and
//!   sleep-tracker state
//! - a wake-event history table for CLI stats output

use chrono::NaiveDate;
use indoc::indoc;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;

/// Kv key under which the serialized [`ProgressionState`] lives.
///
/// [`ProgressionState`]: crate::engine::ProgressionState
pub const PROGRESSION_KEY: &str = "progression_state";

/// Kv key for the serialized sleep epoch tracker.
pub const SLEEP_TRACKER_KEY: &str = "sleep_tracker";

/// One recorded wake event, as stored in the history table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WakeEventRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub challenge: String,
    pub snoozes_used: u32,
    pub xp_earned: u64,
    pub coins_earned: u64,
    pub wake_score: u8,
}

/// SQLite database for progression storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/risewake/risewake.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("risewake.db");
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open a database at an explicit path (tests use a tempdir).
    pub fn open_at(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, Box<dyn std::error::Error>> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(indoc! {"
            CREATE TABLE IF NOT EXISTS wake_events (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                date         TEXT NOT NULL,
                challenge    TEXT NOT NULL,
                snoozes_used INTEGER NOT NULL,
                xp_earned    INTEGER NOT NULL,
                coins_earned INTEGER NOT NULL,
                wake_score   INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_wake_events_date ON wake_events(date);
        "})?;
        Ok(())
    }

    /// Record one wake event to the history table.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_wake_event(
        &self,
        date: NaiveDate,
        challenge: &str,
        snoozes_used: u32,
        xp_earned: u64,
        coins_earned: u64,
        wake_score: u8,
    ) -> Result<i64, rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO wake_events (date, challenge, snoozes_used, xp_earned, coins_earned, wake_score)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                date.format("%Y-%m-%d").to_string(),
                challenge,
                snoozes_used,
                xp_earned,
                coins_earned,
                wake_score,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent wake events, newest first.
    pub fn recent_wake_events(&self, limit: u32) -> Result<Vec<WakeEventRecord>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, challenge, snoozes_used, xp_earned, coins_earned, wake_score
             FROM wake_events ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            let date_str: String = row.get(1)?;
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            Ok(WakeEventRecord {
                id: row.get(0)?,
                date,
                challenge: row.get(2)?,
                snoozes_used: row.get(3)?,
                xp_earned: row.get(4)?,
                coins_earned: row.get(5)?,
                wake_score: row.get(6)?,
            })
        })?;
        rows.collect()
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_query_wake_events() {
        let db = Database::open_memory().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        db.record_wake_event(date, "math", 0, 25, 10, 86).unwrap();
        db.record_wake_event(date, "shake", 1, 20, 8, 70).unwrap();

        let events = db.recent_wake_events(10).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].challenge, "shake");
        assert_eq!(events[1].wake_score, 86);
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }
}
