//! SQLite-backed preferences store.
//!
//! # Responsibility
//! - Persist preference entries in the `prefs` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `set` is an upsert; the key stays unique.
//! - Values round-trip byte-for-byte as UTF-8 text.

use super::{PrefsStore, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

/// SQLite-backed preferences store over an open connection.
pub struct SqlitePrefsStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePrefsStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PrefsStore for SqlitePrefsStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM prefs WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO prefs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM prefs WHERE key = ?1;", params![key])?;
        Ok(())
    }
}
