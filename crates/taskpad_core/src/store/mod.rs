//! Preferences store contracts.
//!
//! # Responsibility
//! - Define the key-value boundary the task list persists through.
//! - Provide an in-memory implementation for tests and ephemeral embedding.
//!
//! # Invariants
//! - The whole task collection lives under the single key [`TASKS_KEY`];
//!   there are no per-task entries.
//! - The store moves opaque strings; serialization stays with the caller.

use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::db::DbError;

mod sqlite;

pub use sqlite::SqlitePrefsStore;

/// Fixed namespaced key holding the serialized task collection.
pub const TASKS_KEY: &str = "tasks_v1";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error surface for preference store operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Backend(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "store backend failure: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Dumb string key-value store the task list persists through.
///
/// Mirrors the platform preferences plugin surface: get, set, remove.
pub trait PrefsStore {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Writes (or overwrites) the value under `key`.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Deletes the entry; absent keys are not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: PrefsStore + ?Sized> PrefsStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// In-memory preferences store.
///
/// Backs tests and short-lived embeddings the same way an in-memory SQLite
/// connection does for the file-backed store.
#[derive(Debug, Default)]
pub struct MemoryPrefsStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryPrefsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
