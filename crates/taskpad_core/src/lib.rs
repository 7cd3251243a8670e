//! Core domain logic for Taskpad.
//! This crate is the single source of truth for task-list invariants.

pub mod db;
pub mod logging;
pub mod manager;
pub mod model;
pub mod render;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use manager::{Summary, TaskListError, TaskListManager, TaskListResult};
pub use model::task::{Filter, Task, TaskId};
pub use render::{list_view, ListView, TaskRow};
pub use store::{
    MemoryPrefsStore, PrefsStore, SqlitePrefsStore, StoreError, StoreResult, TASKS_KEY,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
