//! FFI use-case API for the mobile UI.
//!
//! # Responsibility
//! - Expose the task-list interaction commands to Dart via FRB.
//! - Keep error semantics simple for the UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each command is one discrete user gesture: open store, load, apply one
//!   operation, persist. Callers dispatch gestures one at a time.

use taskpad_core::db::open_db;
use taskpad_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, list_view,
    ping as ping_inner, SqlitePrefsStore, TaskListError, TaskListManager,
};
use log::error;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use uuid::Uuid;

const TASKS_DB_FILE_NAME: &str = "taskpad.sqlite3";
static TASKS_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Configures the directory holding the task store database.
///
/// Input semantics:
/// - `db_dir`: absolute directory path, typically the app documents
///   directory handed over by the platform.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Safe to call repeatedly with the same directory (idempotent).
/// - Reconfiguration attempts with a different directory return an error.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_store(db_dir: String) -> String {
    match configure_db_path(db_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

fn configure_db_path(db_dir: &str) -> Result<(), String> {
    let trimmed = db_dir.trim();
    if trimmed.is_empty() {
        return Err("db_dir cannot be empty".to_string());
    }
    let dir = Path::new(trimmed);
    if !dir.is_absolute() {
        return Err(format!("db_dir must be an absolute path, got `{trimmed}`"));
    }

    let db_path = dir.join(TASKS_DB_FILE_NAME);
    let active = TASKS_DB_PATH.get_or_init(|| db_path.clone());
    if *active != db_path {
        return Err(format!(
            "task store already initialized at `{}`; refusing to switch to `{}`",
            active.display(),
            db_path.display()
        ));
    }
    Ok(())
}

/// One task row prepared for list display.
///
/// Text fields arrive already escaped; the UI may embed them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRowDto {
    /// Stable task ID in string form; the handle for edit/delete/toggle.
    pub id: String,
    /// Escaped title text.
    pub title: String,
    /// Escaped description, absent when the task has none.
    pub description: Option<String>,
    /// Local-time due label, absent when no due date is set.
    pub due_label: Option<String>,
    /// Completion flag for the strikethrough style.
    pub done: bool,
}

/// List response envelope for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Rows visible under the requested filter, newest first.
    pub items: Vec<TaskRowDto>,
    /// Full collection size, regardless of filter.
    pub total: u32,
    /// Count of not-done tasks, regardless of filter.
    pub active: u32,
    /// True iff the filtered view shows nothing.
    pub empty: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskListResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            active: 0,
            empty: true,
            message: message.into(),
        }
    }
}

/// Generic action response envelope for mutating commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Affected task ID, when one exists.
    pub task_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: String) -> Self {
        Self {
            ok: true,
            task_id: Some(task_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Lists tasks visible under the given filter.
///
/// Input semantics:
/// - `filter`: one of `all|active|done`.
///
/// # FFI contract
/// - Sync call, store-backed execution.
/// - Never panics.
/// - Unknown filter values return a failure envelope, not an exception.
#[flutter_rust_bridge::frb(sync)]
pub fn list_tasks(filter: String) -> TaskListResponse {
    let view = with_manager(|manager| {
        manager.set_filter_value(filter.trim())?;
        Ok(list_view(&manager.visible_tasks(), manager.summary()))
    });

    match view {
        Ok(view) => {
            let items = view
                .rows
                .into_iter()
                .map(|row| TaskRowDto {
                    id: row.id,
                    title: row.title,
                    description: row.description,
                    due_label: row.due_label,
                    done: row.done,
                })
                .collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No tasks.".to_string()
            } else {
                format!("{} task(s).", items.len())
            };
            TaskListResponse {
                items,
                total: view.total as u32,
                active: view.active as u32,
                empty: view.empty,
                message,
            }
        }
        Err(err) => TaskListResponse::failure(format!("list_tasks failed: {err}")),
    }
}

/// Creates a task from the add-modal save gesture.
///
/// # FFI contract
/// - Sync call, store-backed execution.
/// - Never panics.
/// - Empty titles return a failure envelope; nothing is written.
#[flutter_rust_bridge::frb(sync)]
pub fn add_task(title: String, description: String, due_at_ms: Option<i64>) -> TaskActionResponse {
    match with_manager(|manager| manager.add(&title, &description, due_at_ms)) {
        Ok(task) => TaskActionResponse::success("Task created.", task.id.to_string()),
        Err(err) => TaskActionResponse::failure(format!("add_task failed: {err}")),
    }
}

/// Edits an existing task from the edit-modal save gesture.
///
/// Leaves the completion flag untouched; only [`toggle_task`] changes it.
///
/// # FFI contract
/// - Sync call, store-backed execution.
/// - Never panics.
/// - Unknown ids and empty titles return failure envelopes.
#[flutter_rust_bridge::frb(sync)]
pub fn update_task(
    id: String,
    title: String,
    description: String,
    due_at_ms: Option<i64>,
) -> TaskActionResponse {
    let task_id = match parse_task_id(&id) {
        Ok(task_id) => task_id,
        Err(message) => return TaskActionResponse::failure(message),
    };
    match with_manager(|manager| manager.update(task_id, &title, &description, due_at_ms)) {
        Ok(task) => TaskActionResponse::success("Task updated.", task.id.to_string()),
        Err(err) => TaskActionResponse::failure(format!("update_task failed: {err}")),
    }
}

/// Deletes a task; absent ids succeed as a no-op.
///
/// # FFI contract
/// - Sync call, store-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_task(id: String) -> TaskActionResponse {
    let task_id = match parse_task_id(&id) {
        Ok(task_id) => task_id,
        Err(message) => return TaskActionResponse::failure(message),
    };
    match with_manager(|manager| manager.remove(task_id)) {
        Ok(()) => TaskActionResponse::success("Task deleted.", task_id.to_string()),
        Err(err) => TaskActionResponse::failure(format!("delete_task failed: {err}")),
    }
}

/// Sets the completion flag from the checkbox gesture.
///
/// # FFI contract
/// - Sync call, store-backed execution.
/// - Never panics.
/// - Unknown ids return a failure envelope (signals a desynchronized UI).
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_task(id: String, done: bool) -> TaskActionResponse {
    let task_id = match parse_task_id(&id) {
        Ok(task_id) => task_id,
        Err(message) => return TaskActionResponse::failure(message),
    };
    match with_manager(|manager| manager.toggle_done(task_id, done)) {
        Ok(task) => TaskActionResponse::success("Task toggled.", task.id.to_string()),
        Err(err) => TaskActionResponse::failure(format!("toggle_task failed: {err}")),
    }
}

fn parse_task_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid task id `{raw}`"))
}

fn resolve_db_path() -> PathBuf {
    TASKS_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("TASKPAD_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(TASKS_DB_FILE_NAME)
        })
        .clone()
}

fn with_manager<T>(
    f: impl FnOnce(&mut TaskListManager<SqlitePrefsStore<'_>>) -> Result<T, TaskListError>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        error!("event=store_open module=ffi status=error error={err}");
        format!("task DB open failed: {err}")
    })?;
    let store = SqlitePrefsStore::new(&conn);
    let mut manager = TaskListManager::new(store);
    manager.load().map_err(|err| err.to_string())?;
    f(&mut manager).map_err(|err| err.to_string())
}
