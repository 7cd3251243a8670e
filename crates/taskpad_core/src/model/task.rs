//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by manager, renderer and FFI.
//! - Keep serde field names aligned with the persisted JSON layout.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `created_at` is set once at creation; `updated_at` refreshes on every
//!   mutation.
//! - Collection ordering is owned by the manager, not by the record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// View filter over the task collection.
///
/// Transient UI state, never persisted; a fresh session starts at `All`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Every task regardless of completion.
    #[default]
    All,
    /// Only tasks with `done == false`.
    Active,
    /// Only tasks with `done == true`.
    Done,
}

impl Filter {
    /// Parses the wire form used by the UI segment control.
    pub fn parse(value: &str) -> Option<Filter> {
        match value {
            "all" => Some(Filter::All),
            "active" => Some(Filter::Active),
            "done" => Some(Filter::Done),
            _ => None,
        }
    }

    /// Returns the wire form of this filter.
    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Done => "done",
        }
    }

    /// Returns whether a task is visible under this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.done,
            Filter::Done => task.done,
        }
    }
}

/// Canonical to-do record.
///
/// Serialized field names follow the persisted JSON layout (`dueAt`,
/// `createdAt`, `updatedAt`). Optional fields default on deserialization so
/// collections written by older app builds still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable global ID used for edit/delete/toggle addressing.
    pub id: TaskId,
    /// Display title; required, never empty after trimming.
    pub title: String,
    /// Free-form detail text; empty string when the user gave none.
    #[serde(default)]
    pub description: String,
    /// Unix epoch milliseconds; `None` means no due date.
    #[serde(default)]
    pub due_at: Option<i64>,
    /// Completion flag toggled by the checkbox, untouched by edits.
    #[serde(default)]
    pub done: bool,
    /// Unix epoch milliseconds, set once at creation.
    #[serde(default)]
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on every mutation.
    #[serde(default)]
    pub updated_at: i64,
}

impl Task {
    /// Creates a new task with a generated stable ID.
    ///
    /// # Invariants
    /// - `done` starts as `false`.
    /// - `created_at == updated_at == now_ms`.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_at: Option<i64>,
        now_ms: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            due_at,
            done: false,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}
