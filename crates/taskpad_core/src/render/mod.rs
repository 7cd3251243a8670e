//! View projection for the task list.
//!
//! # Responsibility
//! - Project (visible tasks, summary) into display row descriptors.
//! - Escape every text field before it can reach a rendered surface.
//!
//! # Invariants
//! - Pure: no store access, no mutation, no clock reads beyond due-date
//!   formatting.
//! - `empty` reflects the filtered view, not the full collection.
//! - Title and description are always escaped; this contract is not
//!   optional.

use chrono::{Local, TimeZone};

use crate::manager::Summary;
use crate::model::task::Task;

/// One rendered list row, addressed by task id for edit/delete/toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// Task id in string form, used as the action handle.
    pub id: String,
    /// Escaped title text.
    pub title: String,
    /// Escaped description, `None` when the task has none.
    pub description: Option<String>,
    /// Local-time due label, `None` when absent or unrepresentable.
    pub due_label: Option<String>,
    /// Completion flag driving the strikethrough style.
    pub done: bool,
}

/// Full display model for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub rows: Vec<TaskRow>,
    /// Full collection size, regardless of filter.
    pub total: usize,
    /// Count of not-done tasks, regardless of filter.
    pub active: usize,
    /// True iff the filtered view shows nothing.
    pub empty: bool,
}

/// Builds the display model for the given visible tasks and counters.
pub fn list_view(visible: &[&Task], summary: Summary) -> ListView {
    let rows: Vec<TaskRow> = visible.iter().map(|task| task_row(task)).collect();
    let empty = rows.is_empty();
    ListView {
        rows,
        total: summary.total,
        active: summary.active,
        empty,
    }
}

fn task_row(task: &Task) -> TaskRow {
    let description = if task.description.is_empty() {
        None
    } else {
        Some(escape_text(&task.description))
    };

    TaskRow {
        id: task.id.to_string(),
        title: escape_text(&task.title),
        description,
        due_label: task.due_at.and_then(due_label),
        done: task.done,
    }
}

/// Formats an epoch-millisecond due instant in local time.
///
/// Returns `None` for timestamps chrono cannot represent or that map
/// ambiguously across a DST transition; the due line is then omitted
/// instead of failing the render.
pub fn due_label(due_at_ms: i64) -> Option<String> {
    Local
        .timestamp_millis_opt(due_at_ms)
        .single()
        .map(|instant| instant.format("%Y-%m-%d %H:%M").to_string())
}

/// Escapes markup metacharacters so user text stays inert in any surface.
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
