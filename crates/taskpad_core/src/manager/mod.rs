//! Task list state manager.
//!
//! # Responsibility
//! - Own the in-memory task collection and the current view filter.
//! - Coordinate write-through persistence after every mutation.
//!
//! # Invariants
//! - Task ids stay unique across the collection.
//! - Ordering is insertion order with the newest-created task first; edits
//!   preserve position, deletes remove in place.
//! - Every mutating operation issues exactly one store write, after the
//!   in-memory mutation; a failed write does not roll the mutation back.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::Utc;
use log::warn;

use crate::model::task::{Filter, Task, TaskId};
use crate::store::{PrefsStore, StoreError, TASKS_KEY};

pub type TaskListResult<T> = Result<T, TaskListError>;

/// Error surface for task list operations.
#[derive(Debug)]
pub enum TaskListError {
    /// Title trimmed to the empty string.
    EmptyTitle,
    /// Filter string is not one of `all|active|done`.
    InvalidFilter(String),
    /// No task carries the given id.
    NotFound(TaskId),
    /// The preferences store failed; in-memory state is kept as-is.
    Storage(StoreError),
}

impl Display for TaskListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::InvalidFilter(value) => {
                write!(f, "unknown filter `{value}`; expected all|active|done")
            }
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for TaskListError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}

/// Collection counters shown in the footer, independent of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Full collection size.
    pub total: usize,
    /// Tasks with `done == false`.
    pub active: usize,
}

/// Owns the task collection, the view filter and the persistence handle.
///
/// All state is instance-local; independent managers never share anything.
pub struct TaskListManager<S: PrefsStore> {
    store: S,
    tasks: Vec<Task>,
    filter: Filter,
}

impl<S: PrefsStore> TaskListManager<S> {
    /// Creates a manager with an empty collection and the `All` filter.
    pub fn new(store: S) -> Self {
        Self {
            store,
            tasks: Vec::new(),
            filter: Filter::default(),
        }
    }

    /// Loads the persisted collection, replacing the in-memory one.
    ///
    /// Missing key and unparsable payloads both degrade to an empty
    /// collection; this is the sole recovery path for corrupt storage.
    /// Store I/O failure is still surfaced as [`TaskListError::Storage`].
    pub fn load(&mut self) -> TaskListResult<&[Task]> {
        self.tasks = match self.store.get(TASKS_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<Task>>(&raw) {
                Ok(tasks) => tasks,
                Err(err) => {
                    warn!(
                        "event=tasks_load module=manager status=recovered error_code=parse_failed error={err}"
                    );
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        Ok(&self.tasks)
    }

    /// Creates a task and prepends it to the collection.
    ///
    /// # Contract
    /// - Fails with [`TaskListError::EmptyTitle`] when `title` trims empty,
    ///   leaving the collection unchanged.
    /// - The new task carries a fresh unique id, `done == false` and both
    ///   timestamps set to now.
    /// - Persists before returning; completion implies durability was
    ///   attempted.
    pub fn add(
        &mut self,
        title: &str,
        description: &str,
        due_at: Option<i64>,
    ) -> TaskListResult<Task> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskListError::EmptyTitle);
        }

        let task = Task::new(title, description.trim(), due_at, now_ms());
        self.tasks.insert(0, task.clone());
        self.persist()?;
        Ok(task)
    }

    /// Edits the task with `id` in place.
    ///
    /// # Contract
    /// - Fails with [`TaskListError::NotFound`] for an unknown id and with
    ///   [`TaskListError::EmptyTitle`] when the new title trims empty; either
    ///   way the collection is unchanged.
    /// - Preserves id, `created_at`, `done` and position; refreshes
    ///   `updated_at`. Only [`Self::toggle_done`] changes `done`.
    pub fn update(
        &mut self,
        id: TaskId,
        title: &str,
        description: &str,
        due_at: Option<i64>,
    ) -> TaskListResult<Task> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskListError::NotFound(id))?;

        let title = title.trim();
        if title.is_empty() {
            return Err(TaskListError::EmptyTitle);
        }

        let task = &mut self.tasks[index];
        task.title = title.to_string();
        task.description = description.trim().to_string();
        task.due_at = due_at;
        task.updated_at = now_ms();

        let updated = task.clone();
        self.persist()?;
        Ok(updated)
    }

    /// Removes the task with `id`; absent ids are a benign no-op.
    ///
    /// The resulting collection is persisted either way.
    pub fn remove(&mut self, id: TaskId) -> TaskListResult<()> {
        self.tasks.retain(|task| task.id != id);
        self.persist()
    }

    /// Sets the completion flag of the task with `id`.
    ///
    /// Fails with [`TaskListError::NotFound`] for an unknown id, which here
    /// signals a desynchronized UI rather than a benign race.
    pub fn toggle_done(&mut self, id: TaskId, done: bool) -> TaskListResult<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TaskListError::NotFound(id))?;

        task.done = done;
        task.updated_at = now_ms();

        let updated = task.clone();
        self.persist()?;
        Ok(updated)
    }

    /// Switches the view filter. Transient state, never persisted.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Switches the view filter from its wire form.
    ///
    /// Fails with [`TaskListError::InvalidFilter`] for unrecognized values.
    pub fn set_filter_value(&mut self, value: &str) -> TaskListResult<Filter> {
        let filter =
            Filter::parse(value).ok_or_else(|| TaskListError::InvalidFilter(value.to_string()))?;
        self.filter = filter;
        Ok(filter)
    }

    /// Returns the current view filter.
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Returns the full collection in its own order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the collection projected through the current filter.
    ///
    /// Ordering is the collection's own order; the filter never re-sorts.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    /// Returns footer counters over the full collection, ignoring the filter.
    pub fn summary(&self) -> Summary {
        Summary {
            total: self.tasks.len(),
            active: self.tasks.iter().filter(|task| !task.done).count(),
        }
    }

    fn persist(&self) -> TaskListResult<()> {
        let payload = serde_json::to_string(&self.tasks)
            .map_err(|err| StoreError::Backend(format!("task serialization failed: {err}")))?;
        self.store.set(TASKS_KEY, &payload)?;
        Ok(())
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
