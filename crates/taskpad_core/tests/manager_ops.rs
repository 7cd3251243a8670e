use std::collections::HashSet;

use taskpad_core::{
    MemoryPrefsStore, PrefsStore, StoreError, StoreResult, Task, TaskListError, TaskListManager,
    TASKS_KEY,
};
use uuid::Uuid;

/// Store double that accepts reads but refuses every write.
struct WriteRefusedStore;

impl PrefsStore for WriteRefusedStore {
    fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Backend("write refused".to_string()))
    }

    fn remove(&self, _key: &str) -> StoreResult<()> {
        Err(StoreError::Backend("write refused".to_string()))
    }
}

/// Store double whose reads fail outright.
struct ReadRefusedStore;

impl PrefsStore for ReadRefusedStore {
    fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Backend("read refused".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> StoreResult<()> {
        Ok(())
    }
}

fn persisted_tasks(store: &MemoryPrefsStore) -> Vec<Task> {
    let raw = store
        .get(TASKS_KEY)
        .unwrap()
        .expect("collection should be persisted");
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn add_prepends_newest_first() {
    let store = MemoryPrefsStore::new();
    let mut manager = TaskListManager::new(&store);

    let first = manager.add("Buy milk", "", None).unwrap();
    let second = manager.add("Walk dog", "", None).unwrap();

    let tasks = manager.tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, second.id);
    assert_eq!(tasks[1].id, first.id);
    assert!(!first.done);
    assert_eq!(first.created_at, first.updated_at);
}

#[test]
fn add_rejects_empty_and_whitespace_title() {
    let store = MemoryPrefsStore::new();
    let mut manager = TaskListManager::new(&store);

    assert!(matches!(
        manager.add("", "detail", None),
        Err(TaskListError::EmptyTitle)
    ));
    assert!(matches!(
        manager.add("   ", "detail", None),
        Err(TaskListError::EmptyTitle)
    ));
    assert!(manager.tasks().is_empty());
    assert!(store.get(TASKS_KEY).unwrap().is_none());
}

#[test]
fn add_trims_title_and_description() {
    let store = MemoryPrefsStore::new();
    let mut manager = TaskListManager::new(&store);

    let task = manager.add("  Buy milk  ", "  2 liters  ", None).unwrap();
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, "2 liters");
}

#[test]
fn update_edits_in_place_preserving_identity_and_position() {
    let store = MemoryPrefsStore::new();
    let mut manager = TaskListManager::new(&store);

    let older = manager.add("Buy milk", "", None).unwrap();
    let newer = manager.add("Walk dog", "", Some(1_700_000_000_000)).unwrap();
    manager.toggle_done(older.id, true).unwrap();

    let updated = manager
        .update(older.id, "Buy oat milk", "barista", Some(1_800_000_000_000))
        .unwrap();

    assert_eq!(updated.id, older.id);
    assert_eq!(updated.title, "Buy oat milk");
    assert_eq!(updated.description, "barista");
    assert_eq!(updated.due_at, Some(1_800_000_000_000));
    assert_eq!(updated.created_at, older.created_at);
    // toggle is the only operation allowed to change the flag
    assert!(updated.done);
    assert!(updated.updated_at >= older.updated_at);

    let tasks = manager.tasks();
    assert_eq!(tasks[0].id, newer.id);
    assert_eq!(tasks[1].id, older.id);
}

#[test]
fn update_unknown_id_is_not_found() {
    let store = MemoryPrefsStore::new();
    let mut manager = TaskListManager::new(&store);
    let existing = manager.add("Buy milk", "", None).unwrap();

    let unknown = Uuid::new_v4();
    let err = manager.update(unknown, "anything", "", None).unwrap_err();
    assert!(matches!(err, TaskListError::NotFound(id) if id == unknown));

    assert_eq!(manager.tasks().len(), 1);
    assert_eq!(manager.tasks()[0], existing);
}

#[test]
fn update_rejects_empty_title_and_leaves_task_untouched() {
    let store = MemoryPrefsStore::new();
    let mut manager = TaskListManager::new(&store);
    let task = manager.add("Buy milk", "2 liters", None).unwrap();

    let err = manager.update(task.id, "   ", "changed", None).unwrap_err();
    assert!(matches!(err, TaskListError::EmptyTitle));
    assert_eq!(manager.tasks()[0], task);
}

#[test]
fn remove_deletes_in_place() {
    let store = MemoryPrefsStore::new();
    let mut manager = TaskListManager::new(&store);

    let a = manager.add("a", "", None).unwrap();
    let b = manager.add("b", "", None).unwrap();
    let c = manager.add("c", "", None).unwrap();

    manager.remove(b.id).unwrap();

    let ids: Vec<_> = manager.tasks().iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![c.id, a.id]);
}

#[test]
fn remove_unknown_id_is_a_noop() {
    let store = MemoryPrefsStore::new();
    let mut manager = TaskListManager::new(&store);
    let task = manager.add("Buy milk", "", None).unwrap();

    manager.remove(Uuid::new_v4()).unwrap();

    assert_eq!(manager.tasks().len(), 1);
    assert_eq!(manager.tasks()[0].id, task.id);
}

#[test]
fn toggle_sets_done_and_refreshes_updated_at() {
    let store = MemoryPrefsStore::new();
    let mut manager = TaskListManager::new(&store);
    let task = manager.add("Buy milk", "", None).unwrap();

    let toggled = manager.toggle_done(task.id, true).unwrap();
    assert!(toggled.done);
    assert!(toggled.updated_at >= task.updated_at);

    let reverted = manager.toggle_done(task.id, false).unwrap();
    assert!(!reverted.done);
}

#[test]
fn toggle_unknown_id_is_not_found() {
    let store = MemoryPrefsStore::new();
    let mut manager = TaskListManager::new(&store);
    manager.add("Buy milk", "", None).unwrap();

    let unknown = Uuid::new_v4();
    let err = manager.toggle_done(unknown, true).unwrap_err();
    assert!(matches!(err, TaskListError::NotFound(id) if id == unknown));
}

#[test]
fn ids_stay_unique_across_operation_sequences() {
    let store = MemoryPrefsStore::new();
    let mut manager = TaskListManager::new(&store);

    let mut created = Vec::new();
    for index in 0..8 {
        created.push(manager.add(&format!("task {index}"), "", None).unwrap());
    }
    manager.remove(created[3].id).unwrap();
    manager
        .update(created[5].id, "renamed", "", None)
        .unwrap();
    manager.add("late arrival", "", None).unwrap();

    let ids: HashSet<_> = manager.tasks().iter().map(|task| task.id).collect();
    assert_eq!(ids.len(), manager.tasks().len());
}

#[test]
fn every_mutation_writes_through_to_the_store() {
    let store = MemoryPrefsStore::new();
    let mut manager = TaskListManager::new(&store);

    let task = manager.add("Buy milk", "", None).unwrap();
    assert_eq!(persisted_tasks(&store), manager.tasks());

    manager.update(task.id, "Buy oat milk", "", None).unwrap();
    assert_eq!(persisted_tasks(&store), manager.tasks());

    manager.toggle_done(task.id, true).unwrap();
    assert_eq!(persisted_tasks(&store), manager.tasks());

    manager.remove(task.id).unwrap();
    assert_eq!(persisted_tasks(&store), manager.tasks());
    assert!(persisted_tasks(&store).is_empty());
}

#[test]
fn storage_failure_surfaces_but_keeps_the_in_memory_mutation() {
    let mut manager = TaskListManager::new(WriteRefusedStore);

    let err = manager.add("Buy milk", "", None).unwrap_err();
    assert!(matches!(err, TaskListError::Storage(_)));

    // divergent from persisted state until the next successful write
    assert_eq!(manager.tasks().len(), 1);
    assert_eq!(manager.tasks()[0].title, "Buy milk");
}

#[test]
fn load_propagates_adapter_read_failure() {
    let mut manager = TaskListManager::new(ReadRefusedStore);

    let err = manager.load().unwrap_err();
    assert!(matches!(err, TaskListError::Storage(_)));
}
