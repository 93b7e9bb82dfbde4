use crate::error::{Result, StoreError};
use crate::model::task::{create_task, TaskId, TaskList};
use crate::repository::TaskStore;
use tracing::info;

/// Runs each task operation as one full load -> mutate -> save cycle
/// against the injected store.
pub struct TaskService<S: TaskStore> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(&self) -> Result<TaskList> {
        self.store.load()
    }

    /// Returns the new task's id, or `None` when `text` was missing or empty.
    pub fn add(&self, text: Option<&str>) -> Result<Option<TaskId>> {
        if is_blank(text) {
            // Nothing to write back; skip the round trip entirely.
            return Ok(None);
        }
        let id = self.store.transact(|tasks| add_task(tasks, text))?;
        if let Some(id) = id {
            info!(id, "task added");
        }
        Ok(id)
    }

    /// Returns how many tasks were removed.
    pub fn delete(&self, id: TaskId) -> Result<usize> {
        let removed = self.store.transact(|tasks| Ok(delete_task(tasks, id)))?;
        info!(id, removed, "tasks deleted");
        Ok(removed)
    }

    /// Returns the task's new completion state, or `None` if no task matched.
    pub fn toggle(&self, id: TaskId) -> Result<Option<bool>> {
        let state = self.store.transact(|tasks| Ok(toggle_task(tasks, id)))?;
        match state {
            Some(completed) => info!(id, completed, "task toggled"),
            None => info!(id, "toggle matched no task"),
        }
        Ok(state)
    }
}

// Standalone functions for pure logic

fn is_blank(text: Option<&str>) -> bool {
    text.map_or(true, str::is_empty)
}

/// Appends a new incomplete task. No-op for missing or empty text.
///
/// Fails with `IdsExhausted` rather than reuse an id once the cursor has
/// reached `u64::MAX`.
pub fn add_task(tasks: &mut TaskList, text: Option<&str>) -> Result<Option<TaskId>> {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    let id = tasks
        .allocate_id()
        .ok_or(StoreError::IdsExhausted(tasks.next_id))?;
    tasks.tasks.push(create_task(id, text, false));
    Ok(Some(id))
}

/// Removes every task with `id`, returning the number removed.
pub fn delete_task(tasks: &mut TaskList, id: TaskId) -> usize {
    let initial_len = tasks.tasks.len();
    tasks.tasks.retain(|t| t.id != id);
    initial_len - tasks.tasks.len()
}

/// Flips `completed` on the first task with `id`.
pub fn toggle_task(tasks: &mut TaskList, id: TaskId) -> Option<bool> {
    let task = tasks.tasks.iter_mut().find(|t| t.id == id)?;
    task.completed = !task.completed;
    Some(task.completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{create_task, Task};
    use crate::repository::{FileTaskStore, InMemoryTaskStore};

    fn two_tasks() -> TaskList {
        let mut tasks = TaskList::new();
        add_task(&mut tasks, Some("Buy milk")).unwrap();
        add_task(&mut tasks, Some("Walk dog")).unwrap();
        tasks
    }

    #[test]
    fn test_add_to_empty_list() {
        let mut tasks = TaskList::new();
        let id = add_task(&mut tasks, Some("Buy milk")).unwrap();
        assert_eq!(id, Some(1));
        assert_eq!(tasks.tasks, vec![create_task(1, "Buy milk", false)]);
    }

    #[test]
    fn test_add_keeps_text_verbatim() {
        let mut tasks = TaskList::new();
        add_task(&mut tasks, Some("  padded  ")).unwrap();
        assert_eq!(tasks.tasks[0].text, "  padded  ");
    }

    #[test]
    fn test_add_empty_or_missing_is_identity() {
        let original = two_tasks();

        let mut tasks = original.clone();
        assert_eq!(add_task(&mut tasks, Some("")).unwrap(), None);
        assert_eq!(tasks, original);

        assert_eq!(add_task(&mut tasks, None).unwrap(), None);
        assert_eq!(tasks, original);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut tasks = two_tasks();
        assert_eq!(delete_task(&mut tasks, 1), 1);
        let after_first = tasks.clone();
        assert_eq!(delete_task(&mut tasks, 1), 0);
        assert_eq!(tasks, after_first);
    }

    #[test]
    fn test_delete_nonexistent_is_noop() {
        let original = two_tasks();
        let mut tasks = original.clone();
        assert_eq!(delete_task(&mut tasks, 99), 0);
        assert_eq!(tasks, original);
    }

    #[test]
    fn test_delete_removes_all_duplicates() {
        let mut tasks = TaskList::from_tasks(vec![
            create_task(1, "a", false),
            create_task(2, "b", false),
            create_task(1, "c", true),
        ]);
        assert_eq!(delete_task(&mut tasks, 1), 2);
        assert_eq!(tasks.tasks, vec![create_task(2, "b", false)]);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        for start in [false, true] {
            let mut tasks = TaskList::from_tasks(vec![create_task(1, "a", start)]);
            let original = tasks.clone();
            assert_eq!(toggle_task(&mut tasks, 1), Some(!start));
            assert_eq!(toggle_task(&mut tasks, 1), Some(start));
            assert_eq!(tasks, original);
        }
    }

    #[test]
    fn test_toggle_only_first_match() {
        let mut tasks = TaskList::from_tasks(vec![
            create_task(1, "a", false),
            create_task(1, "b", false),
        ]);
        toggle_task(&mut tasks, 1);
        let states: Vec<bool> = tasks.iter().map(|t| t.completed).collect();
        assert_eq!(states, vec![true, false]);
    }

    #[test]
    fn test_toggle_missing_is_noop() {
        let original = two_tasks();
        let mut tasks = original.clone();
        assert_eq!(toggle_task(&mut tasks, 42), None);
        assert_eq!(tasks, original);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut tasks = two_tasks();
        delete_task(&mut tasks, 1);
        let id = add_task(&mut tasks, Some("Call mom")).unwrap();
        assert_eq!(id, Some(3));
        let ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_add_fails_once_ids_are_exhausted() {
        let mut tasks = TaskList {
            next_id: u64::MAX,
            tasks: Vec::new(),
        };
        let original = tasks.clone();
        assert!(matches!(
            add_task(&mut tasks, Some("one too many")),
            Err(StoreError::IdsExhausted(_))
        ));
        assert_eq!(tasks, original);
    }

    #[test]
    fn test_service_add_after_max_id_leaves_file_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = TaskService::new(FileTaskStore::new(Some(dir.path().to_path_buf())));
        let legacy = r#"[{"id": 18446744073709551615, "text": "last", "completed": false}]"#;
        std::fs::write(service.store().path(), legacy).unwrap();

        let result = service.add(Some("overflow"));
        assert!(matches!(result, Err(StoreError::IdsExhausted(_))));
        assert_eq!(std::fs::read_to_string(service.store().path()).unwrap(), legacy);
    }

    #[test]
    fn test_service_scenario() {
        let service = TaskService::new(InMemoryTaskStore::new());
        assert!(service.list().unwrap().is_empty());

        assert_eq!(service.add(Some("Buy milk")).unwrap(), Some(1));
        assert_eq!(service.add(Some("Walk dog")).unwrap(), Some(2));
        assert_eq!(service.toggle(1).unwrap(), Some(true));
        assert_eq!(service.delete(2).unwrap(), 1);

        let tasks = service.list().unwrap();
        assert_eq!(
            tasks.tasks,
            vec![Task {
                id: 1,
                text: "Buy milk".to_string(),
                completed: true,
            }]
        );
    }

    #[test]
    fn test_service_blank_add_does_not_touch_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = TaskService::new(FileTaskStore::new(Some(dir.path().to_path_buf())));

        assert_eq!(service.add(Some("")).unwrap(), None);
        assert_eq!(service.add(None).unwrap(), None);
        assert!(!service.store().path().exists());
    }

    #[test]
    fn test_service_persists_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = Some(dir.path().to_path_buf());

        let service = TaskService::new(FileTaskStore::new(path.clone()));
        service.add(Some("Buy milk")).unwrap();
        service.add(Some("Walk dog")).unwrap();
        assert_eq!(service.delete(99).unwrap(), 0);

        let reopened = TaskService::new(FileTaskStore::new(path));
        let tasks = reopened.list().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks.next_id, 3);
    }
}
