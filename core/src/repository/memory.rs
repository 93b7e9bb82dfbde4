use std::sync::{Mutex, MutexGuard};

use crate::error::Result;
use crate::model::task::TaskList;
use crate::repository::traits::TaskStore;

/// Non-persistent store, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: Mutex<Option<TaskList>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: TaskList) -> Self {
        Self {
            tasks: Mutex::new(Some(tasks)),
        }
    }

    fn guard(&self) -> MutexGuard<'_, Option<TaskList>> {
        // A panic inside a transaction leaves the last saved list intact.
        self.tasks.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TaskStore for InMemoryTaskStore {
    fn load(&self) -> Result<TaskList> {
        Ok(self.guard().clone().unwrap_or_default())
    }

    fn save(&self, tasks: &TaskList) -> Result<()> {
        *self.guard() = Some(tasks.clone());
        Ok(())
    }

    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut TaskList) -> Result<T>,
    {
        let mut slot = self.guard();
        let mut tasks = slot.clone().unwrap_or_default();
        let out = f(&mut tasks)?;
        *slot = Some(tasks);
        Ok(out)
    }
}
