use serde::{Deserialize, Serialize};

pub type TaskId = u64;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

/// Builds a task with the fixed `{id, text, completed}` shape.
pub fn create_task(id: TaskId, text: impl Into<String>, completed: bool) -> Task {
    Task {
        id,
        text: text.into(),
        completed,
    }
}

/// The whole persisted collection: tasks in insertion order plus the id cursor.
///
/// `next_id` only ever grows, so an id freed by a delete is never handed out
/// again.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    pub next_id: TaskId,
    pub tasks: Vec<Task>,
}

impl Default for TaskList {
    fn default() -> Self {
        TaskList {
            next_id: 1,
            tasks: Vec::new(),
        }
    }
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a bare task sequence, placing the cursor past the highest id.
    ///
    /// The cursor saturates at `u64::MAX`; `allocate_id` refuses to hand
    /// that out.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let next_id = max_id(&tasks).saturating_add(1);
        TaskList { next_id, tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Hands out the next id and advances the cursor, or `None` once the
    /// cursor can no longer move past the id it would return.
    ///
    /// A hand-edited file may carry a stale cursor, so the result is never
    /// below `max(id) + 1`.
    pub(crate) fn allocate_id(&mut self) -> Option<TaskId> {
        let floor = max_id(&self.tasks).checked_add(1)?;
        let id = self.next_id.max(floor);
        self.next_id = id.checked_add(1)?;
        Some(id)
    }
}

fn max_id(tasks: &[Task]) -> TaskId {
    tasks.iter().map(|t| t.id).max().unwrap_or(0)
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
