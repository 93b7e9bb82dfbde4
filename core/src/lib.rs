pub mod error;
pub mod model;
pub mod repository;
pub mod service;

pub use error::{Result, StoreError};
pub use model::task::{create_task, Task, TaskId, TaskList};
pub use repository::{FileTaskStore, InMemoryTaskStore, TaskStore, DEFAULT_FILE_NAME};
pub use service::task_service::{add_task, delete_task, toggle_task, TaskService};
