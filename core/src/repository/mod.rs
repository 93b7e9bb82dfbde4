pub mod file;
pub mod lock;
pub mod memory;
pub mod traits;

// Re-export
pub use file::{FileTaskStore, DEFAULT_FILE_NAME};
pub use lock::{FileLock, DEFAULT_LOCK_TIMEOUT_MS};
pub use memory::InMemoryTaskStore;
pub use traits::TaskStore;
