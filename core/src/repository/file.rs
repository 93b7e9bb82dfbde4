use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::model::task::{Task, TaskList};
use crate::repository::lock::{FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::repository::traits::TaskStore;

pub const DEFAULT_FILE_NAME: &str = "tasks.json";

/// Task list stored as one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct FileTaskStore {
    file_path: PathBuf,
    lock_timeout_ms: u64,
}

impl FileTaskStore {
    /// Store at `<base_dir>/tasks.json`, or `./tasks.json` when no directory
    /// is given.
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        let file_path = match base_dir {
            Some(dir) => dir.join(DEFAULT_FILE_NAME),
            None => PathBuf::from(DEFAULT_FILE_NAME),
        };
        FileTaskStore {
            file_path,
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }

    pub fn with_lock_timeout(mut self, timeout_ms: u64) -> Self {
        self.lock_timeout_ms = timeout_ms;
        self
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn lock_path(&self) -> PathBuf {
        let mut path = self.file_path.clone().into_os_string();
        path.push(".lock");
        PathBuf::from(path)
    }

    fn lock(&self) -> Result<FileLock> {
        FileLock::acquire(self.lock_path(), self.lock_timeout_ms)
    }

    fn read_tasks(&self) -> Result<TaskList> {
        let bytes = match fs::read(&self.file_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "no task file yet, starting empty");
                return Ok(TaskList::new());
            }
            Err(e) => return Err(StoreError::io(&self.file_path, e)),
        };

        let tasks = decode(&bytes).map_err(|source| StoreError::Decode {
            path: self.file_path.clone(),
            source,
        })?;
        debug!(path = %self.file_path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Writes to a sibling temp file and renames it over the target, so the
    /// task file is always either the old or the new version.
    fn write_tasks(&self, tasks: &TaskList) -> Result<()> {
        let dir = match self.file_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let temp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, tasks).map_err(StoreError::Encode)?;
            writer
                .flush()
                .map_err(|e| StoreError::io(temp.path(), e))?;
        }
        temp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io(temp.path(), e))?;
        temp.persist(&self.file_path)
            .map_err(|e| StoreError::io(&self.file_path, e.error))?;

        debug!(path = %self.file_path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

/// Accepts the current `{next_id, tasks}` document as well as a bare task
/// array written by older versions.
fn decode(bytes: &[u8]) -> serde_json::Result<TaskList> {
    let value: Value = serde_json::from_slice(bytes)?;
    if value.is_array() {
        let tasks: Vec<Task> = serde_json::from_value(value)?;
        Ok(TaskList::from_tasks(tasks))
    } else {
        serde_json::from_value(value)
    }
}

impl TaskStore for FileTaskStore {
    fn load(&self) -> Result<TaskList> {
        self.read_tasks()
    }

    fn save(&self, tasks: &TaskList) -> Result<()> {
        let _lock = self.lock()?;
        self.write_tasks(tasks)
    }

    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut TaskList) -> Result<T>,
    {
        let _lock = self.lock()?;
        let mut tasks = self.read_tasks()?;
        let out = f(&mut tasks)?;
        self.write_tasks(&tasks)?;
        Ok(out)
    }
}
