use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by a task store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Malformed task file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode task list: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed: {0}")]
    Lock(PathBuf),

    #[error("No task ids left after {0}")]
    IdsExhausted(u64),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
