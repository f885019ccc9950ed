use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PutError {
    #[error("Not a usable directory '{}': {reason}", .path.display())]
    InvalidDirectory { path: PathBuf, reason: String },

    #[error("Index {index} is out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Entry '{}' no longer exists", .path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} deletion(s) failed and the directory could not be re-listed: {source}", .failures.len())]
    DeleteRefresh {
        failures: Vec<DeletionError>,
        #[source]
        source: Box<PutError>,
    },

    #[error("Failed to run editor '{command}': {source}")]
    Editor {
        command: String,
        #[source]
        source: io::Error,
    },
}

impl PutError {
    /// Maps an I/O error on `path`, turning `NotFound` into [`PutError::NotFound`].
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            PutError::NotFound { path }
        } else {
            PutError::Io { path, source }
        }
    }
}

/// Failure to delete one selected entry. Collected, never fatal for the batch.
#[derive(Debug, Error)]
#[error("Could not delete '{}': {source}", .path.display())]
pub struct DeletionError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

pub type Result<T> = std::result::Result<T, PutError>;
