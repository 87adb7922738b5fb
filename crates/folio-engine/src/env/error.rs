use std::fmt;
use std::io;

/// Failure of a [`KeyValueStore`](super::KeyValueStore) operation.
#[derive(Debug)]
pub enum StorageError {
    /// The backend refuses access (private mode, quota, disabled storage).
    Unavailable,
    /// Reading or writing the backing file failed.
    Io(io::Error),
    /// The backing file is not valid JSON.
    Json(serde_json::Error),
    /// The backing file is JSON but not an object.
    NotAnObject,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Io(e) => write!(f, "storage i/o error: {e}"),
            StorageError::Json(e) => write!(f, "storage file is corrupt: {e}"),
            StorageError::NotAnObject => write!(f, "storage file is not a JSON object"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}
