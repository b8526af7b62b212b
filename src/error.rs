use thiserror::Error;

use crate::editor::ValidationError;

#[derive(Error, Debug)]
pub enum MapNotesError {
    #[error("Not a mapnotes data directory. Run 'mapnotes init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove the data directory to reinitialize.")]
    AlreadyInitialized,

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Note index {index} out of range (have {len} notes)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, MapNotesError>;
