use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultzError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Note '{title}' already exists at {path}")]
    NoteExists { title: String, path: PathBuf },

    #[error("Malformed metadata block in {path}: {detail}")]
    MalformedMetadata { path: PathBuf, detail: String },

    #[error("Move conflict: '{title}' already exists at {destination}")]
    MoveConflict { title: String, destination: PathBuf },

    #[error("Invalid selection criteria: {0}")]
    InvalidCriteria(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VaultzError>;
