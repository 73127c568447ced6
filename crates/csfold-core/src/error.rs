//! Error types for csfold-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in csfold-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the merged output
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the output directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Project descriptor does not have the `.csproj` extension
    #[error("file must be a .csproj file: {0}")]
    InvalidProjectExtension(PathBuf),

    /// Project descriptor does not exist
    #[error("project file not found: {0}")]
    ProjectNotFound(PathBuf),

    /// Project descriptor is not a usable XML document
    #[error("invalid project file format '{path}': {message}")]
    InvalidProjectFormat { path: PathBuf, message: String },

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification used by front ends to pick an exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidExtension,
    NotFound,
    InvalidFormat,
    Generation,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidProjectExtension(_) => ErrorKind::InvalidExtension,
            Error::ProjectNotFound(_) => ErrorKind::NotFound,
            Error::InvalidProjectFormat { .. } => ErrorKind::InvalidFormat,
            _ => ErrorKind::Generation,
        }
    }
}
