//! Application-level errors (domain errors with persistence context)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors carry the file and record a failure belongs to.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("enrollment file not found: {0}")]
    MissingFile(PathBuf),

    #[error("invalid record #{index} in {path}: {source}")]
    InvalidRecord {
        path: PathBuf,
        index: usize,
        #[source]
        source: DomainError,
    },

    #[error("cannot serialize enrollments for {path}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
