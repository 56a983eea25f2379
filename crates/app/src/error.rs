//! Application error type.

use domain::{DispatchError, DomainError, RepositoryError};
use storage::StorageError;
use thiserror::Error;

/// Top-level error for the demonstration binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Cannot serialize event: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cannot connect to database: {0}")]
    Connect(#[from] sqlx::Error),
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
