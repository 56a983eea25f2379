//! Repository contract shared by every aggregate.

use async_trait::async_trait;
use common::EntityId;
use storage::StorageError;
use thiserror::Error;

use crate::error::DomainError;

/// Errors that can occur in repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No row matches the requested id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: EntityId },

    /// An error occurred in the underlying store.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A row could not be mapped to or from its entity.
    #[error("Cannot map {entity} {id}: {reason}")]
    Mapping {
        entity: &'static str,
        id: EntityId,
        reason: String,
    },
}

impl RepositoryError {
    pub(crate) fn not_found(entity: &'static str, id: &EntityId) -> Self {
        RepositoryError::NotFound {
            entity,
            id: id.clone(),
        }
    }

    pub(crate) fn invalid_row(entity: &'static str, id: &EntityId, error: DomainError) -> Self {
        RepositoryError::Mapping {
            entity,
            id: id.clone(),
            reason: error.to_string(),
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Persistence contract for one aggregate type.
///
/// Each operation runs in its own transaction, committed on success and
/// rolled back on failure.
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Inserts a new aggregate.
    async fn create(&self, entity: &T) -> Result<()>;

    /// Overwrites a stored aggregate. Fails with `NotFound` if it was never created.
    async fn update(&self, entity: &T) -> Result<()>;

    /// Loads a fully hydrated aggregate. Fails with `NotFound` if it does not exist.
    async fn find(&self, id: &EntityId) -> Result<T>;

    /// Loads every aggregate, ordered by id.
    async fn find_all(&self) -> Result<Vec<T>>;
}
