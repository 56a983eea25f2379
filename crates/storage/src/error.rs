use thiserror::Error;

/// Errors that can occur when interacting with the row store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A row with the same primary key (or unique column) already exists.
    #[error("Unique constraint violated on {table}: {key}")]
    UniqueViolation { table: &'static str, key: String },

    /// A row references a parent row that does not exist.
    #[error("Foreign key constraint violated on {table}: {key}")]
    ForeignKeyViolation { table: &'static str, key: String },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
