use thiserror::Error;

/// Errors that can occur when interacting with the document stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A room with the same number already exists.
    #[error("Room number already in use: {number}")]
    DuplicateRoomNumber { number: String },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored column held a value the domain model does not recognize.
    #[error("Invalid {field} value in stored document: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
