/// Unified error type for store access
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// MongoDB driver errors
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// No store handle is published right now
    #[error("Database is not connected")]
    NotConnected,

    /// The connection driver task is gone
    #[error("Connection manager has stopped")]
    ManagerStopped,

    /// Stored data could not be converted
    #[error("Conversion error: {0}")]
    Conversion(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
