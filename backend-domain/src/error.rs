// Storage error taxonomy surfaced by the repository ports

/// All errors a storage backend may return through the ports. Backends never
/// leak driver-specific error types past this boundary.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Optimistic concurrency conflict: another writer updated the row
    /// between read and version-checked write. Carries no partial effect.
    #[error("concurrent conflict on {collection}/{key}")]
    ConcurrentConflict { collection: String, key: String },

    /// No row with the given key.
    #[error("not found: {collection}/{key}")]
    NotFound { collection: String, key: String },

    /// Insert collided with an existing key.
    #[error("already exists: {collection}/{key}")]
    AlreadyExists { collection: String, key: String },

    /// The backend could not be reached or a write did not become durable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Any other backend-specific failure (serialization, I/O).
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn conflict(collection: &str, key: impl Into<String>) -> Self {
        StorageError::ConcurrentConflict {
            collection: collection.to_string(),
            key: key.into(),
        }
    }

    pub fn not_found(collection: &str, key: impl Into<String>) -> Self {
        StorageError::NotFound {
            collection: collection.to_string(),
            key: key.into(),
        }
    }

    pub fn already_exists(collection: &str, key: impl Into<String>) -> Self {
        StorageError::AlreadyExists {
            collection: collection.to_string(),
            key: key.into(),
        }
    }
}
