use backend_domain::StorageError;
use thiserror::Error;

/// Application error taxonomy. Every variant carries enough for the calling
/// surface to render a reason; localization happens above this layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid payload: {field}: {reason}")]
    InvalidPayload { field: &'static str, reason: String },
    #[error("record not found: {0}")]
    RecordNotFound(String),
    #[error("match not found: {0}")]
    MatchNotFound(String),
    #[error("invalid transition: '{event}' not allowed from '{from}'")]
    InvalidTransition { from: String, event: String },
    /// Transient; the caller may retry the whole operation.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    /// Counter contention survived the internal retry budget. The failed
    /// attempt performed no increment, so retrying is safe.
    #[error("transaction conflict: {0}")]
    TransactionConflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid_payload(field: &'static str, reason: impl Into<String>) -> Self {
        AppError::InvalidPayload {
            field,
            reason: reason.into(),
        }
    }

    pub fn invalid_transition(from: impl Into<String>, event: impl Into<String>) -> Self {
        AppError::InvalidTransition {
            from: from.into(),
            event: event.into(),
        }
    }
}

// Default mapping for storage faults. NotFound is intentionally not mapped
// here: call sites decide between RecordNotFound and MatchNotFound.
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unavailable(msg) => AppError::StorageUnavailable(msg),
            StorageError::ConcurrentConflict { .. } => {
                AppError::TransactionConflict(err.to_string())
            }
            other => AppError::Internal(anyhow::anyhow!(other)),
        }
    }
}
