use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during asset storage operations.
///
/// `NotFound` is kept apart from `Io` so callers can answer 404 without
/// masking genuine storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("asset not found: {0}")]
    NotFound(Uuid),

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} store does not serve assets directly")]
    Unsupported(&'static str),
}
