use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by an injected [`TextEmbedder`](crate::TextEmbedder).
///
/// Kept separate from the index errors so callers can tell a broken embedding
/// backend apart from a malformed catalogue.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct EmbeddingError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl EmbeddingError {
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self(source.into())
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self(message.into().into())
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed on `{field}`: {reason}")]
    Validation { field: String, reason: String },

    #[error("Catalogue index not loaded; call load() first")]
    NotLoaded,

    #[error("Embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Invalid vector: {0}")]
    InvalidVector(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
