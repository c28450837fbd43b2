//! Error taxonomy shared by every domain service.

/// Errors surfaced by domain services.
///
/// Storage failures keep their full `anyhow` chain for logging; the REST
/// layer never forwards that text to clients.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        DomainError::NotFound(message.into())
    }
}

impl From<shared::EnumParseError> for DomainError {
    fn from(err: shared::EnumParseError) -> Self {
        DomainError::Validation(err.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
