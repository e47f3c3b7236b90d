use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Input could not be turned into a valid domain value.
    #[error("invalid value: {0}")]
    TypeConstraint(String),
    /// An unexpected internal error occurred, e.g. storage is unavailable.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
