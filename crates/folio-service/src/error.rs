use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    StoreError(#[from] folio_store::error::StoreError),

    #[error(transparent)]
    CoreError(#[from] folio_core::error::CoreError),

    #[error("User not authorized")]
    NotAuthorized,

    #[error("Not found: {0}")]
    NotFound(&'static str),

    #[error("Validation error: {0}")]
    Validation(&'static str),

    #[error("Already exists: {0}")]
    AlreadyExists(&'static str),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
