use thiserror::Error;

/// Outcome taxonomy of the service layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Referenced groomer or review does not exist or is not visible.
    #[error("not found")]
    NotFound,
    /// Input violated a schema or range constraint; nothing was persisted.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The store could not complete or commit the unit of work.
    #[error("persistence failure")]
    PersistenceFailure,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
