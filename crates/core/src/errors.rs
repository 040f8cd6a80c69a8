use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Slot conflict: {0}")]
    Conflict(String),

    #[error("Policy violation: {0}")]
    Policy(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Storage error: {0}")]
    Store(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingError {
    /// Whether the caller may re-drive the whole flow and expect a different outcome.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::Conflict(_) | BookingError::Store(_))
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
