//! Error types for Libris

use serde::Serialize;
use thiserror::Error;

/// Numeric error codes reported to callers alongside the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NoSuchData = 2,
    ItemNotAvailable = 3,
    HasActiveLoans = 4,
    CannotReturn = 5,
    BadValue = 6,
    StorageFailure = 7,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Cannot return: {0}")]
    InvalidLoan(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound(_) => ErrorCode::NoSuchData,
            AppError::Unavailable(_) => ErrorCode::ItemNotAvailable,
            AppError::Conflict(_) => ErrorCode::HasActiveLoans,
            AppError::InvalidLoan(_) => ErrorCode::CannotReturn,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Persistence(_) | AppError::Io(_) | AppError::Serialization(_) => {
                ErrorCode::StorageFailure
            }
            AppError::CapacityExceeded(_) | AppError::Config(_) => ErrorCode::Failure,
        }
    }

    /// True for failures of the snapshot store rather than of a catalog operation
    pub fn is_persistence(&self) -> bool {
        self.code() == ErrorCode::StorageFailure
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error body rendered to callers
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let code = err.code();
        ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message: err.to_string(),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
