//! Domain error types for the production tracker.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.
//! Every variant except `Database` and `Storage` is an expected, caller-recoverable rejection.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use std::fmt;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Referenced entity does not exist
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    /// Stage start attempted while an earlier sibling is not completed
    #[error("Stage cannot be started: previous stage '{blocking_stage}' is not completed")]
    PrecedenceViolation { blocking_stage: String },

    #[error("Stage '{0}' is already in progress")]
    AlreadyStarted(String),

    #[error("Stage '{0}' is already completed")]
    AlreadyCompleted(String),

    #[error("Stage '{0}' must be started before it can be completed")]
    NotStarted(String),

    #[error("Aircraft still has production stages that are not completed")]
    StagesIncomplete,

    #[error("Aircraft still has parts that are not ready")]
    PartsNotReady,

    #[error("A report has already been generated for aircraft {0}")]
    DuplicateReport(String),

    /// Unique key collision (aircraft code, staff username)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing field or unrecognised enumeration value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Report file storage failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    pub fn not_found(entity: &'static str, key: impl fmt::Display) -> Self {
        AppError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Stable machine-readable code for the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::PrecedenceViolation { .. } => "PRECEDENCE_VIOLATION",
            AppError::AlreadyStarted(_) => "ALREADY_STARTED",
            AppError::AlreadyCompleted(_) => "ALREADY_COMPLETED",
            AppError::NotStarted(_) => "NOT_STARTED",
            AppError::StagesIncomplete => "STAGES_INCOMPLETE",
            AppError::PartsNotReady => "PARTS_NOT_READY",
            AppError::DuplicateReport(_) => "DUPLICATE_REPORT",
            AppError::Conflict(_) => "CONFLICT",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::PrecedenceViolation { .. }
            | AppError::AlreadyStarted(_)
            | AppError::AlreadyCompleted(_)
            | AppError::NotStarted(_)
            | AppError::StagesIncomplete
            | AppError::PartsNotReady
            | AppError::DuplicateReport(_)
            | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                "An internal database error occurred".to_string()
            }
            AppError::Storage(err_str) => {
                tracing::error!("Storage error: {}", err_str);
                "An internal storage error occurred".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.code().to_string(),
            message,
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

/// True when the store rejected a write because of a unique index.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// True when the store rejected a write because of a foreign key.
pub fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

// Conversion implementations for common error types

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("Invalid UUID: {}", err))
    }
}
