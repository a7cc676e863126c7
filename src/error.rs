use crate::database::DatabaseError;
use sqlx::Error as SqlxError;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Database pool or migration errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Storage-level errors surfaced by repositories
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Unauthorized access errors
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Business logic errors
    #[error("Business rule violated: {0}")]
    BusinessLogic(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Check if error is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    /// Get HTTP status code for the error
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::NotFound(_) => 404,
            AppError::Unauthorized(_) => 403,
            AppError::Validation(_) => 400,
            AppError::BusinessLogic(_) => 409,
            AppError::Repository(RepositoryError::NotFound(_)) => 404,
            AppError::Repository(RepositoryError::Duplicate(_)) => 409,
            _ => 500,
        }
    }
}

/// Repository-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database query error
    #[error("Query error: {0}")]
    Query(SqlxError),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Duplicate record
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        match &err {
            SqlxError::RowNotFound => RepositoryError::NotFound("Record not found".to_string()),
            SqlxError::Database(db_err) => {
                // Common PostgreSQL constraint error codes
                let code = db_err.code().map(|c| c.to_string());
                if code.as_deref() == Some("23505") {
                    // Unique violation
                    RepositoryError::Duplicate(db_err.message().to_string())
                } else if code.as_deref() == Some("23503") || code.as_deref() == Some("23514") {
                    // Foreign key / check constraint violation
                    RepositoryError::ConstraintViolation(db_err.message().to_string())
                } else {
                    RepositoryError::Query(err)
                }
            }
            _ => RepositoryError::Query(err),
        }
    }
}

/// Outcomes of a participant removal attempt.
///
/// The first five variants are expected, typed results returned directly
/// to the caller; only `Transient` signals an infrastructure failure the
/// caller should retry with backoff.
#[derive(Error, Debug)]
pub enum RemovalError {
    #[error("Group not found")]
    GroupNotFound,

    #[error("Only the group organizer can remove participants")]
    NotOrganizer,

    #[error("The draw has already run; group membership is frozen")]
    DrawAlreadyCompleted,

    #[error("The organizer cannot be removed from their own group")]
    CannotRemoveOrganizer,

    #[error("User is not a participant of this group")]
    ParticipantNotFound,

    #[error("Storage failure: {0}")]
    Transient(#[from] RepositoryError),
}

impl RemovalError {
    /// Whether the caller may retry the whole operation
    pub fn is_transient(&self) -> bool {
        matches!(self, RemovalError::Transient(_))
    }

    /// Get HTTP status code for the error.
    ///
    /// `NotOrganizer` maps to the same code as `GroupNotFound`: a
    /// requester without permission must not be able to confirm that the
    /// group exists.
    pub fn status_code(&self) -> u16 {
        match self {
            RemovalError::GroupNotFound => 404,
            RemovalError::NotOrganizer => 404,
            RemovalError::ParticipantNotFound => 404,
            RemovalError::DrawAlreadyCompleted => 409,
            RemovalError::CannotRemoveOrganizer => 409,
            RemovalError::Transient(_) => 503,
        }
    }
}

impl From<SqlxError> for RemovalError {
    fn from(err: SqlxError) -> Self {
        RemovalError::Transient(err.into())
    }
}
