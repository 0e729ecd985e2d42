use thiserror::Error;

/// Errors that can occur in repository implementations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unsupported sort property: {0}")]
    InvalidSort(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data from database: {0}")]
    InvalidData(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
