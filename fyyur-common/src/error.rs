//! Common error types for Fyyur

use thiserror::Error;

/// Common result type for Fyyur operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure kinds surfaced by data-access and setup operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected by the store, e.g. a show naming a missing artist
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation refused because dependent rows exist
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl Error {
    /// True when the store rejected a write because of a foreign key
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            Error::Database(sqlx::Error::Database(db_err)) => {
                db_err.is_foreign_key_violation()
                    || db_err.message().contains("FOREIGN KEY constraint failed")
            }
            _ => false,
        }
    }
}
