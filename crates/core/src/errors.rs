//! Core error types for the Expensebook application.
//!
//! Two families live here. `Error` and `DatabaseError` describe infrastructure
//! failures that propagate to the caller; storage-specific errors (from Diesel,
//! SQLite, etc.) are converted to these types by the storage layer.
//! `ValidationError` and `Rejection` describe business-rule outcomes that the
//! services report to a sink instead of returning.

use std::fmt::Display;

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for infrastructure failures.
///
/// Database-specific errors are wrapped in string form to keep this type
/// database-agnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A stored value could not be mapped back to a domain value.
    #[error("Stored value is corrupt: {0}")]
    CorruptValue(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// A malformed field on an incoming entity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required and cannot be null or empty")]
    Required { field: String },

    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Date is required and cannot be null")]
    MissingDate,

    #[error("Date cannot be in the future")]
    FutureDate,

    #[error("Category cannot be null")]
    MissingCategory,
}

/// Why a mutating operation was turned down.
///
/// Rejections never leave a service as an `Err`; they are rendered with
/// [`Rejection::message_for`] and pushed to the sink together with the
/// entity they cite.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Duplicate id or name.
    #[error("{0}")]
    Conflict(String),

    /// A referenced id is absent from the store.
    #[error("{0}")]
    NotFound(String),

    /// The operation would orphan dependent records.
    #[error("{0}")]
    Integrity(String),
}

impl Rejection {
    /// Formats the sink message: `"<reason phrase>: <subject>"`.
    pub fn message_for(&self, subject: &impl Display) -> String {
        format!("{}: {}", self, subject)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Rejection::NotFound(_))
    }
}
