//! Database error types.
//!
//! Storage-backend agnostic errors shared by the MongoDB and in-memory
//! backends. thiserror provides the derive macros, miette the diagnostic
//! codes.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Todo with id '{id}' not found")]
    #[diagnostic(code(todo_api::db::not_found))]
    NotFound { id: String },

    #[error("{message}")]
    #[diagnostic(code(todo_api::db::validation_error))]
    Validation { message: String },

    #[error("Operation exceeded the {seconds}s deadline")]
    #[diagnostic(code(todo_api::db::timeout))]
    Timeout { seconds: u64 },

    #[error("Database error: {message}")]
    #[diagnostic(code(todo_api::db::database_error))]
    Database { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(todo_api::db::connection_error))]
    Connection { message: String },
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
