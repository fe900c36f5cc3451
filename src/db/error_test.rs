//! Tests for database error types.

use crate::db::{DbError, DbResult};

#[test]
fn not_found_error_displays_correctly() {
    let err = DbError::NotFound {
        id: "64f1c0d2a3b4c5d6e7f80912".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Todo with id '64f1c0d2a3b4c5d6e7f80912' not found"
    );
}

#[test]
fn validation_error_passes_message_through() {
    let err = DbError::Validation {
        message: "Invalid ID".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid ID");
}

#[test]
fn timeout_error_displays_correctly() {
    let err = DbError::Timeout { seconds: 100 };
    assert_eq!(err.to_string(), "Operation exceeded the 100s deadline");
}

#[test]
fn database_error_displays_correctly() {
    let err = DbError::Database {
        message: "socket closed".to_string(),
    };
    assert_eq!(err.to_string(), "Database error: socket closed");
}

#[test]
fn connection_error_displays_correctly() {
    let err = DbError::Connection {
        message: "server selection timed out".to_string(),
    };
    assert_eq!(err.to_string(), "Connection error: server selection timed out");
}

#[test]
fn db_result_err_returns_error() {
    let result: DbResult<()> = Err(DbError::Timeout { seconds: 100 });
    assert!(result.is_err());
}
