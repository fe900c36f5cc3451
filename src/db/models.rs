//! Domain models for the todo database.
//!
//! These types are storage-agnostic and shared by the API layer and the
//! storage backends.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use crate::db::{DbError, DbResult};

/// Identifier for a todo. Generated by the storage layer on creation,
/// immutable and never reused.
pub type TodoId = ObjectId;

/// Parse a client-supplied identifier string.
pub fn parse_id(raw: &str) -> DbResult<TodoId> {
    ObjectId::parse_str(raw).map_err(|_| DbError::Validation {
        message: "Invalid ID".to_string(),
    })
}

/// A single task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub task: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a todo.
///
/// The repository assigns the id, sets both timestamps to now, and forces
/// the completion flag to false.
#[derive(Debug, Clone, Default)]
pub struct NewTodo {
    pub task: String,
    pub description: Option<String>,
}

/// Partial change-set for updating a todo.
///
/// A field is written to storage only when its option is present; absent
/// fields are left untouched. `updated_at` is refreshed on every applied
/// patch regardless of which fields are set.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub task: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

impl TodoPatch {
    /// True when no recognized field is present.
    pub fn is_empty(&self) -> bool {
        self.task.is_none() && self.description.is_none() && self.is_completed.is_none()
    }
}

/// Pagination window for list queries.
#[derive(Debug, Clone, Copy)]
pub struct PageQuery {
    /// Maximum number of items to return.
    pub limit: i64,
    /// Number of items to skip.
    pub skip: u64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { limit: 10, skip: 0 }
    }
}

/// Result of a paginated list query.
#[derive(Debug, Clone)]
pub struct ListResult<T> {
    /// The items in this page, in natural (insertion) order.
    pub items: Vec<T>,
    /// Total count of all records (before pagination).
    pub total: u64,
}
