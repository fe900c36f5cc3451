//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing storage
//! backends to be swapped without changing the handler layer.

use async_trait::async_trait;

use crate::db::{
    DbResult,
    models::{ListResult, NewTodo, PageQuery, Todo, TodoId, TodoPatch},
};

/// Repository for Todo operations.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Persist a new todo. Assigns a fresh id, sets both timestamps to
    /// now, and forces the completion flag to false. Returns the generated
    /// id as the storage acknowledgment.
    async fn create(&self, new: NewTodo) -> DbResult<TodoId>;

    /// Fetch one page of todos in insertion order, together with the
    /// unfiltered total count.
    async fn list(&self, page: PageQuery) -> DbResult<ListResult<Todo>>;

    /// Get a todo by id.
    async fn get(&self, id: TodoId) -> DbResult<Todo>;

    /// Apply a partial change-set to an existing todo. Refreshes
    /// `updated_at` even when the patch repeats current values.
    async fn update(&self, id: TodoId, patch: TodoPatch) -> DbResult<()>;

    /// Permanently remove a todo by id.
    async fn delete(&self, id: TodoId) -> DbResult<()>;
}

/// Combined database interface handed to the API layer at composition time.
pub trait Database: Send + Sync {
    /// Get the todo repository.
    fn todos(&self) -> &dyn TodoRepository;
}
