//! In-memory storage backend.
//!
//! Mirrors the observable semantics of the MongoDB backend (insertion
//! order, ObjectId identifiers, timestamp handling) without external
//! state. Backs the handler test suite and local development.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;

use crate::db::{
    Database, DbError, DbResult, ListResult, NewTodo, PageQuery, Todo, TodoId, TodoPatch,
    TodoRepository,
};

/// In-memory database implementation.
#[derive(Default)]
pub struct MemoryDatabase {
    todos: MemoryTodoRepository,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Database for MemoryDatabase {
    fn todos(&self) -> &dyn TodoRepository {
        &self.todos
    }
}

/// Todo repository over a mutex-guarded vector, kept in insertion order.
#[derive(Default)]
pub struct MemoryTodoRepository {
    rows: Mutex<Vec<Todo>>,
}

impl MemoryTodoRepository {
    fn lock(&self) -> DbResult<MutexGuard<'_, Vec<Todo>>> {
        self.rows.lock().map_err(|e| DbError::Database {
            message: format!("Failed to acquire store lock: {e}"),
        })
    }
}

#[async_trait]
impl TodoRepository for MemoryTodoRepository {
    async fn create(&self, new: NewTodo) -> DbResult<TodoId> {
        let now = Utc::now();
        let todo = Todo {
            id: ObjectId::new(),
            task: new.task,
            description: new.description,
            is_completed: false,
            created_at: now,
            updated_at: now,
        };
        let id = todo.id;
        self.lock()?.push(todo);
        Ok(id)
    }

    async fn list(&self, page: PageQuery) -> DbResult<ListResult<Todo>> {
        let rows = self.lock()?;
        let items = rows
            .iter()
            .skip(page.skip as usize)
            .take(page.limit.max(0) as usize)
            .cloned()
            .collect();
        Ok(ListResult {
            items,
            total: rows.len() as u64,
        })
    }

    async fn get(&self, id: TodoId) -> DbResult<Todo> {
        self.lock()?
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| DbError::NotFound { id: id.to_hex() })
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> DbResult<()> {
        let mut rows = self.lock()?;
        let todo = rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DbError::NotFound { id: id.to_hex() })?;

        if let Some(task) = patch.task {
            todo.task = task;
        }
        if let Some(description) = patch.description {
            todo.description = Some(description);
        }
        if let Some(is_completed) = patch.is_completed {
            todo.is_completed = is_completed;
        }
        todo.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: TodoId) -> DbResult<()> {
        let mut rows = self.lock()?;
        let before = rows.len();
        rows.retain(|t| t.id != id);
        if rows.len() == before {
            return Err(DbError::NotFound { id: id.to_hex() });
        }
        Ok(())
    }
}
