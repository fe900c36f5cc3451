//! Todo management handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{ErrorResponse, error_response};
use crate::api::AppState;
use crate::db::{self, Database, DbError, NewTodo, PageQuery, Todo, TodoPatch};

// =============================================================================
// DTOs
// =============================================================================

/// A todo as rendered to clients.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    #[schema(example = "64f1c0d2a3b4c5d6e7f80912")]
    pub id: String,
    #[schema(example = "Buy milk")]
    pub task: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id.to_hex(),
            task: t.task,
            description: t.description,
            is_completed: t.is_completed,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTodoRequest {
    /// Task summary, 3 to 100 characters
    #[schema(example = "Buy milk")]
    #[validate(length(min = 3, max = 100, message = "task must be 3 to 100 characters"))]
    pub task: Option<String>,
    pub description: Option<String>,
}

/// Storage acknowledgment returned on creation.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoResponse {
    #[schema(example = "64f1c0d2a3b4c5d6e7f80912")]
    pub inserted_id: String,
}

/// Partial update request. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    #[schema(example = "Buy oat milk")]
    pub task: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

impl From<UpdateTodoRequest> for TodoPatch {
    fn from(req: UpdateTodoRequest) -> Self {
        Self {
            task: req.task,
            description: req.description,
            is_completed: req.is_completed,
        }
    }
}

/// Confirmation message for update/delete.
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Todo updated successfully")]
    pub message: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTodosQuery {
    /// 1-based page number; absent, non-numeric, or < 1 falls back to 1
    #[param(example = "2")]
    pub page: Option<String>,
    /// Page size; absent, non-numeric, or < 1 falls back to 10
    #[param(example = "10")]
    pub limit: Option<String>,
}

/// One page of todos.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoPageResponse {
    pub data: Vec<TodoResponse>,
    pub page: i64,
    pub limit: i64,
    pub total: u64,
    pub total_pages: u64,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 200, description = "Todo created", body = CreateTodoResponse),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_todo<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<CreateTodoRequest>,
) -> Result<Json<CreateTodoResponse>, (StatusCode, Json<ErrorResponse>)> {
    req.validate().map_err(|e| {
        error_response(DbError::Validation {
            message: e.to_string(),
        })
    })?;

    let Some(task) = req.task else {
        return Err(error_response(DbError::Validation {
            message: "task is required".to_string(),
        }));
    };

    let new = NewTodo {
        task,
        description: req.description,
    };

    let inserted_id = state
        .db()
        .todos()
        .create(new)
        .await
        .map_err(error_response)?;

    Ok(Json(CreateTodoResponse {
        inserted_id: inserted_id.to_hex(),
    }))
}

#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    params(ListTodosQuery),
    responses(
        (status = 200, description = "Paginated list of todos", body = TodoPageResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_todos<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<ListTodosQuery>,
) -> Result<Json<TodoPageResponse>, (StatusCode, Json<ErrorResponse>)> {
    // Invalid pagination inputs silently fall back to the defaults.
    let page = parse_positive(query.page.as_deref()).unwrap_or(1);
    let limit = parse_positive(query.limit.as_deref()).unwrap_or(10);
    let skip = (page - 1) * limit;

    let result = state
        .db()
        .todos()
        .list(PageQuery {
            limit,
            skip: skip as u64,
        })
        .await
        .map_err(error_response)?;

    let total_pages = result.total.div_ceil(limit as u64);

    Ok(Json(TodoPageResponse {
        data: result.items.into_iter().map(TodoResponse::from).collect(),
        page,
        limit,
        total: result.total,
        total_pages,
    }))
}

#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo found", body = TodoResponse),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_todo<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, (StatusCode, Json<ErrorResponse>)> {
    let id = db::parse_id(&id).map_err(error_response)?;

    let todo = state.db().todos().get(id).await.map_err(error_response)?;

    Ok(Json(TodoResponse::from(todo)))
}

#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Todo updated", body = MessageResponse),
        (status = 400, description = "Invalid ID or empty update", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_todo<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    let id = db::parse_id(&id).map_err(error_response)?;

    let patch = TodoPatch::from(req);
    // The always-refreshed `updated_at` does not count as a field to update.
    if patch.is_empty() {
        return Err(error_response(DbError::Validation {
            message: "No fields to update".to_string(),
        }));
    }

    state
        .db()
        .todos()
        .update(id, patch)
        .await
        .map_err(error_response)?;

    Ok(Json(MessageResponse {
        message: "Todo updated successfully".to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo deleted", body = MessageResponse),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_todo<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    let id = db::parse_id(&id).map_err(error_response)?;

    state
        .db()
        .todos()
        .delete(id)
        .await
        .map_err(error_response)?;

    Ok(Json(MessageResponse {
        message: "Todo deleted successfully".to_string(),
    }))
}

// =============================================================================
// Helpers
// =============================================================================

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.parse::<i64>().ok()).filter(|v| *v >= 1)
}
