//! API handlers.

mod system;
mod todos;


use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

use crate::db::DbError;

pub use system::*;
pub use todos::*;

/// Error body returned on all failure responses.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[schema(example = "Invalid ID")]
    pub error: String,
}

/// Map a database error onto its HTTP status and JSON body.
pub(crate) fn error_response(err: DbError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        DbError::NotFound { .. } => StatusCode::NOT_FOUND,
        DbError::Validation { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
