//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, CreateTodoRequest, CreateTodoResponse, ErrorResponse, HealthResponse, MessageResponse,
    TodoPageResponse, TodoResponse, UpdateTodoRequest,
};
use super::state::AppState;
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "CRUD API for todo task records",
        license(name = "MIT")
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::list_todos,
        handlers::get_todo,
        handlers::create_todo,
        handlers::update_todo,
        handlers::delete_todo,
    ),
    components(
        schemas(
            HealthResponse,
            TodoResponse,
            TodoPageResponse,
            CreateTodoRequest,
            CreateTodoResponse,
            UpdateTodoRequest,
            MessageResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "todos", description = "Todo management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    // System routes (non-generic)
    let system_routes = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health));

    // Todo routes (generic over Database)
    let todo_routes = routes!(D => {
        get "/todos" => handlers::list_todos,
        get "/todos/{id}" => handlers::get_todo,
        post "/todos" => handlers::create_todo,
        put "/todos/{id}" => handlers::update_todo,
        delete "/todos/{id}" => handlers::delete_todo,
    });

    system_routes
        .merge(todo_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
