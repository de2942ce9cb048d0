//! Route definitions for the `/todos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::todo;
use crate::state::AppState;

/// Routes mounted at `/todos`.
///
/// ```text
/// POST   /          -> create_todo
/// GET    /          -> list_todos (?page, size)
/// GET    /filter    -> filter_todos (?weather, start_date, end_date)
/// GET    /search    -> search_todos (?page, size, keyword, nickname, start_date, end_date)
/// GET    /{id}      -> get_todo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(todo::list_todos).post(todo::create_todo))
        .route("/filter", get(todo::filter_todos))
        .route("/search", get(todo::search_todos))
        .route("/{id}", get(todo::get_todo))
}
