pub mod auth;
pub mod health;
pub mod todo;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                     register (public)
/// /auth/signin                                     sign in (public)
///
/// /todos                                           create, list (auth required)
/// /todos/{id}                                      get with owner
/// /todos/filter                                    weather / date-range filter
/// /todos/search                                    keyword / nickname / date-range search
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/todos", todo::router())
}
