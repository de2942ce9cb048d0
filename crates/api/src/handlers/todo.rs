//! Handlers for the `/todos` resource.
//!
//! All endpoints require authentication via [`AuthUser`]. The work itself
//! lives in [`TodoService`]; these functions only extract inputs and wrap
//! results in the `{ "data": ... }` envelope.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tasklane_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::services::todo::{FilterTodoParams, SaveTodoRequest, SearchTodoParams, TodoService};
use crate::state::AppState;

/// POST /api/v1/todos
pub async fn create_todo(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SaveTodoRequest>,
) -> AppResult<impl IntoResponse> {
    let saved = TodoService::from_state(&state).create(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: saved })))
}

/// GET /api/v1/todos?page=&size=
///
/// Most recently modified first.
pub async fn list_todos(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.to_request()?;
    let todos = TodoService::from_state(&state).list(page).await?;
    Ok(Json(DataResponse { data: todos }))
}

/// GET /api/v1/todos/{id}
pub async fn get_todo(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(todo_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let todo = TodoService::from_state(&state).get_by_id(todo_id).await?;
    Ok(Json(DataResponse { data: todo }))
}

/// GET /api/v1/todos/filter?weather=&start_date=&end_date=
///
/// Responds 400 `INVALID_ARGUMENT` when nothing matches.
pub async fn filter_todos(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<FilterTodoParams>,
) -> AppResult<impl IntoResponse> {
    let todos = TodoService::from_state(&state)
        .search_by_simple_filter(&params)
        .await?;
    Ok(Json(DataResponse { data: todos }))
}

/// GET /api/v1/todos/search?page=&size=&keyword=&nickname=&start_date=&end_date=
pub async fn search_todos(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(page_params): Query<PageParams>,
    Query(params): Query<SearchTodoParams>,
) -> AppResult<impl IntoResponse> {
    let page = page_params.to_request()?;
    let result = TodoService::from_state(&state)
        .search_by_keyword_and_nickname(page, &params)
        .await?;
    Ok(Json(DataResponse { data: result }))
}
