//! Projection rows produced by the todo search.

use serde::Serialize;
use sqlx::FromRow;

/// One matching todo in a keyword / nickname / date-range search.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TodoSearchRow {
    pub title: String,
    /// Number of managers attached to the todo.
    pub manager_count: i64,
    /// Number of comments on the todo.
    pub total_comment: i64,
}
