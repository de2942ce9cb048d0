//! Comment model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tasklane_core::types::{DbId, Timestamp};

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub todo_id: DbId,
    pub user_id: DbId,
    pub contents: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a comment.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub todo_id: DbId,
    pub user_id: DbId,
    pub contents: String,
}
