//! Repository for the `comments` table.

use sqlx::PgPool;

use crate::models::comment::{Comment, CreateComment};

const COLUMNS: &str = "id, todo_id, user_id, contents, created_at, updated_at";

/// Provides insert operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (todo_id, user_id, contents)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(input.todo_id)
            .bind(input.user_id)
            .bind(&input.contents)
            .fetch_one(pool)
            .await
    }
}
