//! Repository for the `managers` table.

use sqlx::PgPool;

use crate::models::manager::{CreateManager, Manager};

const COLUMNS: &str = "id, todo_id, user_id, created_at";

/// Provides insert operations for todo managers.
pub struct ManagerRepo;

impl ManagerRepo {
    /// Attach a user to a todo as manager.
    ///
    /// Fails with a unique violation on `uq_managers_todo_user` if the user
    /// already manages the todo.
    pub async fn create(pool: &PgPool, input: &CreateManager) -> Result<Manager, sqlx::Error> {
        let query = format!(
            "INSERT INTO managers (todo_id, user_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manager>(&query)
            .bind(input.todo_id)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }
}
