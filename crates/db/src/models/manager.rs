//! Manager association model (a user helping on a todo).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tasklane_core::types::{DbId, Timestamp};

/// A row from the `managers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Manager {
    pub id: DbId,
    pub todo_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for attaching a user to a todo as manager.
#[derive(Debug, Deserialize)]
pub struct CreateManager {
    pub todo_id: DbId,
    pub user_id: DbId,
}
