//! Todo entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tasklane_core::types::{DbId, Timestamp};

use super::user::UserProfile;

/// A row from the `todos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Todo {
    pub id: DbId,
    pub title: String,
    pub contents: String,
    /// Weather snapshot captured when the todo was created.
    pub weather: String,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a todo. The owner and weather are fixed at creation.
#[derive(Debug, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user_id: DbId,
}

/// A todo read together with its owner in one query.
///
/// The owner columns come from a `LEFT JOIN`, so they are optional even
/// though `todos.user_id` is `NOT NULL`.
#[derive(Debug, Clone, FromRow)]
pub struct TodoWithUser {
    pub id: DbId,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub user_email: Option<String>,
}

impl TodoWithUser {
    /// The owner's public profile. Falls back to an empty email if the
    /// joined owner row was missing.
    pub fn owner(&self) -> UserProfile {
        UserProfile {
            id: self.user_id,
            email: self.user_email.clone().unwrap_or_default(),
        }
    }
}
