//! Repository for the `todos` table.

use sqlx::{PgExecutor, PgPool};
use tasklane_core::pagination::{Page, PageRequest};
use tasklane_core::predicate::WeatherFilter;
use tasklane_core::types::DbId;

use super::filter::{bind_values, build_filter};
use crate::models::todo::{CreateTodo, Todo, TodoWithUser};

/// Column list for plain `todos` queries.
const COLUMNS: &str = "id, title, contents, weather, user_id, created_at, updated_at";

/// Column list for todos (`t`) joined to their owner (`o`).
const WITH_USER_COLUMNS: &str = "\
    t.id, t.title, t.contents, t.weather, t.user_id, t.created_at, t.updated_at, \
    o.email AS user_email";

/// Provides insert and read operations for todos.
pub struct TodoRepo;

impl TodoRepo {
    /// Insert a new todo, returning the created row.
    ///
    /// Accepts any executor so the insert can run inside a caller-owned
    /// transaction.
    pub async fn create<'e, E>(executor: E, input: &CreateTodo) -> Result<Todo, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO todos (title, contents, weather, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(&input.title)
            .bind(&input.contents)
            .bind(&input.weather)
            .bind(input.user_id)
            .fetch_one(executor)
            .await
    }

    /// Fetch one todo together with its owner in a single round trip.
    pub async fn find_by_id_with_user(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TodoWithUser>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_USER_COLUMNS} \
             FROM todos t \
             LEFT JOIN users o ON o.id = t.user_id \
             WHERE t.id = $1"
        );
        sqlx::query_as::<_, TodoWithUser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of todos, most recently modified first.
    pub async fn list_page(
        pool: &PgPool,
        page: PageRequest,
    ) -> Result<Page<TodoWithUser>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_USER_COLUMNS} \
             FROM todos t \
             LEFT JOIN users o ON o.id = t.user_id \
             ORDER BY t.updated_at DESC, t.id DESC \
             LIMIT $1 OFFSET $2"
        );
        let items = sqlx::query_as::<_, TodoWithUser>(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM todos")
            .fetch_one(pool)
            .await?;

        Ok(Page::new(items, page, total))
    }

    /// All todos matching a weather / creation-range filter, most recently
    /// modified first. An empty filter matches every todo.
    pub async fn find_matching(
        pool: &PgPool,
        filter: &WeatherFilter,
    ) -> Result<Vec<TodoWithUser>, sqlx::Error> {
        let predicate = filter.to_predicate();
        let sql_filter = build_filter(predicate.as_ref());

        let query = format!(
            "SELECT {WITH_USER_COLUMNS} \
             FROM todos t \
             LEFT JOIN users o ON o.id = t.user_id \
             {} \
             ORDER BY t.updated_at DESC, t.id DESC",
            sql_filter.where_clause
        );

        tracing::debug!(
            binds = sql_filter.bind_values.len(),
            "Fetching todos by weather and creation range"
        );

        bind_values(
            sqlx::query_as::<_, TodoWithUser>(&query),
            &sql_filter.bind_values,
        )
        .fetch_all(pool)
        .await
    }
}
