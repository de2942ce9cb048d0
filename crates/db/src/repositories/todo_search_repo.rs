//! Keyword / nickname / date-range search over todos.
//!
//! The search issues two reads that share one rendered filter: a windowed
//! read of projected rows and an unwindowed count. They are not wrapped in a
//! shared snapshot, so a write landing between the two may leave `total`
//! briefly out of step with the returned window.

use sqlx::PgPool;
use tasklane_core::pagination::{Page, PageRequest};
use tasklane_core::predicate::{Predicate, TodoSearchFilter};

use super::filter::{bind_values, bind_values_scalar, build_filter};
use crate::models::search::TodoSearchRow;

/// Join graph shared by the row read and the count read.
///
/// `u` is the user behind each manager row; nickname conditions match
/// against it.
const FROM_JOINED: &str = "\
    FROM todos t \
    LEFT JOIN managers m ON m.todo_id = t.id \
    LEFT JOIN comments c ON c.todo_id = t.id \
    LEFT JOIN users u ON u.id = m.user_id";

/// Provides the paginated todo search.
pub struct TodoSearchRepo;

impl TodoSearchRepo {
    /// Return one page of matching todos with their manager and comment
    /// counts, plus the total number of matches.
    ///
    /// Rows are grouped per todo so join fan-out never duplicates a todo,
    /// and the counts cover the todo's whole manager / comment collections
    /// regardless of which manager matched a nickname condition. Results
    /// are ordered by todo id.
    pub async fn search(
        pool: &PgPool,
        page: PageRequest,
        filter: &TodoSearchFilter,
    ) -> Result<Page<TodoSearchRow>, sqlx::Error> {
        let predicate = filter.to_predicate();
        let sql_filter = build_filter(predicate.as_ref());
        let limit_idx = sql_filter.next_bind_idx();

        let rows_query = format!(
            "SELECT t.title, \
                    (SELECT COUNT(*) FROM managers mc WHERE mc.todo_id = t.id) AS manager_count, \
                    (SELECT COUNT(*) FROM comments cc WHERE cc.todo_id = t.id) AS total_comment \
             {FROM_JOINED} \
             {where_clause} \
             GROUP BY t.id \
             ORDER BY t.id ASC \
             LIMIT ${limit_idx} OFFSET ${offset_idx}",
            where_clause = sql_filter.where_clause,
            offset_idx = limit_idx + 1,
        );

        let items = bind_values(
            sqlx::query_as::<_, TodoSearchRow>(&rows_query),
            &sql_filter.bind_values,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

        let count_query = format!(
            "SELECT COUNT(DISTINCT t.id) {FROM_JOINED} {}",
            sql_filter.where_clause
        );

        let total = bind_values_scalar(
            sqlx::query_scalar::<_, i64>(&count_query),
            &sql_filter.bind_values,
        )
        .fetch_optional(pool)
        .await?
        .unwrap_or(0);

        tracing::debug!(
            page = page.page(),
            size = page.size(),
            conditions = predicate.as_ref().map_or(0, Predicate::condition_count),
            returned = items.len(),
            total,
            "Todo search completed"
        );

        Ok(Page::new(items, page, total))
    }
}
