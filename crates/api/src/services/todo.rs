//! Todo application service.
//!
//! Turns raw request inputs into validated domain values, runs the matching
//! repository read or write, and shapes the result into response payloads.
//! Handlers stay thin and only deal with extraction and the response envelope.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tasklane_core::date_range::DateRange;
use tasklane_core::error::CoreError;
use tasklane_core::pagination::{Page, PageRequest};
use tasklane_core::predicate::{TodoSearchFilter, WeatherFilter};
use tasklane_core::types::{DbId, Timestamp};
use tasklane_db::models::search::TodoSearchRow;
use tasklane_db::models::todo::{CreateTodo, TodoWithUser};
use tasklane_db::models::user::UserProfile;
use tasklane_db::repositories::{TodoRepo, TodoSearchRepo};
use validator::{Validate, ValidationError};

use super::validation_error;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::weather::WeatherProvider;

/// Message for a simple filter that matched nothing.
pub const MSG_NO_MATCHING_TODOS: &str = "no todos matched the given filter";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/v1/todos`.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveTodoRequest {
    #[validate(custom(function = not_blank, message = "title must not be blank"))]
    pub title: String,
    #[validate(custom(function = not_blank, message = "contents must not be blank"))]
    pub contents: String,
}

/// A freshly created todo.
#[derive(Debug, Serialize)]
pub struct SavedTodo {
    pub id: DbId,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user: UserProfile,
}

/// A todo with its owner and timestamps, used by list / detail / filter.
#[derive(Debug, Serialize)]
pub struct TodoSummary {
    pub id: DbId,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user: UserProfile,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<TodoWithUser> for TodoSummary {
    fn from(row: TodoWithUser) -> Self {
        let user = row.owner();
        Self {
            id: row.id,
            title: row.title,
            contents: row.contents,
            weather: row.weather,
            user,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Query parameters of the simple weather / date-range filter.
#[derive(Debug, Default, Deserialize)]
pub struct FilterTodoParams {
    pub weather: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Query parameters of the keyword / nickname / date-range search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchTodoParams {
    pub keyword: Option<String>,
    pub nickname: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl FilterTodoParams {
    /// Validate the raw parameters into a [`WeatherFilter`].
    pub fn to_filter(&self) -> Result<WeatherFilter, CoreError> {
        Ok(WeatherFilter {
            weather: self.weather.clone(),
            created: DateRange::parse(self.start_date.as_deref(), self.end_date.as_deref())?,
        })
    }
}

impl SearchTodoParams {
    /// Validate the raw parameters into a [`TodoSearchFilter`].
    pub fn to_filter(&self) -> Result<TodoSearchFilter, CoreError> {
        Ok(TodoSearchFilter {
            keyword: self.keyword.clone(),
            nickname: self.nickname.clone(),
            created: DateRange::parse(self.start_date.as_deref(), self.end_date.as_deref())?,
        })
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Todo operations over a pool and a weather source.
pub struct TodoService<'a> {
    pool: &'a PgPool,
    weather: &'a dyn WeatherProvider,
}

impl<'a> TodoService<'a> {
    pub fn new(pool: &'a PgPool, weather: &'a dyn WeatherProvider) -> Self {
        Self { pool, weather }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(&state.pool, state.weather.as_ref())
    }

    /// Create a todo owned by `caller`, stamped with today's weather.
    ///
    /// The weather lookup and the insert share one transaction; if either
    /// fails the transaction is dropped without commit.
    pub async fn create(&self, caller: &AuthUser, input: SaveTodoRequest) -> AppResult<SavedTodo> {
        input.validate().map_err(validation_error)?;

        let mut tx = self.pool.begin().await?;

        let weather = self.weather.today_weather().await?;

        let todo = TodoRepo::create(
            &mut *tx,
            &CreateTodo {
                title: input.title,
                contents: input.contents,
                weather,
                user_id: caller.user_id,
            },
        )
        .await?;

        tx.commit().await?;

        tracing::info!(todo_id = todo.id, user_id = caller.user_id, "Todo created");

        Ok(SavedTodo {
            id: todo.id,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            user: caller.profile(),
        })
    }

    /// One page of todos, most recently modified first.
    pub async fn list(&self, page: PageRequest) -> AppResult<Page<TodoSummary>> {
        let rows = TodoRepo::list_page(self.pool, page).await?;
        Ok(rows.map(TodoSummary::from))
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<TodoSummary> {
        let row = TodoRepo::find_by_id_with_user(self.pool, id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Todo", id })?;
        Ok(row.into())
    }

    /// Todos matching weather and/or creation range. Matching nothing is an
    /// error rather than an empty list.
    pub async fn search_by_simple_filter(
        &self,
        params: &FilterTodoParams,
    ) -> AppResult<Vec<TodoSummary>> {
        let filter = params.to_filter()?;

        let rows = TodoRepo::find_matching(self.pool, &filter).await?;
        if rows.is_empty() {
            tracing::debug!(?filter, "Simple filter matched no todos");
            return Err(CoreError::InvalidArgument(MSG_NO_MATCHING_TODOS.into()).into());
        }

        Ok(rows.into_iter().map(TodoSummary::from).collect())
    }

    /// Paginated keyword / nickname / date-range search. No matches yields
    /// an empty page.
    pub async fn search_by_keyword_and_nickname(
        &self,
        page: PageRequest,
        params: &SearchTodoParams,
    ) -> AppResult<Page<TodoSearchRow>> {
        let filter = params.to_filter()?;
        Ok(TodoSearchRepo::search(self.pool, page, &filter).await?)
    }
}
