//! Integration tests for the todo repositories against a real database:
//! - Eager owner join on single fetch
//! - Modification-ordered listing
//! - Weather / creation-range filter
//! - Keyword / nickname / date-range search with pagination and counts

use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use tasklane_core::date_range::DateRange;
use tasklane_core::pagination::PageRequest;
use tasklane_core::predicate::{TodoSearchFilter, WeatherFilter};
use tasklane_core::types::{DbId, Timestamp};
use tasklane_db::models::comment::CreateComment;
use tasklane_db::models::manager::CreateManager;
use tasklane_db::models::todo::{CreateTodo, Todo};
use tasklane_db::models::user::{CreateUser, User};
use tasklane_db::repositories::{CommentRepo, ManagerRepo, TodoRepo, TodoSearchRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn utc(y: i32, m: u32, d: u32) -> Timestamp {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn utc_at(y: i32, m: u32, d: u32, hour: u32) -> Timestamp {
    Utc.with_ymd_and_hms(y, m, d, hour, 0, 0).unwrap()
}

/// `[2024-01-01, 2024-01-31]` as parsed from request strings.
fn january_from_request() -> DateRange {
    DateRange::parse(Some("2024-01-01"), Some("2024-01-31"))
        .unwrap()
        .unwrap()
}

async fn create_user(pool: &PgPool, nickname: &str) -> User {
    let input = CreateUser {
        email: format!("{nickname}@test.com"),
        nickname: nickname.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        role: "USER".to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Insert a todo and backdate its creation time.
async fn create_todo(
    pool: &PgPool,
    owner: DbId,
    title: &str,
    weather: &str,
    created_at: Timestamp,
) -> Todo {
    let input = CreateTodo {
        title: title.to_string(),
        contents: format!("{title} contents"),
        weather: weather.to_string(),
        user_id: owner,
    };
    let todo = TodoRepo::create(pool, &input)
        .await
        .expect("todo creation should succeed");

    sqlx::query("UPDATE todos SET created_at = $2 WHERE id = $1")
        .bind(todo.id)
        .bind(created_at)
        .execute(pool)
        .await
        .expect("backdating should succeed");

    todo
}

async fn add_manager(pool: &PgPool, todo_id: DbId, user_id: DbId) {
    ManagerRepo::create(pool, &CreateManager { todo_id, user_id })
        .await
        .expect("manager creation should succeed");
}

async fn add_comment(pool: &PgPool, todo_id: DbId, user_id: DbId) {
    let input = CreateComment {
        todo_id,
        user_id,
        contents: "looks good".to_string(),
    };
    CommentRepo::create(pool, &input)
        .await
        .expect("comment creation should succeed");
}

fn page(page: i64, size: i64) -> PageRequest {
    PageRequest::new(page, size).unwrap()
}

fn titles<T>(rows: &[T], title: impl Fn(&T) -> &str) -> Vec<String> {
    rows.iter().map(|r| title(r).to_string()).collect()
}

// ---------------------------------------------------------------------------
// Single fetch with owner
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_id_with_user_returns_owner(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let todo = create_todo(&pool, alice.id, "Write docs", "Sunny", utc(2024, 1, 2)).await;

    let found = TodoRepo::find_by_id_with_user(&pool, todo.id)
        .await
        .unwrap()
        .expect("todo should exist");

    assert_eq!(found.title, "Write docs");
    assert_eq!(found.user_id, alice.id);
    assert_eq!(found.user_email.as_deref(), Some("alice@test.com"));
    assert_eq!(found.owner().id, alice.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_id_with_user_missing_is_none(pool: PgPool) {
    let found = TodoRepo::find_by_id_with_user(&pool, 999_999).await.unwrap();
    assert!(found.is_none());
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_page_orders_by_modification_desc(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let first = create_todo(&pool, alice.id, "First", "Sunny", utc(2024, 1, 1)).await;
    create_todo(&pool, alice.id, "Second", "Sunny", utc(2024, 1, 2)).await;

    // Touch the first todo so it becomes the most recently modified.
    sqlx::query("UPDATE todos SET contents = 'edited' WHERE id = $1")
        .bind(first.id)
        .execute(&pool)
        .await
        .unwrap();

    let result = TodoRepo::list_page(&pool, page(1, 10)).await.unwrap();

    assert_eq!(result.total, 2);
    assert_eq!(titles(&result.items, |t| t.title.as_str()), vec!["First", "Second"]);
}

// ---------------------------------------------------------------------------
// Weather / creation-range filter
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_matching_by_weather_and_range(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    create_todo(&pool, alice.id, "Picnic", "Sunny", utc(2024, 1, 10)).await;
    create_todo(&pool, alice.id, "Umbrella", "Rainy", utc(2024, 1, 11)).await;
    create_todo(&pool, alice.id, "Beach", "Sunny", utc(2024, 3, 1)).await;

    let sunny = WeatherFilter {
        weather: Some("Sunny".into()),
        created: None,
    };
    let rows = TodoRepo::find_matching(&pool, &sunny).await.unwrap();
    assert_eq!(rows.len(), 2);

    let sunny_in_january = WeatherFilter {
        weather: Some("Sunny".into()),
        created: Some(DateRange {
            start: utc(2024, 1, 1),
            end: utc(2024, 1, 31),
        }),
    };
    let rows = TodoRepo::find_matching(&pool, &sunny_in_january).await.unwrap();
    assert_eq!(titles(&rows, |t| t.title.as_str()), vec!["Picnic"]);

    let everything = TodoRepo::find_matching(&pool, &WeatherFilter::default())
        .await
        .unwrap();
    assert_eq!(everything.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_matching_excludes_later_on_end_day(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    create_todo(&pool, alice.id, "End midnight", "Sunny", utc(2024, 1, 31)).await;
    create_todo(&pool, alice.id, "End morning", "Sunny", utc_at(2024, 1, 31, 10)).await;

    let filter = WeatherFilter {
        weather: None,
        created: Some(january_from_request()),
    };
    let rows = TodoRepo::find_matching(&pool, &filter).await.unwrap();

    assert_eq!(titles(&rows, |t| t.title.as_str()), vec!["End midnight"]);
}

// ---------------------------------------------------------------------------
// Keyword / nickname / date-range search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_without_filters_returns_everything(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    for i in 0..5 {
        create_todo(&pool, alice.id, &format!("Task {i}"), "Sunny", utc(2024, 1, 1)).await;
    }

    let result = TodoSearchRepo::search(&pool, page(1, 3), &TodoSearchFilter::default())
        .await
        .unwrap();

    assert_eq!(result.total, 5);
    assert_eq!(result.items.len(), 3);
    assert_eq!(result.total_pages, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_by_keyword_is_case_sensitive(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    create_todo(&pool, alice.id, "Team meeting", "Sunny", utc(2024, 1, 15)).await;
    create_todo(&pool, alice.id, "Meeting notes", "Sunny", utc(2024, 1, 16)).await;
    create_todo(&pool, alice.id, "Lunch", "Sunny", utc(2024, 1, 17)).await;

    let filter = TodoSearchFilter {
        keyword: Some("meeting".into()),
        ..Default::default()
    };
    let result = TodoSearchRepo::search(&pool, page(1, 10), &filter).await.unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(titles(&result.items, |r| r.title.as_str()), vec!["Team meeting"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_keyword_treats_wildcards_literally(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    create_todo(&pool, alice.id, "100% done", "Sunny", utc(2024, 1, 1)).await;
    create_todo(&pool, alice.id, "1000 done", "Sunny", utc(2024, 1, 1)).await;

    let filter = TodoSearchFilter {
        keyword: Some("0%".into()),
        ..Default::default()
    };
    let result = TodoSearchRepo::search(&pool, page(1, 10), &filter).await.unwrap();

    assert_eq!(titles(&result.items, |r| r.title.as_str()), vec!["100% done"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_by_date_range_is_inclusive(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    create_todo(&pool, alice.id, "Before", "Sunny", utc(2023, 12, 31)).await;
    create_todo(&pool, alice.id, "On start", "Sunny", utc(2024, 1, 1)).await;
    create_todo(&pool, alice.id, "Middle", "Sunny", utc(2024, 1, 15)).await;
    create_todo(&pool, alice.id, "On end", "Sunny", utc(2024, 1, 31)).await;
    create_todo(&pool, alice.id, "After", "Sunny", utc(2024, 2, 1)).await;

    let filter = TodoSearchFilter {
        created: Some(DateRange {
            start: utc(2024, 1, 1),
            end: utc(2024, 1, 31),
        }),
        ..Default::default()
    };
    let result = TodoSearchRepo::search(&pool, page(1, 10), &filter).await.unwrap();

    assert_eq!(result.total, 3);
    assert_eq!(
        titles(&result.items, |r| r.title.as_str()),
        vec!["On start", "Middle", "On end"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_range_end_is_start_of_end_day(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    create_todo(&pool, alice.id, "End midnight", "Sunny", utc(2024, 1, 31)).await;
    create_todo(&pool, alice.id, "End morning", "Sunny", utc_at(2024, 1, 31, 10)).await;

    let filter = TodoSearchFilter {
        created: Some(january_from_request()),
        ..Default::default()
    };
    let result = TodoSearchRepo::search(&pool, page(1, 10), &filter).await.unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(titles(&result.items, |r| r.title.as_str()), vec!["End midnight"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_by_manager_nickname_counts_whole_collections(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let carol = create_user(&pool, "carol").await;

    let shared = create_todo(&pool, alice.id, "Shared", "Sunny", utc(2024, 1, 1)).await;
    add_manager(&pool, shared.id, bob.id).await;
    add_manager(&pool, shared.id, carol.id).await;
    add_comment(&pool, shared.id, bob.id).await;
    add_comment(&pool, shared.id, carol.id).await;
    add_comment(&pool, shared.id, alice.id).await;

    let solo = create_todo(&pool, alice.id, "Solo", "Sunny", utc(2024, 1, 2)).await;
    add_manager(&pool, solo.id, carol.id).await;

    let filter = TodoSearchFilter {
        nickname: Some("bo".into()),
        ..Default::default()
    };
    let result = TodoSearchRepo::search(&pool, page(1, 10), &filter).await.unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.items.len(), 1, "join fan-out must not duplicate a todo");
    let row = &result.items[0];
    assert_eq!(row.title, "Shared");
    assert_eq!(row.manager_count, 2);
    assert_eq!(row.total_comment, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_keyword_or_nickname(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;

    create_todo(&pool, alice.id, "Team meeting", "Sunny", utc(2024, 1, 1)).await;
    let managed = create_todo(&pool, alice.id, "Budget", "Sunny", utc(2024, 1, 2)).await;
    add_manager(&pool, managed.id, bob.id).await;
    create_todo(&pool, alice.id, "Lunch", "Sunny", utc(2024, 1, 3)).await;

    let filter = TodoSearchFilter {
        keyword: Some("meeting".into()),
        nickname: Some("bob".into()),
        created: None,
    };
    let result = TodoSearchRepo::search(&pool, page(1, 10), &filter).await.unwrap();

    assert_eq!(result.total, 2);
    assert_eq!(
        titles(&result.items, |r| r.title.as_str()),
        vec!["Team meeting", "Budget"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_pages_are_disjoint_and_ordered(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    for i in 0..7 {
        create_todo(&pool, alice.id, &format!("Task {i}"), "Sunny", utc(2024, 1, 1)).await;
    }
    let filter = TodoSearchFilter::default();

    let first = TodoSearchRepo::search(&pool, page(1, 3), &filter).await.unwrap();
    let second = TodoSearchRepo::search(&pool, page(2, 3), &filter).await.unwrap();
    let both = TodoSearchRepo::search(&pool, page(1, 6), &filter).await.unwrap();

    let mut union = titles(&first.items, |r| r.title.as_str());
    union.extend(titles(&second.items, |r| r.title.as_str()));

    assert_eq!(union, titles(&both.items, |r| r.title.as_str()));
    assert_eq!(first.total, 7);
    assert_eq!(second.total, 7);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_past_last_page_is_empty(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    create_todo(&pool, alice.id, "Only", "Sunny", utc(2024, 1, 1)).await;

    let result = TodoSearchRepo::search(&pool, page(5, 10), &TodoSearchFilter::default())
        .await
        .unwrap();

    assert!(result.items.is_empty());
    assert_eq!(result.total, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_keyword_within_january(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    create_todo(&pool, alice.id, "Team meeting", "Sunny", utc(2024, 1, 15)).await;
    create_todo(&pool, bob.id, "Lunch", "Sunny", utc(2024, 1, 10)).await;

    let filter = TodoSearchFilter {
        keyword: Some("meeting".into()),
        nickname: None,
        created: DateRange::parse(Some("2024-01-01"), Some("2024-01-31")).unwrap(),
    };
    let result = TodoSearchRepo::search(&pool, page(1, 10), &filter).await.unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(
        result.items,
        vec![tasklane_db::models::search::TodoSearchRow {
            title: "Team meeting".into(),
            manager_count: 0,
            total_comment: 0,
        }]
    );
}
