//! Rendering of [`Predicate`] trees into parameterized SQL.
//!
//! Column references assume the todo table is aliased `t` and, for
//! nickname conditions, the manager's user table is aliased `u`.

use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::Postgres;
use tasklane_core::predicate::{Condition, Predicate};
use tasklane_core::types::Timestamp;

/// Typed bind value for dynamically-built todo queries.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BindValue {
    Text(String),
    Timestamp(Timestamp),
}

/// A rendered `WHERE` clause and the values its placeholders refer to.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SqlFilter {
    /// Empty when there is no restriction, otherwise starts with `WHERE `.
    pub where_clause: String,
    pub bind_values: Vec<BindValue>,
}

impl SqlFilter {
    /// Index of the next free `$n` placeholder after this filter's binds.
    pub fn next_bind_idx(&self) -> usize {
        self.bind_values.len() + 1
    }
}

/// Build a `WHERE` clause from an optional predicate. `None` renders as no
/// clause at all, so every row matches.
pub(crate) fn build_filter(predicate: Option<&Predicate>) -> SqlFilter {
    let mut bind_values = Vec::new();
    let where_clause = match predicate {
        Some(p) => format!("WHERE {}", render(p, &mut bind_values)),
        None => String::new(),
    };
    SqlFilter {
        where_clause,
        bind_values,
    }
}

fn render(predicate: &Predicate, binds: &mut Vec<BindValue>) -> String {
    match predicate {
        Predicate::Condition(condition) => render_condition(condition, binds),
        Predicate::And(children) => render_group(children, " AND ", binds),
        Predicate::Or(children) => render_group(children, " OR ", binds),
    }
}

fn render_group(children: &[Predicate], joiner: &str, binds: &mut Vec<BindValue>) -> String {
    let parts: Vec<String> = children.iter().map(|c| render(c, binds)).collect();
    format!("({})", parts.join(joiner))
}

fn render_condition(condition: &Condition, binds: &mut Vec<BindValue>) -> String {
    match condition {
        Condition::TitleContains(keyword) => {
            let idx = push(binds, BindValue::Text(contains_pattern(keyword)));
            format!("t.title LIKE ${idx} ESCAPE '\\'")
        }
        Condition::NicknameContains(nickname) => {
            let idx = push(binds, BindValue::Text(contains_pattern(nickname)));
            format!("u.nickname LIKE ${idx} ESCAPE '\\'")
        }
        Condition::CreatedBetween(range) => {
            let start = push(binds, BindValue::Timestamp(range.start));
            let end = push(binds, BindValue::Timestamp(range.end));
            format!("t.created_at BETWEEN ${start} AND ${end}")
        }
        Condition::WeatherEquals(weather) => {
            let idx = push(binds, BindValue::Text(weather.clone()));
            format!("t.weather = ${idx}")
        }
    }
}

/// Append a bind value and return its 1-based placeholder index.
fn push(binds: &mut Vec<BindValue>, value: BindValue) -> usize {
    binds.push(value);
    binds.len()
}

/// `%needle%` with LIKE metacharacters in the needle escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
pub(crate) fn bind_values<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    bind_values: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
pub(crate) fn bind_values_scalar<'q, O>(
    mut q: QueryScalar<'q, Postgres, O, PgArguments>,
    bind_values: &'q [BindValue],
) -> QueryScalar<'q, Postgres, O, PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}
