//! Todo filter predicates as an explicit expression tree.
//!
//! Filters are built from optional request inputs into a [`Predicate`] tree
//! that knows nothing about SQL. The repository layer renders the tree into a
//! parameterized `WHERE` clause, so the filter logic can be tested here
//! without a database.
//!
//! Each filter dimension ("predicate group") is an `Option<Predicate>`:
//! `None` means the dimension places no restriction on the result. Groups are
//! AND-combined; conditions inside a group are OR-combined.

use crate::date_range::{normalize_blank, DateRange};

/// A single leaf test against the todo / owner / manager-user graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Case-sensitive substring match on the todo title.
    TitleContains(String),
    /// Case-sensitive substring match on the nickname of a user attached to
    /// the todo as a manager.
    NicknameContains(String),
    /// Todo creation time within `[start, end]`, both bounds inclusive.
    CreatedBetween(DateRange),
    /// Exact match on the weather snapshot.
    WeatherEquals(String),
}

/// Boolean combination of [`Condition`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Condition(Condition),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    /// OR-fold the given predicates. `None` when there are none; a single
    /// predicate is returned as-is rather than wrapped.
    pub fn any_of(predicates: impl IntoIterator<Item = Predicate>) -> Option<Predicate> {
        fold(predicates, Predicate::Or)
    }

    /// AND-fold the given predicates with the same collapsing rules as
    /// [`Predicate::any_of`].
    pub fn all_of(predicates: impl IntoIterator<Item = Predicate>) -> Option<Predicate> {
        fold(predicates, Predicate::And)
    }

    /// Number of leaf conditions in the tree.
    pub fn condition_count(&self) -> usize {
        match self {
            Predicate::Condition(_) => 1,
            Predicate::And(children) | Predicate::Or(children) => {
                children.iter().map(Predicate::condition_count).sum()
            }
        }
    }
}

fn fold(
    predicates: impl IntoIterator<Item = Predicate>,
    combine: fn(Vec<Predicate>) -> Predicate,
) -> Option<Predicate> {
    let mut items: Vec<Predicate> = predicates.into_iter().collect();
    match items.len() {
        0 => None,
        1 => items.pop(),
        _ => Some(combine(items)),
    }
}

// ---------------------------------------------------------------------------
// Keyword / nickname / date-range search
// ---------------------------------------------------------------------------

/// Validated inputs of the keyword / nickname / date-range search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoSearchFilter {
    pub keyword: Option<String>,
    pub nickname: Option<String>,
    pub created: Option<DateRange>,
}

impl TodoSearchFilter {
    /// "Title contains keyword" OR "manager nickname contains nickname",
    /// over whichever of the two inputs is present and non-blank.
    pub fn keyword_or_nickname(&self) -> Option<Predicate> {
        let title = normalize_blank(self.keyword.as_deref())
            .map(|k| Predicate::Condition(Condition::TitleContains(k.to_string())));
        let nickname = normalize_blank(self.nickname.as_deref())
            .map(|n| Predicate::Condition(Condition::NicknameContains(n.to_string())));
        Predicate::any_of(title.into_iter().chain(nickname))
    }

    /// Creation time within the range, when a range is set.
    pub fn created_within(&self) -> Option<Predicate> {
        self.created.map(|range| Predicate::Condition(Condition::CreatedBetween(range)))
    }

    /// Both groups AND-combined. `None` means every todo matches.
    pub fn to_predicate(&self) -> Option<Predicate> {
        Predicate::all_of(
            self.keyword_or_nickname()
                .into_iter()
                .chain(self.created_within()),
        )
    }
}

// ---------------------------------------------------------------------------
// Weather / date-range filter
// ---------------------------------------------------------------------------

/// Validated inputs of the simple weather / date-range filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherFilter {
    pub weather: Option<String>,
    pub created: Option<DateRange>,
}

impl WeatherFilter {
    /// Weather equality AND creation range, over whichever is present.
    pub fn to_predicate(&self) -> Option<Predicate> {
        let weather = normalize_blank(self.weather.as_deref())
            .map(|w| Predicate::Condition(Condition::WeatherEquals(w.to_string())));
        let created = self
            .created
            .map(|range| Predicate::Condition(Condition::CreatedBetween(range)));
        Predicate::all_of(weather.into_iter().chain(created))
    }
}
