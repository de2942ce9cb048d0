//! Domain building blocks shared by the repository and API layers.
//!
//! Nothing in this crate performs I/O: it holds the error type, id and
//! timestamp aliases, date-range validation, the todo filter predicate tree,
//! and pagination arithmetic.

pub mod date_range;
pub mod error;
pub mod pagination;
pub mod predicate;
pub mod roles;
pub mod types;
