//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - Any join or projection rows read alongside the entity

pub mod comment;
pub mod manager;
pub mod search;
pub mod todo;
pub mod user;
