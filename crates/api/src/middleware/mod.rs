//! Request extractors for authentication.
//!
//! - [`auth::AuthUser`] -- Extracts the caller's identity from a JWT Bearer token.

pub mod auth;
