//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20240101000001_create_users_table.sql`.

pub const ROLE_USER: &str = "USER";
pub const ROLE_ADMIN: &str = "ADMIN";

/// Check whether a role name is one the platform recognises.
pub fn is_valid_role(role: &str) -> bool {
    matches!(role, ROLE_USER | ROLE_ADMIN)
}
