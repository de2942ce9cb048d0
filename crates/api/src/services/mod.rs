//! Application services sitting between handlers and repositories.

pub mod todo;

use tasklane_core::error::CoreError;
use validator::ValidationErrors;

/// Flatten `validator` output into a single [`CoreError::Validation`].
pub(crate) fn validation_error(errors: ValidationErrors) -> CoreError {
    CoreError::Validation(errors.to_string())
}
