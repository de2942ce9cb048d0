//! Shared query parameter types for API handlers.

use serde::Deserialize;
use tasklane_core::error::CoreError;
use tasklane_core::pagination::PageRequest;

/// 1-based pagination parameters (`?page=&size=`).
///
/// Missing values fall back to the defaults in `tasklane_core::pagination`;
/// out-of-range values are rejected rather than clamped.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl PageParams {
    pub fn to_request(&self) -> Result<PageRequest, CoreError> {
        PageRequest::from_params(self.page, self.size)
    }
}
