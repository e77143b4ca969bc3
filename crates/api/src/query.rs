//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Pagination parameters (`?limit=&offset=`).
///
/// Handlers clamp these with `promptsmith_core::pagination` before they
/// reach a repository.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
