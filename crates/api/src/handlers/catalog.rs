//! Handler for the option catalog.

use axum::response::IntoResponse;
use axum::Json;
use promptsmith_core::catalog;

use crate::response::DataResponse;

/// GET /api/v1/catalog
///
/// Platforms and every option list. Public; the catalog is static.
pub async fn get_catalog() -> impl IntoResponse {
    Json(DataResponse {
        data: catalog::catalog(),
    })
}
