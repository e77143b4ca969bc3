pub mod features;
pub mod health;
pub mod prompts;
pub mod subscription;
pub mod usage;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /catalog                                 option catalog (public)
///
/// /prompts                                 list own archive
/// /prompts/preview                         assemble, unmetered (POST)
/// /prompts/random                          randomized config
/// /prompts/generate                        metered generation (POST)
/// /prompts/{id}                            get, delete own record
///
/// /usage/check                             today's usage vs limit (POST)
/// /usage/increment                         record one generation (POST)
/// /usage/self-test                         storage guard self-test (POST)
///
/// /features/advanced/authorize             advanced-mode gate (POST)
///
/// /subscription                            caller's plan
/// /billing/subscriptions/{user_id}         billing upsert (PUT, service role)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(handlers::catalog::get_catalog))
        .nest("/prompts", prompts::router())
        .nest("/usage", usage::router())
        .nest("/features", features::router())
        .nest("/subscription", subscription::router())
        .nest("/billing", subscription::billing_router())
}
