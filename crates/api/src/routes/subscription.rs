//! Route definitions for subscription state.
//!
//! Two routers are provided:
//! - `router()` for the caller's own plan, mounted at `/subscription`
//! - `billing_router()` for the billing sync, mounted at `/billing`

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::subscription;
use crate::state::AppState;

/// ```text
/// GET /   -> get_subscription
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(subscription::get_subscription))
}

/// ```text
/// PUT /subscriptions/{user_id}   -> upsert_subscription (service role)
/// ```
pub fn billing_router() -> Router<AppState> {
    Router::new().route(
        "/subscriptions/{user_id}",
        put(subscription::upsert_subscription),
    )
}
