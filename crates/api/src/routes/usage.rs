//! Route definitions for usage metering.

use axum::routing::post;
use axum::Router;

use crate::handlers::usage;
use crate::state::AppState;

/// Routes mounted at `/usage`.
///
/// ```text
/// POST /check       -> check_limit
/// POST /increment   -> increment_usage
/// POST /self-test   -> self_test
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/check", post(usage::check_limit))
        .route("/increment", post(usage::increment_usage))
        .route("/self-test", post(usage::self_test))
}
