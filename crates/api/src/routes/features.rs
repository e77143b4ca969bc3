use axum::routing::post;
use axum::Router;

use crate::handlers::features;
use crate::state::AppState;

/// Routes mounted at `/features`.
///
/// ```text
/// POST /advanced/authorize   -> authorize_advanced
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/advanced/authorize", post(features::authorize_advanced))
}
