//! Route definitions for prompt assembly and the archive.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::prompts;
use crate::state::AppState;

/// Routes mounted at `/prompts`.
///
/// ```text
/// GET    /            -> list_prompts
/// POST   /preview     -> preview
/// GET    /random      -> random
/// POST   /generate    -> generate
/// GET    /{id}        -> get_prompt
/// DELETE /{id}        -> delete_prompt
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(prompts::list_prompts))
        .route("/preview", post(prompts::preview))
        .route("/random", get(prompts::random))
        .route("/generate", post(prompts::generate))
        .route(
            "/{id}",
            get(prompts::get_prompt).delete(prompts::delete_prompt),
        )
}
