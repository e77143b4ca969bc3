//! Handlers for subscription state.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use promptsmith_core::types::UserId;
use promptsmith_db::models::subscription::UpsertSubscription;
use promptsmith_db::repositories::SubscriptionRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireService;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/subscription
///
/// The caller's plan. Users without a subscription row get an unsubscribed
/// Free plan.
pub async fn get_subscription(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let status = SubscriptionRepo::resolve(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse { data: status }))
}

/// PUT /api/v1/billing/subscriptions/{user_id}
///
/// Billing sync: create or overwrite a user's subscription. Service role only.
pub async fn upsert_subscription(
    State(state): State<AppState>,
    RequireService(service): RequireService,
    Path(user_id): Path<UserId>,
    Json(input): Json<UpsertSubscription>,
) -> AppResult<impl IntoResponse> {
    let subscriber = SubscriptionRepo::upsert(&state.pool, user_id, &input).await?;

    tracing::info!(
        user_id = %user_id,
        caller = %service.user_id,
        tier = %input.subscription_tier,
        subscribed = input.subscribed,
        "Subscription updated by billing sync"
    );

    Ok(Json(DataResponse { data: subscriber }))
}
