//! Handlers for daily usage metering.
//!
//! `check` is read-only. `increment` is the only endpoint that records a
//! generation outside `POST /prompts/generate`, and it goes through the
//! same grant the generation path uses.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use promptsmith_core::entitlement::{
    authorize_increment, ensure_same_user, quota_exceeded, UsageSnapshot,
};
use promptsmith_core::types::{usage_day, UserId};
use promptsmith_db::metering_guard;
use promptsmith_db::repositories::{SubscriptionRepo, UsageRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body shared by `check` and `increment`.
#[derive(Debug, Deserialize)]
pub struct UsageRequest {
    pub p_user_id: UserId,
}

/// Today's snapshot for `user_id`, evaluated against their effective tier.
async fn load_snapshot(state: &AppState, user_id: UserId) -> AppResult<UsageSnapshot> {
    let subscription = SubscriptionRepo::resolve(&state.pool, user_id).await?;
    let usage_date = usage_day();
    let current = UsageRepo::current_count(&state.pool, user_id, usage_date).await?;

    Ok(UsageSnapshot::evaluate(
        user_id,
        usage_date,
        subscription.effective_tier(),
        &state.config.tier_limits,
        current,
    ))
}

/// POST /api/v1/usage/check
///
/// `{current_usage, daily_limit, remaining, can_generate, subscription_tier}`
/// for the caller. `daily_limit` and `remaining` are `-1` when uncapped.
pub async fn check_limit(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<UsageRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_same_user(auth.user_id, body.p_user_id)?;

    let snapshot = load_snapshot(&state, body.p_user_id).await?;

    Ok(Json(DataResponse {
        data: snapshot.to_info(),
    }))
}

/// POST /api/v1/usage/increment
///
/// Record one generation for the caller and return the new count.
pub async fn increment_usage(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<UsageRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_same_user(auth.user_id, body.p_user_id)?;

    let snapshot = load_snapshot(&state, body.p_user_id).await?;
    let grant = authorize_increment(auth.user_id, &snapshot)?;

    let new_count = UsageRepo::increment(&state.pool, &grant)
        .await?
        .ok_or_else(|| {
            let at_limit = snapshot.with_usage(snapshot.daily_limit.as_wire());
            AppError::Core(quota_exceeded(&at_limit))
        })?;

    tracing::info!(
        user_id = %auth.user_id,
        usage_count = new_count,
        tier = %snapshot.tier,
        "Usage incremented"
    );

    Ok(Json(DataResponse { data: new_count }))
}

/// POST /api/v1/usage/self-test
///
/// Try direct writes against the caller's counters and report which ones
/// storage refused. Nothing is persisted.
pub async fn self_test(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let report = metering_guard::run(&state.pool, auth.user_id).await?;

    if !report.summary.all_tests_passed {
        tracing::warn!(
            user_id = %auth.user_id,
            failed = report.summary.failed,
            "Metering guard self-test found unguarded writes"
        );
    }

    Ok(Json(DataResponse { data: report }))
}
