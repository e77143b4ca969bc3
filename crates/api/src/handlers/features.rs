//! Handler for the advanced-feature gate.
//!
//! Unlike the rest of the API this endpoint answers with a bare
//! `{ allowed, ... }` object rather than the `{ data }` envelope, so clients
//! can branch on `allowed` directly.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use promptsmith_core::error::CoreError;
use promptsmith_core::prompt_builder::PromptConfig;
use promptsmith_core::subscription::{
    authorize_advanced_usage, AdvancedAccess, SubscriptionStatus, Tier,
};
use promptsmith_core::types::UserId;
use promptsmith_db::repositories::SubscriptionRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Message returned when a plan does not cover advanced mode.
pub const ADVANCED_REQUIRES_UPGRADE: &str =
    "Advanced features require Pro or Unlimited subscription";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeAdvancedRequest {
    pub uses_advanced_features: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeAdvancedResponse {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_tier: Option<String>,
}

fn tier_label(tier: Tier) -> String {
    tier.as_str().to_ascii_lowercase()
}

impl From<AdvancedAccess> for AuthorizeAdvancedResponse {
    fn from(access: AdvancedAccess) -> Self {
        match access {
            AdvancedAccess::Basic => Self {
                allowed: true,
                message: Some("Basic features allowed"),
                tier: None,
                error: None,
                current_tier: None,
            },
            AdvancedAccess::Granted(tier) => Self {
                allowed: true,
                message: None,
                tier: Some(tier_label(tier)),
                error: None,
                current_tier: None,
            },
            AdvancedAccess::Denied(tier) => Self {
                allowed: false,
                message: None,
                tier: None,
                error: Some(ADVANCED_REQUIRES_UPGRADE),
                current_tier: Some(tier_label(tier)),
            },
        }
    }
}

/// Reject `config` if it emits advanced-only fields that `status` does not
/// cover.
pub(crate) fn ensure_advanced_allowed(
    user_id: UserId,
    status: &SubscriptionStatus,
    config: &PromptConfig,
) -> AppResult<()> {
    if let AdvancedAccess::Denied(tier) =
        authorize_advanced_usage(status, config.uses_advanced_features())
    {
        tracing::info!(user_id = %user_id, tier = %tier, "Advanced features refused");
        return Err(AppError::Core(CoreError::Forbidden(
            ADVANCED_REQUIRES_UPGRADE.into(),
        )));
    }
    Ok(())
}

/// POST /api/v1/features/advanced/authorize
///
/// Returns 200 `{allowed: true}` when the request is basic or the plan
/// covers advanced mode, 403 `{allowed: false, error, currentTier}`
/// otherwise.
pub async fn authorize_advanced(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<AuthorizeAdvancedRequest>,
) -> AppResult<impl IntoResponse> {
    let access = if body.uses_advanced_features {
        let status = SubscriptionRepo::resolve(&state.pool, auth.user_id).await?;
        authorize_advanced_usage(&status, true)
    } else {
        AdvancedAccess::Basic
    };

    if let AdvancedAccess::Denied(tier) = access {
        tracing::info!(
            user_id = %auth.user_id,
            tier = %tier,
            "Advanced features refused"
        );
    }

    let status = if access.is_allowed() {
        StatusCode::OK
    } else {
        StatusCode::FORBIDDEN
    };

    Ok((status, Json(AuthorizeAdvancedResponse::from(access))))
}
