//! Handlers for prompt assembly and the prompt archive.
//!
//! `preview` assembles without metering or saving and backs the editor's
//! live mode. `generate` is the metered path: quota check, assembly, then
//! the usage increment and archive insert in one transaction.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use promptsmith_core::archive::resolve_owner;
use promptsmith_core::catalog::{randomize, Platform};
use promptsmith_core::entitlement::{authorize_increment, quota_exceeded, UsageInfo, UsageSnapshot};
use promptsmith_core::error::CoreError;
use promptsmith_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use promptsmith_core::prompt_builder::{assemble, validate_config, PromptConfig};
use promptsmith_core::types::{usage_day, DbId, UserId};
use promptsmith_db::models::prompt::{CreatePrompt, PromptRecord};
use promptsmith_db::repositories::{PromptRepo, SubscriptionRepo, UsageRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::features::ensure_advanced_allowed;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Assembled text for a config.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub prompt: String,
}

/// Query parameters for `GET /prompts/random`.
#[derive(Debug, Default, Deserialize)]
pub struct RandomParams {
    pub platform: Option<Platform>,
    #[serde(default)]
    pub advanced_mode: bool,
}

#[derive(Debug, Serialize)]
pub struct RandomPromptResponse {
    pub config: PromptConfig,
    pub prompt: String,
}

/// Body of `POST /prompts/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub config: PromptConfig,
    /// Owner to save under. Omit for the signed-in user.
    #[serde(default)]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub prompt: String,
    pub record: PromptRecord,
    pub usage: UsageInfo,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// POST /api/v1/prompts/preview
///
/// Assemble a prompt without counting it or saving it.
pub async fn preview(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(config): Json<PromptConfig>,
) -> AppResult<impl IntoResponse> {
    validate_config(&config)?;
    if config.uses_advanced_features() {
        let subscription = SubscriptionRepo::resolve(&state.pool, auth.user_id).await?;
        ensure_advanced_allowed(auth.user_id, &subscription, &config)?;
    }

    Ok(Json(DataResponse {
        data: PreviewResponse {
            prompt: assemble(&config),
        },
    }))
}

/// GET /api/v1/prompts/random
///
/// A config with every descriptive field randomly picked from the catalog.
/// Asking for `advanced_mode` is gated on the caller's tier like `preview`.
pub async fn random(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<RandomParams>,
) -> AppResult<impl IntoResponse> {
    let mut config = PromptConfig {
        platform: params.platform.unwrap_or_default(),
        advanced_mode: params.advanced_mode,
        ..PromptConfig::default()
    };
    randomize(&mut config, &mut rand::rng());

    if config.uses_advanced_features() {
        let subscription = SubscriptionRepo::resolve(&state.pool, auth.user_id).await?;
        ensure_advanced_allowed(auth.user_id, &subscription, &config)?;
    }
    let prompt = assemble(&config);

    Ok(Json(DataResponse {
        data: RandomPromptResponse { config, prompt },
    }))
}

/// POST /api/v1/prompts/generate
///
/// Metered generation. Fails with 429 at the daily limit. The usage
/// increment and the archive insert commit together or not at all.
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    let config = body.config;
    validate_config(&config)?;
    let owner = resolve_owner(auth.user_id, body.user_id)?;

    let subscription = SubscriptionRepo::resolve(&state.pool, owner).await?;
    ensure_advanced_allowed(owner, &subscription, &config)?;

    // 1. Quota check.
    let usage_date = usage_day();
    let current = UsageRepo::current_count(&state.pool, owner, usage_date).await?;
    let snapshot = UsageSnapshot::evaluate(
        owner,
        usage_date,
        subscription.effective_tier(),
        &state.config.tier_limits,
        current,
    );
    let grant = authorize_increment(auth.user_id, &snapshot).inspect_err(|_| {
        tracing::info!(
            user_id = %owner,
            current_usage = snapshot.current_usage,
            tier = %snapshot.tier,
            "Generation refused at daily limit"
        );
    })?;

    // 2. Assemble.
    let prompt = assemble(&config);

    // 3 + 4. Count and archive atomically.
    let mut tx = state.pool.begin().await?;

    let new_count = UsageRepo::increment(&mut *tx, &grant).await?.ok_or_else(|| {
        // Another request took the last slot after our check.
        let at_limit = snapshot.with_usage(snapshot.daily_limit.as_wire());
        AppError::Core(quota_exceeded(&at_limit))
    })?;

    let record = PromptRepo::create(
        &mut *tx,
        &CreatePrompt {
            user_id: owner,
            config: &config,
            generated_prompt: &prompt,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        user_id = %owner,
        prompt_id = record.id,
        platform = %config.platform,
        usage_count = new_count,
        "Prompt generated",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: GenerateResponse {
                prompt,
                record,
                usage: snapshot.with_usage(new_count).to_info(),
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Archive
// ---------------------------------------------------------------------------

/// GET /api/v1/prompts
///
/// The caller's archive, newest first.
pub async fn list_prompts(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let records = PromptRepo::list_for_user(&state.pool, auth.user_id, limit, offset).await?;

    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/prompts/{id}
pub async fn get_prompt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = PromptRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id,
        }))?;

    Ok(Json(DataResponse { data: record }))
}

/// DELETE /api/v1/prompts/{id}
///
/// 204 on success. A prompt owned by someone else is reported as 404 and
/// left untouched.
pub async fn delete_prompt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PromptRepo::delete_for_user(&state.pool, id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id,
        }));
    }

    tracing::info!(user_id = %auth.user_id, prompt_id = id, "Prompt deleted");
    Ok(StatusCode::NO_CONTENT)
}
