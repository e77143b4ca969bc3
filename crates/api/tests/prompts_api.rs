//! HTTP-level integration tests for the catalog, prompt assembly, metered
//! generation, and the prompt archive.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, post_json, post_json_auth, user_token,
};
use promptsmith_core::subscription::Tier;
use promptsmith_db::models::subscription::UpsertSubscription;
use promptsmith_db::repositories::{PromptRepo, SubscriptionRepo};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const LANDSCAPE_MIDJOURNEY: &str =
    "paisagem, cyberpunk style, 8k resolution --ar 16:9 --v 6.0 --style raw --stylize 1000 --q 2";

fn landscape(platform: &str) -> Value {
    json!({
        "platform": platform,
        "subject": "Paisagem",
        "style": "Cyberpunk",
        "aspect_ratio": "16:9",
        "creativity": 80,
        "quality": "8K resolution",
    })
}

fn advanced_portrait() -> Value {
    json!({
        "platform": "midjourney",
        "subject": "Portrait",
        "artist": "Caravaggio",
        "lighting": "Candle light",
        "advanced_mode": true,
    })
}

async fn subscribe(pool: &PgPool, user: Uuid, tier: Tier) {
    SubscriptionRepo::upsert(
        pool,
        user,
        &UpsertSubscription {
            subscription_tier: tier,
            subscribed: true,
            subscription_end: None,
        },
    )
    .await
    .unwrap();
}

async fn generate(pool: &PgPool, token: &str, config: Value) -> axum::response::Response {
    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/api/v1/prompts/generate", json!({ "config": config }), token).await
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_catalog_is_public(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/catalog").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let platforms = json["data"]["platforms"].as_array().unwrap();
    assert_eq!(platforms.len(), 5);
    assert_eq!(platforms[0]["id"], "midjourney");
    assert!(!json["data"]["subjects"].as_array().unwrap().is_empty());
    assert!(!json["data"]["cameras"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/prompts/preview", landscape("midjourney")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_assembles_without_metering_or_saving(pool: PgPool) {
    let user = Uuid::new_v4();
    let token = user_token(user);

    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/v1/prompts/preview", landscape("midjourney"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["prompt"], LANDSCAPE_MIDJOURNEY);

    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/v1/prompts/preview", landscape("chatgpt"), &token).await;
    assert_eq!(
        body_json(response).await["data"]["prompt"],
        "Create an image of: paisagem, cyberpunk style, 8k resolution, with 8k resolution quality"
    );

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/usage/check",
        json!({ "p_user_id": user }),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["current_usage"], 0);
    assert_eq!(PromptRepo::count_for_user(&pool, user).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_rejects_out_of_range_creativity(pool: PgPool) {
    let token = user_token(Uuid::new_v4());
    let mut config = landscape("gemini");
    config["creativity"] = json!(150);

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/prompts/preview", config, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_of_advanced_fields_needs_paid_plan(pool: PgPool) {
    let user = Uuid::new_v4();
    let token = user_token(user);

    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/v1/prompts/preview", advanced_portrait(), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    subscribe(&pool, user, Tier::Pro).await;

    let app = common::build_test_app(pool);
    let response =
        post_json_auth(app, "/api/v1/prompts/preview", advanced_portrait(), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let prompt = body_json(response).await["data"]["prompt"].as_str().unwrap().to_string();
    assert!(prompt.contains(", by Caravaggio"), "got: {prompt}");
    assert!(prompt.contains("candle light lighting"), "got: {prompt}");
}

// ---------------------------------------------------------------------------
// Random
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_random_fills_descriptive_fields(pool: PgPool) {
    let token = user_token(Uuid::new_v4());
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/prompts/random?platform=gemini", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let config = &json["data"]["config"];
    assert_eq!(config["platform"], "gemini");
    assert!(!config["subject"].as_str().unwrap().is_empty());
    assert!(!config["style"].as_str().unwrap().is_empty());
    assert!(config["creativity"].as_u64().unwrap() <= 100);
    assert!(json["data"]["prompt"].as_str().unwrap().starts_with("Generate: "));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_random_advanced_mode_needs_paid_plan(pool: PgPool) {
    let user = Uuid::new_v4();
    let token = user_token(user);
    let uri = "/api/v1/prompts/random?platform=midjourney&advanced_mode=true";

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, uri, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");

    subscribe(&pool, user, Tier::Pro).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let prompt = body_json(response).await["data"]["prompt"].as_str().unwrap().to_string();
    assert!(prompt.contains(", by "), "got: {prompt}");
    assert!(prompt.contains("shot with "), "got: {prompt}");
}

// ---------------------------------------------------------------------------
// Generate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_generate_counts_and_archives(pool: PgPool) {
    let user = Uuid::new_v4();
    let token = user_token(user);

    let response = generate(&pool, &token, landscape("midjourney")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["prompt"], LANDSCAPE_MIDJOURNEY);
    assert_eq!(data["record"]["generated_prompt"], LANDSCAPE_MIDJOURNEY);
    assert_eq!(data["record"]["user_id"], user.to_string());
    assert_eq!(data["record"]["platform"], "midjourney");
    assert_eq!(data["usage"]["current_usage"], 1);
    assert_eq!(data["usage"]["remaining"], 9);
    assert_eq!(data["usage"]["can_generate"], true);

    assert_eq!(PromptRepo::count_for_user(&pool, user).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_generate_at_free_limit_returns_429(pool: PgPool) {
    let user = Uuid::new_v4();
    let token = user_token(user);

    for _ in 0..10 {
        let response = generate(&pool, &token, landscape("veo3")).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = generate(&pool, &token, landscape("veo3")).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let json = body_json(response).await;
    assert_eq!(json["code"], "QUOTA_EXCEEDED");
    assert_eq!(json["current_usage"], 10);
    assert_eq!(json["daily_limit"], 10);
    assert_eq!(json["upgrade_to"], "Pro");

    // The refused attempt is neither counted nor archived.
    assert_eq!(PromptRepo::count_for_user(&pool, user).await.unwrap(), 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_generate_advanced_on_free_plan_is_forbidden(pool: PgPool) {
    let user = Uuid::new_v4();
    let token = user_token(user);

    let response = generate(&pool, &token, advanced_portrait()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    assert_eq!(PromptRepo::count_for_user(&pool, user).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_advanced_mode_without_advanced_fields_is_basic(pool: PgPool) {
    let token = user_token(Uuid::new_v4());
    let mut config = landscape("leonardo");
    config["advanced_mode"] = json!(true);

    let response = generate(&pool, &token, config).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_generate_advanced_on_pro_plan(pool: PgPool) {
    let user = Uuid::new_v4();
    subscribe(&pool, user, Tier::Pro).await;
    let token = user_token(user);

    let response = generate(&pool, &token, advanced_portrait()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["data"]["prompt"].as_str().unwrap().contains("by Caravaggio"));
    assert_eq!(json["data"]["usage"]["daily_limit"], 100);
    assert_eq!(json["data"]["usage"]["subscription_tier"], "Pro");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_generate_for_another_user_is_rejected(pool: PgPool) {
    let token = user_token(Uuid::new_v4());
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/prompts/generate",
        json!({ "config": landscape("midjourney"), "user_id": Uuid::new_v4() }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Archive
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_is_owner_scoped_and_newest_first(pool: PgPool) {
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let alice_token = user_token(alice);

    for platform in ["midjourney", "leonardo", "gemini"] {
        generate(&pool, &alice_token, landscape(platform)).await;
    }
    generate(&pool, &user_token(bob), landscape("chatgpt")).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/prompts", &alice_token).await).await;
    let records = json["data"].as_array().unwrap();
    let platforms: Vec<_> = records.iter().map(|r| r["platform"].as_str().unwrap()).collect();
    assert_eq!(platforms, vec!["gemini", "leonardo", "midjourney"]);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/prompts?limit=1&offset=1", &alice_token).await).await;
    let page = json["data"].as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["platform"], "leonardo");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_and_delete_are_owner_scoped(pool: PgPool) {
    let owner = Uuid::new_v4();
    let owner_token = user_token(owner);
    let other_token = user_token(Uuid::new_v4());

    let json = body_json(generate(&pool, &owner_token, landscape("midjourney")).await).await;
    let id = json["data"]["record"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/prompts/{id}");

    let app = common::build_test_app(pool.clone());
    assert_eq!(get_auth(app, &uri, &other_token).await.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &uri, &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], id);

    let app = common::build_test_app(pool.clone());
    assert_eq!(delete_auth(app, &uri, &owner_token).await.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    assert_eq!(get_auth(app, &uri, &owner_token).await.status(), StatusCode::NOT_FOUND);
}
