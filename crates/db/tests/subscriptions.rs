//! Integration tests for subscription resolution and the billing upsert.

use chrono::{Duration, Utc};
use promptsmith_core::subscription::{SubscriptionStatus, Tier};
use promptsmith_db::models::subscription::UpsertSubscription;
use promptsmith_db::repositories::SubscriptionRepo;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_row_resolves_to_free(pool: PgPool) {
    let status = SubscriptionRepo::resolve(&pool, Uuid::new_v4()).await.unwrap();
    assert_eq!(status, SubscriptionStatus::default());
    assert_eq!(status.effective_tier(), Tier::Free);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upsert_creates_then_overwrites(pool: PgPool) {
    let user = Uuid::new_v4();
    let end = Utc::now() + Duration::days(30);

    let created = SubscriptionRepo::upsert(
        &pool,
        user,
        &UpsertSubscription {
            subscription_tier: Tier::Pro,
            subscribed: true,
            subscription_end: Some(end),
        },
    )
    .await
    .unwrap();
    assert_eq!(created.subscription_tier, "Pro");

    let status = SubscriptionRepo::resolve(&pool, user).await.unwrap();
    assert!(status.subscribed);
    assert_eq!(status.subscription_tier, Tier::Pro);
    assert!(status.has_advanced_access());

    let updated = SubscriptionRepo::upsert(
        &pool,
        user,
        &UpsertSubscription {
            subscription_tier: Tier::Pro,
            subscribed: false,
            subscription_end: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.id, created.id, "upsert must not add a second row");
    assert!(updated.updated_at >= created.updated_at);

    let status = SubscriptionRepo::resolve(&pool, user).await.unwrap();
    assert!(!status.subscribed);
    assert_eq!(status.effective_tier(), Tier::Free);
    assert!(!status.has_advanced_access());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stored_tier_text_is_parsed_leniently(pool: PgPool) {
    let user = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO subscribers (user_id, subscription_tier, subscribed) VALUES ($1, 'UNLIMITED', true)",
    )
    .bind(user)
    .execute(&pool)
    .await
    .unwrap();

    let status = SubscriptionRepo::resolve(&pool, user).await.unwrap();
    assert_eq!(status.subscription_tier, Tier::Unlimited);
}
