//! Repository for the `subscribers` table.

use promptsmith_core::subscription::SubscriptionStatus;
use promptsmith_core::types::UserId;
use sqlx::PgPool;

use crate::models::subscription::{Subscriber, UpsertSubscription};

/// Column list for `subscribers` queries.
const COLUMNS: &str = "id, user_id, subscription_tier, subscribed, subscription_end, \
    created_at, updated_at";

/// Reads subscription state and applies billing updates.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// The most recently updated subscription row for a user.
    pub async fn find_latest(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscribers \
             WHERE user_id = $1 \
             ORDER BY updated_at DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a user's subscription, defaulting to an unsubscribed Free plan.
    pub async fn resolve(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<SubscriptionStatus, sqlx::Error> {
        Ok(Self::find_latest(pool, user_id)
            .await?
            .map(|s| s.status())
            .unwrap_or_default())
    }

    /// Create or overwrite a user's subscription. Refreshes `updated_at`.
    pub async fn upsert(
        pool: &PgPool,
        user_id: UserId,
        input: &UpsertSubscription,
    ) -> Result<Subscriber, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscribers (user_id, subscription_tier, subscribed, subscription_end) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id) DO UPDATE \
             SET subscription_tier = EXCLUDED.subscription_tier, \
                 subscribed = EXCLUDED.subscribed, \
                 subscription_end = EXCLUDED.subscription_end, \
                 updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(user_id)
            .bind(input.subscription_tier.as_str())
            .bind(input.subscribed)
            .bind(input.subscription_end)
            .fetch_one(pool)
            .await
    }
}
