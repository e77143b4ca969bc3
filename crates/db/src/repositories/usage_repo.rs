//! Repository for the `user_limits` table.
//!
//! Reads are unrestricted. The only write is [`UsageRepo::increment`],
//! which goes through the `increment_user_usage` SQL function and needs a
//! [`UsageGrant`] from the entitlement rules.

use promptsmith_core::entitlement::UsageGrant;
use promptsmith_core::types::{UsageDate, UserId};
use sqlx::PgExecutor;

use crate::models::usage::UsageRecord;

/// Column list for `user_limits` queries.
const COLUMNS: &str = "id, user_id, usage_date, usage_count, created_at, updated_at";

/// Read access and metered increments for daily usage counters.
pub struct UsageRepo;

impl UsageRepo {
    /// Find the counter row for `(user_id, usage_date)`, if one was created.
    pub async fn find<'e, E>(
        executor: E,
        user_id: UserId,
        usage_date: UsageDate,
    ) -> Result<Option<UsageRecord>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM user_limits WHERE user_id = $1 AND usage_date = $2"
        );
        sqlx::query_as::<_, UsageRecord>(&query)
            .bind(user_id)
            .bind(usage_date)
            .fetch_optional(executor)
            .await
    }

    /// Generations recorded for `(user_id, usage_date)`; zero when absent.
    pub async fn current_count<'e, E>(
        executor: E,
        user_id: UserId,
        usage_date: UsageDate,
    ) -> Result<i32, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE( \
                (SELECT usage_count FROM user_limits WHERE user_id = $1 AND usage_date = $2), \
                0)",
        )
        .bind(user_id)
        .bind(usage_date)
        .fetch_one(executor)
        .await
    }

    /// Record one generation. Returns the post-increment count, or `None`
    /// if the counter already reached the grant's bound.
    ///
    /// Creates the day's row on first use. The insert-or-increment is one
    /// statement, so concurrent calls never lose updates.
    pub async fn increment<'e, E>(
        executor: E,
        grant: &UsageGrant,
    ) -> Result<Option<i32>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let new_count = sqlx::query_scalar::<_, Option<i32>>(
            "SELECT increment_user_usage($1, $2, $3)",
        )
        .bind(grant.user_id())
        .bind(grant.usage_date())
        .bind(grant.bound())
        .fetch_one(executor)
        .await?;

        tracing::debug!(
            user_id = %grant.user_id(),
            usage_date = %grant.usage_date(),
            new_count = ?new_count,
            "Usage increment"
        );

        Ok(new_count)
    }
}
