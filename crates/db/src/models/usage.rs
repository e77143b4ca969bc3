//! Daily usage counter rows (`user_limits`).

use promptsmith_core::types::{DbId, Timestamp, UsageDate, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// One user's generation count for one UTC date.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UsageRecord {
    pub id: DbId,
    pub user_id: UserId,
    pub usage_date: UsageDate,
    pub usage_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
