//! Subscription rows (`subscribers`) and the billing upsert DTO.

use promptsmith_core::subscription::{SubscriptionStatus, Tier};
use promptsmith_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `subscribers` table.
///
/// The tier is stored as text written by the billing collaborator; use
/// [`Subscriber::status`] to get the typed view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscriber {
    pub id: DbId,
    pub user_id: UserId,
    pub subscription_tier: String,
    pub subscribed: bool,
    pub subscription_end: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subscriber {
    pub fn status(&self) -> SubscriptionStatus {
        SubscriptionStatus {
            subscribed: self.subscribed,
            subscription_tier: Tier::parse_lenient(&self.subscription_tier),
            subscription_end: self.subscription_end,
        }
    }
}

/// Billing sync payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertSubscription {
    pub subscription_tier: Tier,
    pub subscribed: bool,
    pub subscription_end: Option<Timestamp>,
}
