//! Subscription tiers, their daily limits, and advanced-feature gating.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Free plan: generations per day.
pub const DEFAULT_FREE_DAILY_LIMIT: i32 = 10;

/// Pro plan: generations per day.
pub const DEFAULT_PRO_DAILY_LIMIT: i32 = 100;

/// Wire value for "no limit".
pub const UNLIMITED_SENTINEL: i32 = -1;

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[default]
    Free,
    Pro,
    Unlimited,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Free => "Free",
            Tier::Pro => "Pro",
            Tier::Unlimited => "Unlimited",
        }
    }

    /// Parse a stored tier name, case-insensitively.
    ///
    /// Anything unrecognised resolves to [`Tier::Free`], matching how a
    /// missing subscription is treated.
    pub fn parse_lenient(raw: &str) -> Tier {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pro" => Tier::Pro,
            "unlimited" => Tier::Unlimited,
            _ => Tier::Free,
        }
    }

    /// Whether this tier unlocks artist, lighting, camera and negative prompt.
    pub fn allows_advanced(self) -> bool {
        matches!(self, Tier::Pro | Tier::Unlimited)
    }

    /// The next tier up, used for upgrade prompts.
    pub fn upgrade_target(self) -> Option<Tier> {
        match self {
            Tier::Free => Some(Tier::Pro),
            Tier::Pro => Some(Tier::Unlimited),
            Tier::Unlimited => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Daily generation cap for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyLimit {
    Limited(i32),
    Unlimited,
}

impl DailyLimit {
    /// Whether `current_usage` generations leave room for one more.
    pub fn allows(self, current_usage: i32) -> bool {
        match self {
            DailyLimit::Limited(limit) => current_usage < limit,
            DailyLimit::Unlimited => true,
        }
    }

    /// Generations left today, or [`UNLIMITED_SENTINEL`].
    pub fn remaining(self, current_usage: i32) -> i32 {
        match self {
            DailyLimit::Limited(limit) => (limit - current_usage).max(0),
            DailyLimit::Unlimited => UNLIMITED_SENTINEL,
        }
    }

    /// The cap as sent to clients, [`UNLIMITED_SENTINEL`] when uncapped.
    pub fn as_wire(self) -> i32 {
        match self {
            DailyLimit::Limited(limit) => limit,
            DailyLimit::Unlimited => UNLIMITED_SENTINEL,
        }
    }

    /// The cap as a storage bound, `None` when uncapped.
    pub fn as_bound(self) -> Option<i32> {
        match self {
            DailyLimit::Limited(limit) => Some(limit),
            DailyLimit::Unlimited => None,
        }
    }
}

/// Per-tier caps. Unlimited is always uncapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierLimits {
    pub free: i32,
    pub pro: i32,
}

impl Default for TierLimits {
    fn default() -> Self {
        Self {
            free: DEFAULT_FREE_DAILY_LIMIT,
            pro: DEFAULT_PRO_DAILY_LIMIT,
        }
    }
}

impl TierLimits {
    pub fn for_tier(&self, tier: Tier) -> DailyLimit {
        match tier {
            Tier::Free => DailyLimit::Limited(self.free),
            Tier::Pro => DailyLimit::Limited(self.pro),
            Tier::Unlimited => DailyLimit::Unlimited,
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// A user's resolved subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionStatus {
    pub subscribed: bool,
    pub subscription_tier: Tier,
    pub subscription_end: Option<Timestamp>,
}

impl Default for SubscriptionStatus {
    fn default() -> Self {
        Self {
            subscribed: false,
            subscription_tier: Tier::Free,
            subscription_end: None,
        }
    }
}

impl SubscriptionStatus {
    /// The tier whose limits apply. A lapsed paid plan meters as Free.
    pub fn effective_tier(&self) -> Tier {
        if self.subscribed {
            self.subscription_tier
        } else {
            Tier::Free
        }
    }

    pub fn has_advanced_access(&self) -> bool {
        self.subscribed && self.subscription_tier.allows_advanced()
    }
}

/// Outcome of an advanced-feature authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvancedAccess {
    /// Request does not touch advanced fields.
    Basic,
    /// Request uses advanced fields and the plan covers them.
    Granted(Tier),
    /// Request uses advanced fields the plan does not cover.
    Denied(Tier),
}

impl AdvancedAccess {
    pub fn is_allowed(self) -> bool {
        !matches!(self, AdvancedAccess::Denied(_))
    }
}

/// Decide whether a request may use advanced-mode fields.
pub fn authorize_advanced_usage(
    status: &SubscriptionStatus,
    uses_advanced_features: bool,
) -> AdvancedAccess {
    if !uses_advanced_features {
        return AdvancedAccess::Basic;
    }
    if status.has_advanced_access() {
        AdvancedAccess::Granted(status.subscription_tier)
    } else {
        AdvancedAccess::Denied(status.subscription_tier)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
