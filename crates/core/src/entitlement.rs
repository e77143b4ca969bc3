//! Entitlement rules for usage metering.
//!
//! A generation is allowed when the caller is the metered user and today's
//! count is below the tier's daily limit. The only way to obtain a
//! [`UsageGrant`], which the storage layer requires before it will bump a
//! counter, is [`authorize_increment`]. Storage adds its own guard for the
//! same invariant; see the `user_limits` migration.

use serde::Serialize;

use crate::error::CoreError;
use crate::subscription::{DailyLimit, Tier, TierLimits};
use crate::types::{UsageDate, UserId};

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Today's usage for one user against their tier's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageSnapshot {
    pub user_id: UserId,
    pub usage_date: UsageDate,
    pub tier: Tier,
    pub current_usage: i32,
    pub daily_limit: DailyLimit,
}

impl UsageSnapshot {
    /// Combine a stored count with the tier's limit.
    pub fn evaluate(
        user_id: UserId,
        usage_date: UsageDate,
        tier: Tier,
        limits: &TierLimits,
        current_usage: i32,
    ) -> Self {
        Self {
            user_id,
            usage_date,
            tier,
            current_usage,
            daily_limit: limits.for_tier(tier),
        }
    }

    pub fn can_generate(&self) -> bool {
        self.daily_limit.allows(self.current_usage)
    }

    pub fn remaining(&self) -> i32 {
        self.daily_limit.remaining(self.current_usage)
    }

    /// The same snapshot after a successful increment returned `new_count`.
    pub fn with_usage(self, new_count: i32) -> Self {
        Self {
            current_usage: new_count,
            ..self
        }
    }

    pub fn to_info(&self) -> UsageInfo {
        UsageInfo {
            current_usage: self.current_usage,
            daily_limit: self.daily_limit.as_wire(),
            remaining: self.remaining(),
            can_generate: self.can_generate(),
            subscription_tier: self.tier,
        }
    }
}

/// Wire shape of a limit check.
#[derive(Debug, Clone, Serialize)]
pub struct UsageInfo {
    pub current_usage: i32,
    pub daily_limit: i32,
    pub remaining: i32,
    pub can_generate: bool,
    pub subscription_tier: Tier,
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Reject access to another user's usage.
pub fn ensure_same_user(caller: UserId, target: UserId) -> Result<(), CoreError> {
    if caller != target {
        return Err(CoreError::Forbidden(
            "Usage can only be read or recorded for the signed-in user".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Grant
// ---------------------------------------------------------------------------

/// Capability to record one generation for one user on one day.
///
/// Fields are private and there is no public constructor, so holding a
/// grant proves the identity and quota checks ran.
#[derive(Debug)]
pub struct UsageGrant {
    user_id: UserId,
    usage_date: UsageDate,
    bound: Option<i32>,
}

impl UsageGrant {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn usage_date(&self) -> UsageDate {
        self.usage_date
    }

    /// The limit storage must re-check atomically, `None` when uncapped.
    pub fn bound(&self) -> Option<i32> {
        self.bound
    }
}

/// Authorize recording a generation for `snapshot.user_id`.
///
/// Fails with `Forbidden` if the caller is someone else and with
/// `QuotaExceeded` once the daily limit is reached, so a caller at the
/// limit never reaches the storage increment.
pub fn authorize_increment(
    caller: UserId,
    snapshot: &UsageSnapshot,
) -> Result<UsageGrant, CoreError> {
    ensure_same_user(caller, snapshot.user_id)?;

    if !snapshot.can_generate() {
        return Err(quota_exceeded(snapshot));
    }

    Ok(UsageGrant {
        user_id: snapshot.user_id,
        usage_date: snapshot.usage_date,
        bound: snapshot.daily_limit.as_bound(),
    })
}

/// The error reported when `snapshot` is at its limit.
pub fn quota_exceeded(snapshot: &UsageSnapshot) -> CoreError {
    CoreError::QuotaExceeded {
        current: snapshot.current_usage,
        limit: snapshot.daily_limit.as_wire(),
        tier: snapshot.tier,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
