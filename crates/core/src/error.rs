use crate::subscription::Tier;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The daily generation limit for the caller's tier has been reached.
    #[error("Daily limit reached: {current} of {limit} prompts used on the {tier} plan")]
    QuotaExceeded { current: i32, limit: i32, tier: Tier },

    /// A write reached storage without going through the metering path.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
