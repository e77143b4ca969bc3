//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Methods that may run inside a caller's transaction take any
//! `PgExecutor`; the rest take `&PgPool`.

pub mod prompt_repo;
pub mod subscription_repo;
pub mod usage_repo;

pub use prompt_repo::PromptRepo;
pub use subscription_repo::SubscriptionRepo;
pub use usage_repo::UsageRepo;
