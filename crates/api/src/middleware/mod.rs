//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`rbac::RequireService`] -- Requires the `service_role` role.

pub mod auth;
pub mod rbac;
