//! Well-known role claim values.
//!
//! These match the `role` claim minted by the identity provider.

/// A signed-in end user.
pub const ROLE_AUTHENTICATED: &str = "authenticated";

/// Trusted backend collaborators (billing sync).
pub const ROLE_SERVICE: &str = "service_role";
