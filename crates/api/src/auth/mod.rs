//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 access-token validation (and issuance for tooling/tests).

pub mod jwt;
