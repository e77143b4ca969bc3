//! Row structs and DTOs.
//!
//! Each submodule pairs a `FromRow` entity matching a table with the
//! input types its repository accepts.

pub mod prompt;
pub mod subscription;
pub mod usage;
