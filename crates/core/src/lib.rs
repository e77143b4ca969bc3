//! Domain logic for the PromptSmith backend.
//!
//! Everything here is storage- and transport-agnostic: the option catalog,
//! the prompt assembler, subscription tiers, and the entitlement rules that
//! guard usage metering.

pub mod archive;
pub mod catalog;
pub mod entitlement;
pub mod error;
pub mod pagination;
pub mod prompt_builder;
pub mod roles;
pub mod subscription;
pub mod types;
