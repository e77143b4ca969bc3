pub mod catalog;
pub mod features;
pub mod prompts;
pub mod subscription;
pub mod usage;
