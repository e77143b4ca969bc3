//! Archived prompt rows (`prompts`).

use promptsmith_core::catalog::Platform;
use promptsmith_core::prompt_builder::PromptConfig;
use promptsmith_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// An archived prompt: the options that produced it plus the text.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromptRecord {
    pub id: DbId,
    pub user_id: UserId,
    pub platform: String,
    pub subject: String,
    pub subject_details: String,
    pub style: String,
    pub artist: String,
    pub composition: String,
    pub aspect_ratio: String,
    pub mood: String,
    pub quality: String,
    pub lighting: String,
    pub camera: String,
    pub creativity_level: i16,
    pub negative_prompt: String,
    pub advanced_mode: bool,
    pub generated_prompt: String,
    pub created_at: Timestamp,
}

impl PromptRecord {
    /// Rebuild the config snapshot, e.g. to reload it into the editor.
    ///
    /// Returns `None` if the stored platform is no longer supported.
    pub fn to_config(&self) -> Option<PromptConfig> {
        Some(PromptConfig {
            platform: Platform::from_id(&self.platform)?,
            subject: self.subject.clone(),
            custom_details: self.subject_details.clone(),
            style: self.style.clone(),
            artist: self.artist.clone(),
            composition: self.composition.clone(),
            aspect_ratio: self.aspect_ratio.clone(),
            mood: self.mood.clone(),
            quality: self.quality.clone(),
            lighting: self.lighting.clone(),
            camera: self.camera.clone(),
            creativity: u8::try_from(self.creativity_level).ok()?,
            negative_prompt: self.negative_prompt.clone(),
            advanced_mode: self.advanced_mode,
        })
    }
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for archiving a freshly generated prompt.
#[derive(Debug, Clone)]
pub struct CreatePrompt<'a> {
    pub user_id: UserId,
    pub config: &'a PromptConfig,
    pub generated_prompt: &'a str,
}
