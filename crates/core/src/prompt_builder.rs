//! Prompt assembly.
//!
//! [`assemble`] turns a [`PromptConfig`] into the final text for the chosen
//! platform. It is pure and total: empty fields are skipped, nothing fails.
//! Input limits are enforced separately by [`validate_config`] at the API
//! boundary.

use serde::{Deserialize, Serialize};

use crate::catalog::{Platform, DEFAULT_ASPECT_RATIO};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Creativity slider upper bound (inclusive).
pub const MAX_CREATIVITY: u8 = 100;

/// Slider position of a fresh config.
pub const DEFAULT_CREATIVITY: u8 = 50;

/// Maximum length of the free-text details, in characters.
pub const MAX_DETAILS_LENGTH: usize = 2_000;

/// Maximum length of the negative prompt, in characters.
pub const MAX_NEGATIVE_PROMPT_LENGTH: usize = 1_000;

/// Maximum length of any single catalog-backed field.
pub const MAX_OPTION_LENGTH: usize = 100;

/// Midjourney: above this creativity the stylize flag is added.
const MIDJOURNEY_STYLIZE_THRESHOLD: u8 = 70;

/// Leonardo: above this creativity a guidance scale is appended.
const LEONARDO_GUIDANCE_THRESHOLD: u8 = 60;

/// Veo: above this creativity creative mode is requested.
const VEO_CREATIVE_THRESHOLD: u8 = 50;

/// Gemini: above this creativity enhanced creativity is requested.
const GEMINI_CREATIVE_THRESHOLD: u8 = 60;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Everything the user picked for one prompt.
///
/// Catalog-backed fields hold a catalog value or any free-form string; the
/// empty string means "not set".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub platform: Platform,
    pub subject: String,
    pub custom_details: String,
    pub style: String,
    /// Honored only in advanced mode.
    pub artist: String,
    pub composition: String,
    pub aspect_ratio: String,
    pub mood: String,
    pub quality: String,
    /// Honored only in advanced mode.
    pub lighting: String,
    /// Honored only in advanced mode.
    pub camera: String,
    pub creativity: u8,
    /// Honored only in advanced mode.
    pub negative_prompt: String,
    pub advanced_mode: bool,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            subject: String::new(),
            custom_details: String::new(),
            style: String::new(),
            artist: String::new(),
            composition: String::new(),
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            mood: String::new(),
            quality: String::new(),
            lighting: String::new(),
            camera: String::new(),
            creativity: DEFAULT_CREATIVITY,
            negative_prompt: String::new(),
            advanced_mode: false,
        }
    }
}

impl PromptConfig {
    /// Whether assembling this config would emit any advanced-only field.
    ///
    /// Advanced mode with every advanced field empty assembles exactly like
    /// basic mode, so it does not need a paid tier.
    pub fn uses_advanced_features(&self) -> bool {
        self.advanced_mode
            && [
                &self.artist,
                &self.lighting,
                &self.camera,
                &self.negative_prompt,
            ]
            .iter()
            .any(|f| !f.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn check_len(name: &str, value: &str, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::Validation(format!(
            "{name} exceeds maximum length of {max} characters (got {len})"
        )));
    }
    Ok(())
}

/// Validate user input bounds before assembly.
pub fn validate_config(config: &PromptConfig) -> Result<(), CoreError> {
    if config.creativity > MAX_CREATIVITY {
        return Err(CoreError::Validation(format!(
            "Creativity must be between 0 and {MAX_CREATIVITY} (got {})",
            config.creativity
        )));
    }

    check_len("Custom details", &config.custom_details, MAX_DETAILS_LENGTH)?;
    check_len(
        "Negative prompt",
        &config.negative_prompt,
        MAX_NEGATIVE_PROMPT_LENGTH,
    )?;

    for (name, value) in [
        ("Subject", &config.subject),
        ("Style", &config.style),
        ("Artist", &config.artist),
        ("Composition", &config.composition),
        ("Aspect ratio", &config.aspect_ratio),
        ("Mood", &config.mood),
        ("Quality", &config.quality),
        ("Lighting", &config.lighting),
        ("Camera", &config.camera),
    ] {
        check_len(name, value, MAX_OPTION_LENGTH)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Build the descriptive part of the prompt shared by every platform.
fn base_phrase(config: &PromptConfig) -> String {
    let mut prompt = String::new();
    let advanced = config.advanced_mode;

    if !config.subject.is_empty() {
        prompt.push_str(&config.subject.to_lowercase());
    }

    if !config.custom_details.is_empty() {
        if !prompt.is_empty() {
            prompt.push_str(", ");
        }
        prompt.push_str(&config.custom_details);
    }

    if !config.style.is_empty() {
        prompt.push_str(&format!(", {} style", config.style.to_lowercase()));
    }

    if advanced && !config.artist.is_empty() {
        prompt.push_str(&format!(", by {}", config.artist));
    }

    if !config.mood.is_empty() {
        prompt.push_str(&format!(", {} mood", config.mood.to_lowercase()));
    }

    if !config.composition.is_empty() {
        prompt.push_str(&format!(", {}", config.composition.to_lowercase()));
    }

    if !config.quality.is_empty() {
        prompt.push_str(&format!(", {}", config.quality.to_lowercase()));
    }

    if advanced && !config.lighting.is_empty() {
        prompt.push_str(&format!(", {} lighting", config.lighting.to_lowercase()));
    }

    if advanced && !config.camera.is_empty() {
        prompt.push_str(&format!(", shot with {}", config.camera));
    }

    prompt
}

/// Apply the platform's syntax to the base phrase.
fn apply_platform(config: &PromptConfig, mut prompt: String) -> String {
    let creativity = config.creativity;

    match config.platform {
        Platform::Midjourney => {
            if !config.aspect_ratio.is_empty() {
                prompt.push_str(&format!(" --ar {}", config.aspect_ratio));
            }
            prompt.push_str(" --v 6.0 --style raw");
            if creativity > MIDJOURNEY_STYLIZE_THRESHOLD {
                prompt.push_str(" --stylize 1000");
            }
            if !config.quality.is_empty() {
                prompt.push_str(" --q 2");
            }
            prompt
        }
        Platform::Leonardo => {
            prompt.push_str(" [Alchemy, High Quality]");
            if creativity > LEONARDO_GUIDANCE_THRESHOLD {
                // Nearest tenth, halves rounding up.
                let scale = (u32::from(creativity) + 5) / 10;
                prompt.push_str(&format!(" [Guidance Scale: {scale}]"));
            }
            prompt
        }
        Platform::Veo3 => {
            prompt.push_str(" [Video: 5s duration, smooth motion]");
            if creativity > VEO_CREATIVE_THRESHOLD {
                prompt.push_str(" [Creative mode]");
            }
            prompt
        }
        Platform::Chatgpt => {
            let mut rewritten = format!("Create an image of: {prompt}");
            if !config.quality.is_empty() {
                rewritten.push_str(&format!(
                    ", with {} quality",
                    config.quality.to_lowercase()
                ));
            }
            rewritten
        }
        Platform::Gemini => {
            let mut rewritten = format!("Generate: {prompt}");
            if creativity > GEMINI_CREATIVE_THRESHOLD {
                rewritten.push_str(", enhanced creativity mode");
            }
            rewritten
        }
    }
}

/// Assemble the final prompt text for `config`.
pub fn assemble(config: &PromptConfig) -> String {
    let mut prompt = apply_platform(config, base_phrase(config));

    if config.advanced_mode && !config.negative_prompt.is_empty() {
        prompt.push_str(&format!(" --no {}", config.negative_prompt));
    }

    prompt.trim().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
