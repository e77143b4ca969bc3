//! Static option catalog: the selectable values for every prompt field and
//! the fixed set of target platforms.
//!
//! The lists are compiled in and never change at runtime.

use std::fmt;
use std::str::FromStr;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::prompt_builder::PromptConfig;

// ---------------------------------------------------------------------------
// Option lists
// ---------------------------------------------------------------------------

pub const SUBJECTS: &[&str] = &[
    "Pessoa",
    "Animal",
    "Paisagem",
    "Objeto",
    "Arquitetura",
    "Veículo",
    "Fantasia",
    "Sci-fi",
    "Natureza",
    "Retrato",
    "Cena urbana",
    "Espaço",
];

pub const STYLES: &[&str] = &[
    "Fotorrealista",
    "Pintura a óleo",
    "Aquarela",
    "Arte digital",
    "Anime",
    "Cartoon",
    "3D render",
    "Pixel art",
    "Impressionista",
    "Surrealista",
    "Cyberpunk",
    "Steampunk",
    "Art nouveau",
    "Pop art",
    "Minimalista",
];

pub const ARTISTS: &[&str] = &[
    "Monet",
    "Van Gogh",
    "Picasso",
    "Da Vinci",
    "Dali",
    "Banksy",
    "Hokusai",
    "Klimt",
    "Basquiat",
    "Pollock",
    "Warhol",
    "Caravaggio",
];

pub const COMPOSITIONS: &[&str] = &[
    "Close-up",
    "Plano médio",
    "Plano geral",
    "Vista aérea",
    "Ângulo baixo",
    "Ângulo alto",
    "Regra dos terços",
    "Simetria",
    "Perspectiva isométrica",
    "Profundidade de campo rasa",
    "Grande angular",
    "Macro",
];

pub const ASPECT_RATIOS: &[&str] = &["1:1", "16:9", "9:16", "4:3", "3:4", "21:9", "2:3"];

pub const MOODS: &[&str] = &[
    "Alegre",
    "Melancólico",
    "Dramático",
    "Sereno",
    "Misterioso",
    "Energético",
    "Romântico",
    "Sombrio",
    "Vibrante",
    "Nostálgico",
    "Épico",
    "Íntimo",
];

pub const QUALITIES: &[&str] = &[
    "Ultra detalhado",
    "Alta qualidade",
    "Cinematic",
    "Professional",
    "8K resolution",
    "HDR",
    "Hyperrealistic",
    "Artstation trending",
    "Award winning",
    "Masterpiece",
];

pub const LIGHTINGS: &[&str] = &[
    "Natural",
    "Golden hour",
    "Blue hour",
    "Dramatic",
    "Soft",
    "Hard",
    "Neon",
    "Candle light",
    "Studio lighting",
    "Volumetric",
];

pub const CAMERAS: &[&str] = &[
    "Canon EOS R5",
    "Sony A7R IV",
    "Nikon D850",
    "Fuji GFX 100S",
    "Hasselblad X2D",
    "Leica Q2",
    "Phase One XF",
    "RED Komodo",
];

/// Default aspect ratio for a fresh config.
pub const DEFAULT_ASPECT_RATIO: &str = "1:1";

/// Exclusive upper bound for a randomized creativity value.
const RANDOM_CREATIVITY_BOUND: u8 = 100;

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// A prompt field backed by a catalog list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionField {
    Subject,
    Style,
    Artist,
    Composition,
    AspectRatio,
    Mood,
    Quality,
    Lighting,
    Camera,
}

/// The selectable values for `field`.
pub fn options(field: OptionField) -> &'static [&'static str] {
    match field {
        OptionField::Subject => SUBJECTS,
        OptionField::Style => STYLES,
        OptionField::Artist => ARTISTS,
        OptionField::Composition => COMPOSITIONS,
        OptionField::AspectRatio => ASPECT_RATIOS,
        OptionField::Mood => MOODS,
        OptionField::Quality => QUALITIES,
        OptionField::Lighting => LIGHTINGS,
        OptionField::Camera => CAMERAS,
    }
}

// ---------------------------------------------------------------------------
// Platforms
// ---------------------------------------------------------------------------

/// A target generation platform. Each has its own prompt syntax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Midjourney,
    Leonardo,
    Veo3,
    Chatgpt,
    Gemini,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Midjourney,
        Platform::Leonardo,
        Platform::Veo3,
        Platform::Chatgpt,
        Platform::Gemini,
    ];

    /// Stable identifier used on the wire and in the archive.
    pub fn id(self) -> &'static str {
        match self {
            Platform::Midjourney => "midjourney",
            Platform::Leonardo => "leonardo",
            Platform::Veo3 => "veo3",
            Platform::Chatgpt => "chatgpt",
            Platform::Gemini => "gemini",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Midjourney => "Midjourney",
            Platform::Leonardo => "Leonardo.ai",
            Platform::Veo3 => "Veo 3",
            Platform::Chatgpt => "ChatGPT (DALL-E 3)",
            Platform::Gemini => "Gemini (Imagen 3)",
        }
    }

    /// Gradient accent as `(from, to)` colour names.
    pub fn accent(self) -> (&'static str, &'static str) {
        match self {
            Platform::Midjourney => ("purple-500", "pink-500"),
            Platform::Leonardo => ("blue-500", "cyan-500"),
            Platform::Veo3 => ("green-500", "teal-500"),
            Platform::Chatgpt => ("emerald-500", "blue-500"),
            Platform::Gemini => ("orange-500", "red-500"),
        }
    }

    pub fn from_id(id: &str) -> Option<Platform> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::from_id(s).ok_or_else(|| format!("Unknown platform '{s}'"))
    }
}

/// Serializable description of a platform for the catalog endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub accent_from: &'static str,
    pub accent_to: &'static str,
}

impl From<Platform> for PlatformInfo {
    fn from(p: Platform) -> Self {
        let (accent_from, accent_to) = p.accent();
        Self {
            id: p.id(),
            name: p.display_name(),
            accent_from,
            accent_to,
        }
    }
}

/// The five supported platforms in display order.
pub fn platforms() -> Vec<PlatformInfo> {
    Platform::ALL.into_iter().map(PlatformInfo::from).collect()
}

/// Full catalog snapshot, served to clients building the option pickers.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub platforms: Vec<PlatformInfo>,
    pub subjects: &'static [&'static str],
    pub styles: &'static [&'static str],
    pub artists: &'static [&'static str],
    pub compositions: &'static [&'static str],
    pub aspect_ratios: &'static [&'static str],
    pub moods: &'static [&'static str],
    pub qualities: &'static [&'static str],
    pub lightings: &'static [&'static str],
    pub cameras: &'static [&'static str],
}

pub fn catalog() -> Catalog {
    Catalog {
        platforms: platforms(),
        subjects: SUBJECTS,
        styles: STYLES,
        artists: ARTISTS,
        compositions: COMPOSITIONS,
        aspect_ratios: ASPECT_RATIOS,
        moods: MOODS,
        qualities: QUALITIES,
        lightings: LIGHTINGS,
        cameras: CAMERAS,
    }
}

// ---------------------------------------------------------------------------
// Randomizer
// ---------------------------------------------------------------------------

fn pick<R: Rng + ?Sized>(list: &[&str], rng: &mut R) -> String {
    list.choose(rng).map(|s| (*s).to_string()).unwrap_or_default()
}

/// Fill every catalog-backed descriptive field with a random value.
///
/// Platform, custom details, aspect ratio, negative prompt, and the
/// advanced flag are left as they are.
pub fn randomize<R: Rng + ?Sized>(config: &mut PromptConfig, rng: &mut R) {
    config.subject = pick(SUBJECTS, rng);
    config.style = pick(STYLES, rng);
    config.artist = pick(ARTISTS, rng);
    config.composition = pick(COMPOSITIONS, rng);
    config.mood = pick(MOODS, rng);
    config.quality = pick(QUALITIES, rng);
    config.lighting = pick(LIGHTINGS, rng);
    config.camera = pick(CAMERAS, rng);
    config.creativity = rng.random_range(0..RANDOM_CREATIVITY_BOUND);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
