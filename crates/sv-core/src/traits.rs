use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A personality-trait tag attached to a soul.
///
/// Traits drive activity selection and display colors. Unknown tags are kept
/// as `Custom(String)` so rosters authored elsewhere never fail to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalityTrait {
    /// Drawn to making things; prefers creating during the day.
    Creative,
    /// Seeks out company; prefers socializing during the day.
    Social,
    /// Investigates the world; prefers exploring.
    Curious,
    /// Even-tempered and unhurried.
    Calm,
    /// Restless; ranges farther from the center than most.
    Adventurous,
    /// An unrecognized trait tag, preserved as-is.
    Custom(String),
}

impl PersonalityTrait {
    /// Parse a trait from its lowercase tag form.
    pub fn parse(s: &str) -> Self {
        match s {
            "creative" => Self::Creative,
            "social" => Self::Social,
            "curious" => Self::Curious,
            "calm" => Self::Calm,
            "adventurous" => Self::Adventurous,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for PersonalityTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Creative => write!(f, "creative"),
            Self::Social => write!(f, "social"),
            Self::Curious => write!(f, "curious"),
            Self::Calm => write!(f, "calm"),
            Self::Adventurous => write!(f, "adventurous"),
            Self::Custom(s) => write!(f, "{s}"),
        }
    }
}

/// Fixed trait→color table. The first entry of `traits` that matches a known
/// trait decides the color; souls with only custom traits get the default.
pub fn display_color(traits: &[PersonalityTrait]) -> Color {
    traits
        .iter()
        .find_map(trait_color)
        .unwrap_or(DEFAULT_SOUL_COLOR)
}

/// Fallback display color for souls with no recognized trait.
pub const DEFAULT_SOUL_COLOR: Color = Color::rgb(0.62, 0.65, 0.70);

fn trait_color(t: &PersonalityTrait) -> Option<Color> {
    match t {
        PersonalityTrait::Creative => Some(Color::rgb(0.72, 0.35, 0.88)),
        PersonalityTrait::Social => Some(Color::rgb(0.95, 0.60, 0.20)),
        PersonalityTrait::Curious => Some(Color::rgb(0.25, 0.78, 0.76)),
        PersonalityTrait::Calm => Some(Color::rgb(0.35, 0.55, 0.92)),
        PersonalityTrait::Adventurous => Some(Color::rgb(0.88, 0.30, 0.32)),
        PersonalityTrait::Custom(_) => None,
    }
}
