use std::fmt;

use chrono::{DateTime, Utc};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::activity::{ActivityKind, ActivityRecord};
use crate::color::Color;
use crate::traits::{self, PersonalityTrait};

/// Unique identifier for every soul in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoulId(pub Uuid);

impl SoulId {
    /// Generate a new random soul ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SoulId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SoulId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Roster-load input for one soul, as supplied by the external data loader.
///
/// Seeds carry identity and traits only; live state (position, orientation,
/// activity) is assigned by the population planner when the roster loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoulSeed {
    /// Stable identity of the soul.
    pub id: SoulId,
    /// Display name.
    pub name: String,
    /// Handle shown alongside the name.
    pub username: String,
    /// Personality-trait tags. Must be non-empty.
    pub traits: Vec<PersonalityTrait>,
    /// Whether this is the soul the camera and UI center on.
    pub is_focused: bool,
    /// Creator wallet reference, display-only metadata.
    pub creator_wallet: Option<String>,
}

impl SoulSeed {
    /// Create a seed with a fresh ID and the given name/username.
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: SoulId::new(),
            name: name.into(),
            username: username.into(),
            traits: Vec::new(),
            is_focused: false,
            creator_wallet: None,
        }
    }

    /// Add a trait tag, parsed from its string form.
    pub fn with_trait(mut self, tag: &str) -> Self {
        self.traits.push(PersonalityTrait::parse(tag));
        self
    }

    /// Mark this seed as the focused soul.
    pub fn focused(mut self) -> Self {
        self.is_focused = true;
        self
    }

    /// Attach a creator wallet reference.
    pub fn with_wallet(mut self, wallet: impl Into<String>) -> Self {
        self.creator_wallet = Some(wallet.into());
        self
    }
}

/// A live soul inhabiting the world.
///
/// Created from a [`SoulSeed`] when the roster loads, mutated every tick by
/// the behavior simulation, and dropped when the session ends. The `y`
/// component of `position` is always kept consistent with the terrain height
/// field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Soul {
    /// Stable identity of the soul.
    pub id: SoulId,
    /// Display name.
    pub name: String,
    /// Handle shown alongside the name.
    pub username: String,
    /// Personality-trait tags, non-empty.
    pub traits: Vec<PersonalityTrait>,
    /// Whether this is the soul the camera and UI center on.
    pub is_focused: bool,
    /// Live world position; `y` tracks terrain height plus eye height.
    pub position: Vec3,
    /// Orientation around the vertical axis, radians.
    pub yaw: f32,
    /// Display color derived from the trait table.
    pub color: Color,
    /// Current activity and its remaining duration.
    pub activity: ActivityRecord,
    /// Creator wallet reference, display-only; never mutated here.
    pub creator_wallet: Option<String>,
    /// Wall-clock creation timestamp, display-only.
    pub created_at: DateTime<Utc>,
}

impl Soul {
    /// Build a live soul from a seed. Position, orientation, and activity
    /// start at neutral defaults; the planner overwrites them on placement.
    pub fn from_seed(seed: SoulSeed) -> Self {
        let color = traits::display_color(&seed.traits);
        Self {
            id: seed.id,
            name: seed.name,
            username: seed.username,
            traits: seed.traits,
            is_focused: seed.is_focused,
            position: Vec3::ZERO,
            yaw: 0.0,
            color,
            activity: ActivityRecord::new(ActivityKind::Idle, 0.0),
            creator_wallet: seed.creator_wallet,
            created_at: Utc::now(),
        }
    }

    /// Whether the soul carries the given trait.
    pub fn has_trait(&self, t: &PersonalityTrait) -> bool {
        self.traits.contains(t)
    }
}
