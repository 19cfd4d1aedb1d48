use std::fmt;

use serde::{Deserialize, Serialize};

/// What a soul is currently occupied with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Morning routine; assigned in the early hours regardless of traits.
    Routine,
    /// Generic daytime occupation; the fallback when no trait matches.
    Working,
    /// Making something; preferred by creative souls.
    Creating,
    /// Spending time with others; preferred by social souls.
    Socializing,
    /// Wandering the landscape; preferred by curious souls.
    Exploring,
    /// Night-time rest.
    Resting,
    /// Nothing in particular.
    Idle,
    /// A host-defined activity, preserved as-is.
    Custom(String),
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Routine => write!(f, "morning routine"),
            Self::Working => write!(f, "working"),
            Self::Creating => write!(f, "creating"),
            Self::Socializing => write!(f, "socializing"),
            Self::Exploring => write!(f, "exploring"),
            Self::Resting => write!(f, "resting"),
            Self::Idle => write!(f, "idle"),
            Self::Custom(s) => write!(f, "{s}"),
        }
    }
}

/// A soul's current activity with its remaining duration.
///
/// The label is what the UI shows next to the avatar; `remaining_secs` counts
/// down in simulated seconds and the behavior tick re-rolls the activity when
/// it reaches zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// The kind of activity.
    pub kind: ActivityKind,
    /// Human-readable label for display.
    pub label: String,
    /// Simulated seconds until the activity is re-selected.
    pub remaining_secs: f64,
}

impl ActivityRecord {
    /// Create a record for `kind` with its display label and duration.
    pub fn new(kind: ActivityKind, remaining_secs: f64) -> Self {
        let label = kind.to_string();
        Self {
            kind,
            label,
            remaining_secs,
        }
    }

    /// Count down by `delta_secs`. Returns `true` once expired.
    pub fn advance(&mut self, delta_secs: f64) -> bool {
        self.remaining_secs = (self.remaining_secs - delta_secs).max(0.0);
        self.remaining_secs <= 0.0
    }
}
