use glam::Vec3;
use serde::{Deserialize, Serialize};
use sv_core::{Color, Soul, SoulId};

use crate::camera::CameraSnapshot;
use crate::clock::ClockReadout;
use crate::lighting::LightingSnapshot;

/// One agent's render-facing state for this frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    /// The soul this row describes.
    pub id: SoulId,
    /// World position, `y` consistent with the terrain.
    pub position: Vec3,
    /// Orientation around the vertical axis, radians.
    pub yaw: f32,
    /// Label of the current activity, for the UI marker.
    pub activity_label: String,
    /// Display color from the trait table.
    pub color: Color,
}

impl AgentSnapshot {
    /// Capture a soul's current render-facing state.
    pub fn of(soul: &Soul) -> Self {
        Self {
            id: soul.id,
            position: soul.position,
            yaw: soul.yaw,
            activity_label: soul.activity.label.clone(),
            color: soul.color,
        }
    }
}

/// Everything the rendering layer needs for one frame.
///
/// Produced at the end of every tick, after the clock, every agent, and the
/// camera have updated in that order, so all parts describe the same tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Per-agent rows, in roster order. Empty when no roster is loaded.
    pub agents: Vec<AgentSnapshot>,
    /// This frame's lighting parameters.
    pub lighting: LightingSnapshot,
    /// This frame's camera transform and control permissions.
    pub camera: CameraSnapshot,
    /// Displayed clock, refreshed only when the displayed minute changes.
    pub clock: ClockReadout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_core::SoulSeed;

    #[test]
    fn agent_snapshot_captures_soul() {
        let mut soul = Soul::from_seed(SoulSeed::new("Aki", "aki").with_trait("social"));
        soul.position = Vec3::new(1.0, 2.0, 3.0);
        soul.yaw = 0.5;
        let snap = AgentSnapshot::of(&soul);
        assert_eq!(snap.id, soul.id);
        assert_eq!(snap.position, soul.position);
        assert_eq!(snap.activity_label, soul.activity.label);
        assert_eq!(snap.color, soul.color);
    }

    #[test]
    fn agent_snapshot_serializes() {
        let soul = Soul::from_seed(SoulSeed::new("Aki", "aki").with_trait("calm"));
        let snap = AgentSnapshot::of(&soul);
        let json = serde_json::to_string(&snap).unwrap();
        let back: AgentSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }
}
