use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::terrain::HeightField;

/// The camera's three operating states, cycled Follow → Front → Overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Behind and above the focused soul, driven entirely by its motion.
    Follow,
    /// In front of and above the focused soul, same terrain rules as Follow.
    Front,
    /// Fixed high wide view of the whole world; user controls enabled.
    Overview,
}

impl ViewMode {
    /// The next mode in the cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Follow => Self::Front,
            Self::Front => Self::Overview,
            Self::Overview => Self::Follow,
        }
    }
}

/// Which user inputs the host should honor in the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlPermissions {
    /// Orbit/rotate input enabled.
    pub rotate: bool,
    /// Zoom input enabled.
    pub zoom: bool,
    /// Pan input enabled.
    pub pan: bool,
}

impl ControlPermissions {
    /// Permissions for a view mode: everything in Overview, nothing in the
    /// agent-driven modes.
    pub fn for_mode(mode: ViewMode) -> Self {
        let enabled = mode == ViewMode::Overview;
        Self {
            rotate: enabled,
            zoom: enabled,
            pan: enabled,
        }
    }
}

/// Camera rig tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraParams {
    /// Horizontal distance behind the soul in Follow mode.
    pub follow_distance: f32,
    /// Height above the soul in Follow mode.
    pub follow_height: f32,
    /// Horizontal distance ahead of the soul in Front mode.
    pub front_distance: f32,
    /// Height above the soul in Front mode.
    pub front_height: f32,
    /// How far above the soul's position the camera looks.
    pub look_at_height: f32,
    /// Minimum camera height above the terrain directly beneath it.
    pub min_clearance: f32,
    /// Fixed camera position in Overview mode.
    pub overview_position: Vec3,
    /// Fixed look-at target in Overview mode.
    pub overview_target: Vec3,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            follow_distance: 6.0,
            follow_height: 3.2,
            front_distance: 5.0,
            front_height: 2.8,
            look_at_height: 1.4,
            min_clearance: 1.5,
            overview_position: Vec3::new(0.0, 90.0, 110.0),
            overview_target: Vec3::ZERO,
        }
    }
}

/// Focused-soul pose the rig tracks: live position and yaw.
#[derive(Debug, Clone, Copy)]
pub struct FocusPose {
    /// The soul's current world position.
    pub position: Vec3,
    /// The soul's orientation around the vertical axis, radians.
    pub yaw: f32,
}

/// Camera transform for this frame, handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSnapshot {
    /// World-space camera position.
    pub position: Vec3,
    /// World-space look-at target.
    pub look_at: Vec3,
    /// Which user inputs are honored this frame.
    pub permissions: ControlPermissions,
}

/// Finite-state camera controller.
///
/// Follow and Front re-target the focused soul every tick, keeping a minimum
/// clearance above the terrain under the camera. Overview is placed once per
/// mode entry and then left to user input. Mode switches are immediate cuts;
/// smoothing belongs to the rendering layer. Without a focused soul the rig
/// falls back to Overview and refuses the agent-driven modes.
#[derive(Debug, Clone)]
pub struct CameraRig {
    mode: ViewMode,
    position: Vec3,
    look_at: Vec3,
    overview_placed: bool,
    params: CameraParams,
}

impl CameraRig {
    /// Create a rig in Follow mode when a focused soul exists, otherwise
    /// Overview.
    pub fn new(params: CameraParams, has_focus: bool) -> Self {
        let mode = if has_focus {
            ViewMode::Follow
        } else {
            ViewMode::Overview
        };
        Self {
            mode,
            position: params.overview_position,
            look_at: params.overview_target,
            overview_placed: false,
            params,
        }
    }

    /// The active view mode.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Advance to the next mode in the cycle. Without a focused soul every
    /// request lands on Overview. Returns the mode actually entered.
    pub fn cycle_mode(&mut self, has_focus: bool) -> ViewMode {
        self.set_mode(self.mode.next(), has_focus)
    }

    /// Request a specific mode. Follow/Front require a focused soul; the rig
    /// substitutes Overview otherwise. Returns the mode actually entered.
    pub fn set_mode(&mut self, requested: ViewMode, has_focus: bool) -> ViewMode {
        let effective = if has_focus { requested } else { ViewMode::Overview };
        if effective != self.mode {
            self.mode = effective;
            self.overview_placed = false;
        }
        self.mode
    }

    /// Apply a user-driven transform. Only honored in Overview, where the
    /// controls are enabled.
    pub fn set_user_transform(&mut self, position: Vec3, look_at: Vec3) {
        if self.mode == ViewMode::Overview {
            self.position = position;
            self.look_at = look_at;
        }
    }

    /// Recompute the transform for this tick from the focused soul's fresh
    /// pose. Called after all agents have updated.
    pub fn update(&mut self, focus: Option<FocusPose>, terrain: &HeightField) {
        let Some(focus) = focus else {
            // Missing focused soul: fall back to Overview until one exists.
            if self.mode != ViewMode::Overview {
                self.mode = ViewMode::Overview;
                self.overview_placed = false;
            }
            self.place_overview();
            return;
        };

        match self.mode {
            ViewMode::Follow => {
                let offset = Vec3::new(
                    -focus.yaw.sin() * self.params.follow_distance,
                    self.params.follow_height,
                    -focus.yaw.cos() * self.params.follow_distance,
                );
                self.place_tracking(focus, offset, terrain);
            }
            ViewMode::Front => {
                let offset = Vec3::new(
                    focus.yaw.sin() * self.params.front_distance,
                    self.params.front_height,
                    focus.yaw.cos() * self.params.front_distance,
                );
                self.place_tracking(focus, offset, terrain);
            }
            ViewMode::Overview => self.place_overview(),
        }
    }

    /// This frame's camera output.
    pub fn snapshot(&self) -> CameraSnapshot {
        CameraSnapshot {
            position: self.position,
            look_at: self.look_at,
            permissions: ControlPermissions::for_mode(self.mode),
        }
    }

    fn place_tracking(&mut self, focus: FocusPose, offset: Vec3, terrain: &HeightField) {
        let mut position = focus.position + offset;
        let ground = terrain.height(position.x, position.z);
        position.y = position.y.max(ground + self.params.min_clearance);
        self.position = position;
        self.look_at = focus.position + Vec3::Y * self.params.look_at_height;
    }

    fn place_overview(&mut self) {
        if !self.overview_placed {
            self.position = self.params.overview_position;
            self.look_at = self.params.overview_target;
            self.overview_placed = true;
        }
    }
}
