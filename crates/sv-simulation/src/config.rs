use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::behavior::BehaviorParams;
use crate::camera::CameraParams;
use crate::error::{SimError, SimResult};
use crate::terrain::TerrainParams;

/// Smallest accepted world side length.
pub const MIN_WORLD_SIZE: f32 = 16.0;
/// Largest accepted world side length.
pub const MAX_WORLD_SIZE: f32 = 4096.0;

/// Configuration for a simulation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed for deterministic runs.
    pub seed: u64,
    /// Side length of the square world, centered on the origin.
    pub world_size: f32,
    /// Simulated minutes that pass per real second.
    pub time_speed: f64,
    /// In-world day the clock starts on (1-based).
    pub start_day: u32,
    /// Fractional hour of day the clock starts at, `0.0..24.0`.
    pub start_hour: f64,
    /// Maximum terrain-height delta an agent will step across. Tunable; the
    /// value is not derived from physics.
    pub max_climb: f32,
    /// Vertical offset from ground to an agent's anchor point.
    pub eye_height: f32,
    /// Radius around world center that roam targets are drawn from.
    pub roam_radius: f32,
    /// Movement behavior tuning.
    pub behavior: BehaviorParams,
    /// Camera rig tuning.
    pub camera: CameraParams,
    /// Terrain formula tuning.
    pub terrain: TerrainParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_size: 100.0,
            time_speed: 1.0,
            start_day: 1,
            start_hour: 8.0,
            max_climb: 1.2,
            eye_height: 0.9,
            roam_radius: 28.0,
            behavior: BehaviorParams::default(),
            camera: CameraParams::default(),
            terrain: TerrainParams::default(),
        }
    }
}

impl SimConfig {
    /// Set the RNG seed for deterministic runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the world side length.
    pub fn with_world_size(mut self, size: f32) -> Self {
        self.world_size = size;
        self
    }

    /// Set the simulated minutes per real second.
    pub fn with_time_speed(mut self, speed: f64) -> Self {
        self.time_speed = speed;
        self
    }

    /// Set the clock's starting day and fractional hour.
    pub fn with_start_time(mut self, day: u32, hour: f64) -> Self {
        self.start_day = day;
        self.start_hour = hour;
        self
    }

    /// Set the maximum climbable terrain-height delta.
    pub fn with_max_climb(mut self, max_climb: f32) -> Self {
        self.max_climb = max_climb;
        self
    }

    /// Set the roam radius targets are drawn from.
    pub fn with_roam_radius(mut self, radius: f32) -> Self {
        self.roam_radius = radius;
        self
    }

    /// Validate all parameters, reporting the first violation.
    pub fn validate(&self) -> SimResult<()> {
        if !self.world_size.is_finite()
            || !(MIN_WORLD_SIZE..=MAX_WORLD_SIZE).contains(&self.world_size)
        {
            return Err(SimError::InvalidConfig(format!(
                "world_size {} outside {MIN_WORLD_SIZE}..={MAX_WORLD_SIZE}",
                self.world_size
            )));
        }
        if !self.time_speed.is_finite() || self.time_speed <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "time_speed {} must be positive",
                self.time_speed
            )));
        }
        if self.start_day < 1 {
            return Err(SimError::InvalidConfig("start_day must be >= 1".into()));
        }
        if !self.start_hour.is_finite() || !(0.0..24.0).contains(&self.start_hour) {
            return Err(SimError::InvalidConfig(format!(
                "start_hour {} outside 0..24",
                self.start_hour
            )));
        }
        if !self.max_climb.is_finite() || self.max_climb <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "max_climb {} must be positive",
                self.max_climb
            )));
        }
        if !self.eye_height.is_finite() || self.eye_height < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "eye_height {} must be non-negative",
                self.eye_height
            )));
        }
        if !self.roam_radius.is_finite()
            || self.roam_radius <= 0.0
            || self.roam_radius > self.world_size / 2.0
        {
            return Err(SimError::InvalidConfig(format!(
                "roam_radius {} must be positive and within the world half-extent {}",
                self.roam_radius,
                self.world_size / 2.0
            )));
        }
        Ok(())
    }

    /// The world's axis-aligned bounds.
    pub fn bounds(&self) -> WorldBounds {
        WorldBounds {
            half_extent: self.world_size / 2.0,
        }
    }
}

/// Square world bounds centered on the origin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Half the world side length; valid ground coordinates lie in
    /// `-half_extent..=half_extent` on both axes.
    pub half_extent: f32,
}

impl WorldBounds {
    /// Whether a ground coordinate lies inside the world.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x.abs() <= self.half_extent && p.y.abs() <= self.half_extent
    }

    /// Clamp a ground coordinate into the world. Non-finite components
    /// collapse to the world center.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        let clamp_axis = |v: f32| {
            if v.is_finite() {
                v.clamp(-self.half_extent, self.half_extent)
            } else {
                0.0
            }
        };
        Vec2::new(clamp_axis(p.x), clamp_axis(p.y))
    }
}
