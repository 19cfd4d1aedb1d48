use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Hard floor on any height the field can return.
pub const MIN_HEIGHT: f32 = -60.0;
/// Hard ceiling on any height the field can return.
pub const MAX_HEIGHT: f32 = 120.0;

/// Tuning for the terrain formula.
///
/// The default values shape a landscape with walkable ground near the world
/// center and steeper ridges and valleys toward the rim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainParams {
    /// Amplitude of the coarse mountain layers.
    pub mountain_amp: f32,
    /// Amplitude of the mid-frequency hill layers.
    pub hill_amp: f32,
    /// Amplitude of the fine roughness layers.
    pub rough_amp: f32,
    /// Amplitude of the two valley interference terms.
    pub valley_amp: f32,
    /// Combined-term threshold above which the plateau bonus applies.
    pub plateau_threshold: f32,
    /// Height added per unit of combined term above the threshold.
    pub plateau_bonus: f32,
    /// Distance at which the radial falloff would reach zero if unbounded.
    pub falloff_radius: f32,
    /// Lower bound on the falloff factor; far terrain never flattens
    /// completely.
    pub falloff_floor: f32,
    /// Radius of the central area kept walkable.
    pub spawn_radius: f32,
    /// Minimum height inside the spawn radius.
    pub spawn_floor: f32,
    /// Finite-difference step for the slope estimate. Tunable; 1.0 matches
    /// one agent step at typical speeds.
    pub slope_step: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            mountain_amp: 8.0,
            hill_amp: 2.4,
            rough_amp: 0.5,
            valley_amp: 3.6,
            plateau_threshold: 1.15,
            plateau_bonus: 2.5,
            falloff_radius: 220.0,
            falloff_floor: 0.25,
            spawn_radius: 30.0,
            spawn_floor: -0.5,
            slope_step: 1.0,
        }
    }
}

/// One deterministic probe of the terrain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainSample {
    /// Ground elevation at the probed coordinate.
    pub height: f32,
    /// Forward-difference slope estimate, height units per ground unit.
    pub slope: f32,
}

/// Deterministic procedural elevation for any ground coordinate.
///
/// The same function backs both the visual terrain mesh and the movement
/// gate, so there is exactly one source of truth for "how high is the ground
/// here". It holds no state and no randomness with memory: identical inputs
/// always produce identical outputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeightField {
    params: TerrainParams,
}

impl HeightField {
    /// Create a height field with the given tuning.
    pub fn new(params: TerrainParams) -> Self {
        Self { params }
    }

    /// The tuning this field was built with.
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Ground elevation at `(x, z)`.
    ///
    /// Non-finite inputs and any non-finite intermediate result collapse to
    /// 0.0, and the output is clamped to [`MIN_HEIGHT`]..=[`MAX_HEIGHT`], so
    /// corruption cannot propagate into agent or camera state.
    pub fn height(&self, x: f32, z: f32) -> f32 {
        if !x.is_finite() || !z.is_finite() {
            return 0.0;
        }
        let p = &self.params;

        // Coarse mountain layers
        let mountains = (x * 0.021).sin() * (z * 0.017).cos() * p.mountain_amp
            + ((x + z) * 0.011).sin() * p.mountain_amp * 1.15;

        // Mid hill layers
        let hills = (x * 0.055).sin() * (z * 0.047).cos() * p.hill_amp
            + (x * 0.032 + z * 0.041).cos() * p.hill_amp * 0.7;

        // Fine roughness layers
        let roughness =
            (x * 0.21).sin() * (z * 0.17).cos() * p.rough_amp + (x * 0.13 - z * 0.11).sin() * p.rough_amp * 0.6;

        // Two valley interference terms carve the low ground
        let valleys = (x * 0.016 + z * 0.012).sin() * (x * 0.009 - z * 0.014).cos() * -p.valley_amp
            + (x * 0.007).cos() * (z * 0.008).sin() * -p.valley_amp * 0.8;

        let mut height = mountains + hills + roughness + valleys;

        // Plateau bonus where the slow combined term peaks
        let plateau_term = (x * 0.008).sin() + (z * 0.009).cos();
        if plateau_term > p.plateau_threshold {
            height += (plateau_term - p.plateau_threshold) * p.plateau_bonus;
        }

        // Radial falloff, bounded below so the rim keeps relief
        let dist = (x * x + z * z).sqrt();
        let falloff = (1.0 - dist / p.falloff_radius).clamp(p.falloff_floor, 1.0);
        height *= falloff;

        // The gather area around the origin stays walkable; farther out the
        // valleys may dip deeper.
        if dist < p.spawn_radius {
            height = height.max(p.spawn_floor);
        }

        if !height.is_finite() {
            return 0.0;
        }
        height.clamp(MIN_HEIGHT, MAX_HEIGHT)
    }

    /// Ground elevation at a ground coordinate.
    pub fn height_at(&self, p: Vec2) -> f32 {
        self.height(p.x, p.y)
    }

    /// Elevation plus a forward-difference slope estimate at `(x, z)`.
    ///
    /// The slope is the steeper of the two axis-aligned differences over
    /// `slope_step`. It is derived on demand and never stored.
    pub fn sample(&self, x: f32, z: f32) -> TerrainSample {
        let step = self.params.slope_step;
        let height = self.height(x, z);
        let dx = (self.height(x + step, z) - height).abs() / step;
        let dz = (self.height(x, z + step) - height).abs() / step;
        TerrainSample {
            height,
            slope: dx.max(dz),
        }
    }
}
