use glam::Vec3;
use serde::{Deserialize, Serialize};
use sv_core::Color;

use crate::clock::WorldClock;

/// Hour at which the sun sits on the eastern horizon.
pub const SUNRISE_HOUR: f64 = 6.0;

/// Distance from world center to the rendered sun disc.
pub const SUN_DISTANCE: f32 = 400.0;

/// The sun stays "visible" until its height drops below this fraction of
/// [`SUN_DISTANCE`], just under the horizon, so dusk light lingers.
pub const SUN_VISIBILITY_FLOOR: f32 = -0.05;

/// A band of the simulated day with a fixed lighting palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBand {
    /// Hours 5 through 7.
    Dawn,
    /// Daytime hours outside dawn and dusk.
    Day,
    /// Hours 17 through 19.
    Dusk,
    /// Before 6 or after 18, outside dawn and dusk.
    Night,
}

impl TimeBand {
    /// Band for a fractional hour of day. Boundaries are inclusive whole-hour
    /// ranges; dawn and dusk take precedence over night.
    pub fn from_hour(hour: f64) -> Self {
        let whole = hour.rem_euclid(24.0).floor() as u32;
        if (5..=7).contains(&whole) {
            Self::Dawn
        } else if (17..=19).contains(&whole) {
            Self::Dusk
        } else if !(6..=18).contains(&whole) {
            Self::Night
        } else {
            Self::Day
        }
    }
}

/// Per-band palette constants.
struct Palette {
    light_color: Color,
    base_intensity: f32,
    ambient_intensity: f32,
    sky_color: Color,
    fog_color: Color,
}

fn palette(band: TimeBand) -> Palette {
    match band {
        TimeBand::Dawn => Palette {
            light_color: Color::rgb(1.0, 0.80, 0.60),
            base_intensity: 0.8,
            ambient_intensity: 0.45,
            sky_color: Color::rgb(0.96, 0.76, 0.62),
            fog_color: Color::rgb(0.94, 0.80, 0.70),
        },
        TimeBand::Day => Palette {
            light_color: Color::rgb(1.0, 0.98, 0.92),
            base_intensity: 1.0,
            ambient_intensity: 0.60,
            sky_color: Color::rgb(0.53, 0.78, 0.95),
            fog_color: Color::rgb(0.78, 0.86, 0.94),
        },
        TimeBand::Dusk => Palette {
            light_color: Color::rgb(1.0, 0.62, 0.42),
            base_intensity: 0.7,
            ambient_intensity: 0.40,
            sky_color: Color::rgb(0.72, 0.48, 0.52),
            fog_color: Color::rgb(0.70, 0.52, 0.55),
        },
        TimeBand::Night => Palette {
            light_color: Color::rgb(0.55, 0.62, 0.85),
            base_intensity: 0.25,
            ambient_intensity: 0.18,
            sky_color: Color::rgb(0.05, 0.07, 0.16),
            fog_color: Color::rgb(0.08, 0.10, 0.18),
        },
    }
}

/// Lighting parameters for one frame, handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingSnapshot {
    /// World-space sun position.
    pub sun_position: Vec3,
    /// Whether the sun disc should be drawn.
    pub sun_visible: bool,
    /// Time band the palette was selected from.
    pub band: TimeBand,
    /// Directional light color.
    pub light_color: Color,
    /// Directional light intensity, already modulated by sun height.
    pub light_intensity: f32,
    /// Ambient light intensity.
    pub ambient_intensity: f32,
    /// Sky dome color.
    pub sky_color: Color,
    /// Distance fog color.
    pub fog_color: Color,
}

/// Full rotation angle of the sun for a fractional hour, offset so the sun
/// crosses the horizon at [`SUNRISE_HOUR`].
pub fn sun_angle(hour: f64) -> f32 {
    (((hour - SUNRISE_HOUR) / 24.0) * std::f64::consts::TAU) as f32
}

/// Project the clock into this frame's lighting parameters.
///
/// Pure read-only function of the clock; called every tick so intensity
/// follows the sinusoidal sun height without stepping.
pub fn project(clock: &WorldClock) -> LightingSnapshot {
    let hour = clock.fractional_hour();
    let angle = sun_angle(hour);
    let height = angle.sin();
    let horizontal = angle.cos();
    let sun_position = Vec3::new(
        horizontal * SUN_DISTANCE,
        height * SUN_DISTANCE,
        -SUN_DISTANCE * 0.35,
    );

    let band = TimeBand::from_hour(hour);
    let p = palette(band);
    let modulation = 0.35 + 0.65 * height.max(0.0);

    LightingSnapshot {
        sun_position,
        sun_visible: height > SUN_VISIBILITY_FLOOR,
        band,
        light_color: p.light_color,
        light_intensity: p.base_intensity * modulation,
        ambient_intensity: p.ambient_intensity,
        sky_color: p.sky_color,
        fog_color: p.fog_color,
    }
}
