use glam::{Vec2, Vec3};
use rand::Rng;
use rand::rngs::StdRng;
use sv_core::{ActivityKind, ActivityRecord, PersonalityTrait, Roster, SoulSeed};

use crate::clock::WorldClock;
use crate::config::SimConfig;
use crate::error::SimResult;
use crate::terrain::HeightField;

/// How far the focused soul is pulled toward the center, so it reads as the
/// protagonist without breaking the even circular distribution.
pub const FOCUS_INWARD_OFFSET: f32 = 2.0;

const MIN_RING_RADIUS: f32 = 8.0;
const MAX_RING_RADIUS: f32 = 22.0;

/// Placement circle radius for a roster of `n` souls.
///
/// Grows with the roster so large sessions don't crowd, clamped to a sane
/// range and to the world half-extent.
pub fn ring_radius(n: usize, half_extent: f32) -> f32 {
    let grown = 6.0 + 0.9 * n as f32;
    let cap = (half_extent * 0.8).clamp(MIN_RING_RADIUS, MAX_RING_RADIUS);
    grown.clamp(MIN_RING_RADIUS, cap)
}

/// Pick an activity from the (hour band × traits) table.
///
/// Morning is routine for everyone; midday prefers a trait-specific
/// occupation with a generic fallback; evenings are social; nights rest.
pub fn select_activity(hour: f64, traits: &[PersonalityTrait]) -> ActivityKind {
    let h = hour.rem_euclid(24.0);
    if (5.0..11.0).contains(&h) {
        ActivityKind::Routine
    } else if (11.0..17.0).contains(&h) {
        if traits.contains(&PersonalityTrait::Creative) {
            ActivityKind::Creating
        } else if traits.contains(&PersonalityTrait::Social) {
            ActivityKind::Socializing
        } else if traits.contains(&PersonalityTrait::Curious) {
            ActivityKind::Exploring
        } else {
            ActivityKind::Working
        }
    } else if (17.0..22.0).contains(&h) {
        ActivityKind::Socializing
    } else {
        ActivityKind::Resting
    }
}

/// One-shot placement of a freshly loaded roster.
///
/// Validates the seeds, distributes the souls evenly around a circle on the
/// terrain (a single soul stands at world center), points everyone at the
/// center, and assigns each an initial activity and duration. Runs once per
/// roster load, never per tick.
pub fn plan(
    seeds: Vec<SoulSeed>,
    clock: &WorldClock,
    terrain: &HeightField,
    config: &SimConfig,
    rng: &mut StdRng,
) -> SimResult<Roster> {
    let mut roster = Roster::from_seeds(seeds)?;
    let n = roster.len();
    let ring = ring_radius(n, config.bounds().half_extent);
    let hour = clock.fractional_hour();
    let (dur_min, dur_max) = config.behavior.activity_secs;

    for (index, soul) in roster.iter_mut().enumerate() {
        let ground = if n == 1 {
            Vec2::ZERO
        } else {
            let angle = index as f32 / n as f32 * std::f32::consts::TAU;
            let radius = if soul.is_focused {
                ring - FOCUS_INWARD_OFFSET
            } else {
                ring
            };
            Vec2::new(angle.cos(), angle.sin()) * radius
        };

        let height = terrain.height_at(ground);
        soul.position = Vec3::new(ground.x, height + config.eye_height, ground.y);
        soul.yaw = if ground.length_squared() > 1e-6 {
            let to_center = -ground.normalize();
            to_center.x.atan2(to_center.y)
        } else {
            0.0
        };

        let kind = select_activity(hour, &soul.traits);
        let duration = if dur_min >= dur_max {
            dur_min
        } else {
            rng.random_range(dur_min..=dur_max)
        };
        soul.activity = ActivityRecord::new(kind, duration);
    }

    Ok(roster)
}
