use std::collections::HashMap;

use glam::{Vec2, Vec3};
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use sv_core::{ActivityRecord, Soul, SoulId};

use crate::config::{SimConfig, WorldBounds};
use crate::planner;
use crate::terrain::HeightField;

/// Tuning for agent movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorParams {
    /// Wait budget range drawn when entering Waiting from startup, seconds.
    pub idle_wait_secs: (f64, f64),
    /// Wait budget range drawn after arriving at a target, seconds.
    pub arrival_wait_secs: (f64, f64),
    /// Wait budget range drawn after a too-steep step aborted a move, seconds.
    pub retry_wait_secs: (f64, f64),
    /// Movement speed range, ground units per second.
    pub speed_range: (f32, f32),
    /// Distance below which a target counts as reached.
    pub arrival_epsilon: f32,
    /// Amplitude of the vertical bob while walking.
    pub bob_amplitude: f32,
    /// Angular frequency of the walk bob, radians per second.
    pub bob_frequency: f32,
    /// Maximum terrain slope (height units per ground unit) accepted at a
    /// candidate position.
    pub max_slope: f32,
    /// Duration range for re-rolled activities, simulated seconds.
    pub activity_secs: (f64, f64),
}

impl Default for BehaviorParams {
    fn default() -> Self {
        Self {
            idle_wait_secs: (2.0, 6.0),
            arrival_wait_secs: (4.0, 10.0),
            retry_wait_secs: (0.8, 2.0),
            speed_range: (1.5, 4.0),
            arrival_epsilon: 0.25,
            bob_amplitude: 0.06,
            bob_frequency: 6.0,
            max_slope: 1.6,
            activity_secs: (60.0, 180.0),
        }
    }
}

/// The two phases of an agent's movement state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPhase {
    /// Standing still, accumulating wait time toward the next move.
    Waiting,
    /// Walking toward the current target coordinate.
    Moving,
}

/// Movement state owned exclusively by one agent's simulator entry.
///
/// Speed and wait budget are drawn once per phase transition and held
/// constant until the next transition. The target always lies within world
/// bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementState {
    /// Current phase.
    pub phase: MovementPhase,
    /// Target ground coordinate, always inside world bounds.
    pub target: Vec2,
    /// Seconds waited so far in the current Waiting entry.
    pub elapsed_wait: f64,
    /// Seconds to wait before the next move.
    pub wait_budget: f64,
    /// Ground speed for the current Moving entry.
    pub speed: f32,
    walk_phase: f32,
}

impl MovementState {
    fn waiting(budget: f64) -> Self {
        Self {
            phase: MovementPhase::Waiting,
            target: Vec2::ZERO,
            elapsed_wait: 0.0,
            wait_budget: budget,
            speed: 0.0,
            walk_phase: 0.0,
        }
    }
}

/// Per-tick inputs shared by every agent update.
pub struct BehaviorContext<'a> {
    /// The terrain the world and movement gate agree on.
    pub terrain: &'a HeightField,
    /// World bounds targets are clamped into.
    pub bounds: WorldBounds,
    /// Seeded RNG owned by the orchestrator.
    pub rng: &'a mut StdRng,
    /// Current fractional hour of day, for activity re-rolls.
    pub hour: f64,
    /// Real seconds since the previous tick.
    pub delta_secs: f64,
    /// Simulated seconds since the previous tick.
    pub sim_delta_secs: f64,
}

/// Drives every soul's two-phase wander behavior.
///
/// One [`MovementState`] per tracked soul; no state is shared between
/// agents. A tick never fails: an agent that cannot find a valid move simply
/// re-enters Waiting.
#[derive(Debug)]
pub struct BehaviorSystem {
    states: HashMap<SoulId, MovementState>,
    params: BehaviorParams,
    roam_radius: f32,
    max_climb: f32,
    eye_height: f32,
}

impl BehaviorSystem {
    /// Create a behavior system from the session config.
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            states: HashMap::new(),
            params: config.behavior.clone(),
            roam_radius: config.roam_radius,
            max_climb: config.max_climb,
            eye_height: config.eye_height,
        }
    }

    /// Start tracking a soul, entering Waiting with a fresh idle budget.
    pub fn track(&mut self, id: SoulId, rng: &mut StdRng) {
        let budget = draw(rng, self.params.idle_wait_secs);
        self.states.insert(id, MovementState::waiting(budget));
    }

    /// Drop all tracked souls.
    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Movement state for a tracked soul.
    pub fn state(&self, id: SoulId) -> Option<&MovementState> {
        self.states.get(&id)
    }

    /// Number of tracked souls.
    pub fn tracked(&self) -> usize {
        self.states.len()
    }

    /// Advance one soul by one tick. Non-finite and negative deltas are
    /// ignored, the same as [`crate::clock::WorldClock::advance`].
    pub fn update(&mut self, soul: &mut Soul, ctx: &mut BehaviorContext<'_>) {
        if !ctx.delta_secs.is_finite() || ctx.delta_secs < 0.0 {
            return;
        }
        if soul.activity.advance(ctx.sim_delta_secs) {
            let kind = planner::select_activity(ctx.hour, &soul.traits);
            let duration = draw(ctx.rng, self.params.activity_secs);
            soul.activity = ActivityRecord::new(kind, duration);
        }

        let idle_range = self.params.idle_wait_secs;
        let state = self
            .states
            .entry(soul.id)
            .or_insert_with(|| MovementState::waiting(draw(ctx.rng, idle_range)));

        match state.phase {
            MovementPhase::Waiting => {
                state.elapsed_wait += ctx.delta_secs;
                if state.elapsed_wait >= state.wait_budget {
                    let angle = ctx.rng.random_range(0.0..std::f32::consts::TAU);
                    let radius = ctx.rng.random_range(0.0..=self.roam_radius);
                    let raw = Vec2::new(angle.cos(), angle.sin()) * radius;
                    state.target = ctx.bounds.clamp(raw);
                    state.speed = ctx
                        .rng
                        .random_range(self.params.speed_range.0..=self.params.speed_range.1);
                    state.elapsed_wait = 0.0;
                    state.phase = MovementPhase::Moving;
                }
            }
            MovementPhase::Moving => {
                let here = Vec2::new(soul.position.x, soul.position.z);
                let to_target = state.target - here;
                let dist = to_target.length();

                if !dist.is_finite() || dist < self.params.arrival_epsilon {
                    enter_waiting(state, ctx.rng, self.params.arrival_wait_secs);
                    return;
                }

                let step_len = (state.speed * ctx.delta_secs as f32).min(dist);
                let dir = to_target / dist;
                let candidate = here + dir * step_len;

                let here_height = ctx.terrain.height_at(here);
                let cand = ctx.terrain.sample(candidate.x, candidate.y);

                // Too steep: abort the move outright instead of sliding
                // along the obstacle.
                if (cand.height - here_height).abs() > self.max_climb
                    || cand.slope > self.params.max_slope
                {
                    enter_waiting(state, ctx.rng, self.params.retry_wait_secs);
                    return;
                }

                state.walk_phase = (state.walk_phase
                    + ctx.delta_secs as f32 * self.params.bob_frequency)
                    .rem_euclid(std::f32::consts::TAU);
                let bob = state.walk_phase.sin() * self.params.bob_amplitude;

                soul.position = Vec3::new(
                    candidate.x,
                    cand.height + self.eye_height + bob,
                    candidate.y,
                );
                soul.yaw = dir.x.atan2(dir.y);
            }
        }
    }
}

fn enter_waiting(state: &mut MovementState, rng: &mut StdRng, range: (f64, f64)) {
    state.phase = MovementPhase::Waiting;
    state.elapsed_wait = 0.0;
    state.wait_budget = draw(rng, range);
}

fn draw(rng: &mut StdRng, range: (f64, f64)) -> f64 {
    if range.0 >= range.1 {
        return range.0;
    }
    rng.random_range(range.0..=range.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use sv_core::SoulSeed;

    fn test_soul() -> Soul {
        let mut soul = Soul::from_seed(SoulSeed::new("Aki", "aki").with_trait("calm"));
        soul.position = Vec3::new(0.0, 0.9, 0.0);
        soul
    }

    fn test_setup() -> (BehaviorSystem, HeightField, SimConfig) {
        let config = SimConfig::default();
        let system = BehaviorSystem::from_config(&config);
        let terrain = HeightField::new(config.terrain.clone());
        (system, terrain, config)
    }

    fn ctx<'a>(
        terrain: &'a HeightField,
        config: &SimConfig,
        rng: &'a mut StdRng,
    ) -> BehaviorContext<'a> {
        BehaviorContext {
            terrain,
            bounds: config.bounds(),
            rng,
            hour: 12.0,
            delta_secs: 1.0 / 60.0,
            sim_delta_secs: 1.0,
        }
    }

    #[test]
    fn waiting_transitions_to_moving_after_budget() {
        let (mut system, terrain, config) = test_setup();
        let mut rng = StdRng::seed_from_u64(1);
        let mut soul = test_soul();
        system.track(soul.id, &mut rng);

        // Longest idle budget is bounded, so the phase must flip within it
        let mut saw_moving = false;
        for _ in 0..(6.0 * 60.0) as usize + 1 {
            let mut c = ctx(&terrain, &config, &mut rng);
            system.update(&mut soul, &mut c);
            if system.state(soul.id).unwrap().phase == MovementPhase::Moving {
                saw_moving = true;
            }
        }
        assert!(saw_moving);
    }

    #[test]
    fn malformed_deltas_leave_wait_state_intact() {
        let (mut system, terrain, config) = test_setup();
        let mut rng = StdRng::seed_from_u64(11);
        let mut soul = test_soul();
        system.track(soul.id, &mut rng);

        for bad in [f64::NAN, f64::INFINITY, -5.0] {
            let mut c = ctx(&terrain, &config, &mut rng);
            c.delta_secs = bad;
            system.update(&mut soul, &mut c);
            let state = system.state(soul.id).unwrap();
            assert_eq!(state.phase, MovementPhase::Waiting);
            assert!(state.elapsed_wait.is_finite() && state.elapsed_wait >= 0.0);
        }

        // Healthy ticks afterwards still drive the soul into Moving
        let mut saw_moving = false;
        for _ in 0..(6.0 * 60.0) as usize + 1 {
            let mut c = ctx(&terrain, &config, &mut rng);
            system.update(&mut soul, &mut c);
            if system.state(soul.id).unwrap().phase == MovementPhase::Moving {
                saw_moving = true;
            }
        }
        assert!(saw_moving);
    }

    #[test]
    fn chosen_targets_stay_in_bounds() {
        let (mut system, terrain, config) = test_setup();
        let mut rng = StdRng::seed_from_u64(2);
        let mut soul = test_soul();
        system.track(soul.id, &mut rng);

        for _ in 0..20_000 {
            let mut c = ctx(&terrain, &config, &mut rng);
            system.update(&mut soul, &mut c);
            let state = system.state(soul.id).unwrap();
            assert!(config.bounds().contains(state.target));
        }
    }

    #[test]
    fn moving_soul_eventually_re_enters_waiting() {
        let (mut system, terrain, config) = test_setup();
        let mut rng = StdRng::seed_from_u64(3);
        let mut soul = test_soul();
        system.track(soul.id, &mut rng);

        let mut saw_moving = false;
        let mut saw_waiting_after_moving = false;
        for _ in 0..200_000 {
            let mut c = ctx(&terrain, &config, &mut rng);
            system.update(&mut soul, &mut c);
            match system.state(soul.id).unwrap().phase {
                MovementPhase::Moving => saw_moving = true,
                MovementPhase::Waiting if saw_moving => {
                    saw_waiting_after_moving = true;
                    break;
                }
                MovementPhase::Waiting => {}
            }
        }
        assert!(saw_moving);
        assert!(saw_waiting_after_moving);
    }

    #[test]
    fn y_tracks_terrain_plus_eye_height() {
        let (mut system, terrain, config) = test_setup();
        let mut rng = StdRng::seed_from_u64(4);
        let mut soul = test_soul();
        system.track(soul.id, &mut rng);

        for _ in 0..50_000 {
            let mut c = ctx(&terrain, &config, &mut rng);
            let before = soul.position;
            system.update(&mut soul, &mut c);
            if soul.position != before {
                let ground = terrain.height(soul.position.x, soul.position.z);
                let offset = soul.position.y - ground - config.eye_height;
                assert!(
                    offset.abs() <= config.behavior.bob_amplitude + 1e-4,
                    "y offset {offset} outside bob envelope"
                );
            }
        }
    }

    #[test]
    fn yaw_faces_travel_direction() {
        let (mut system, terrain, config) = test_setup();
        let mut rng = StdRng::seed_from_u64(5);
        let mut soul = test_soul();
        system.track(soul.id, &mut rng);

        for _ in 0..50_000 {
            let before = Vec2::new(soul.position.x, soul.position.z);
            let mut c = ctx(&terrain, &config, &mut rng);
            system.update(&mut soul, &mut c);
            let after = Vec2::new(soul.position.x, soul.position.z);
            let moved = after - before;
            if moved.length() > 1e-5 {
                let expected = moved.x.atan2(moved.y);
                assert!((soul.yaw - expected).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn activity_re_rolls_when_expired() {
        let (mut system, terrain, config) = test_setup();
        let mut rng = StdRng::seed_from_u64(6);
        let mut soul = test_soul();
        soul.activity = ActivityRecord::new(sv_core::ActivityKind::Idle, 0.5);
        system.track(soul.id, &mut rng);

        let mut c = ctx(&terrain, &config, &mut rng);
        system.update(&mut soul, &mut c);
        // sim_delta_secs = 1.0 expires the half-second activity
        assert!(soul.activity.remaining_secs > 0.0);
        assert_ne!(soul.activity.kind, sv_core::ActivityKind::Idle);
    }

    #[test]
    fn untracked_soul_is_adopted_on_update() {
        let (mut system, terrain, config) = test_setup();
        let mut rng = StdRng::seed_from_u64(7);
        let mut soul = test_soul();
        assert_eq!(system.tracked(), 0);

        let mut c = ctx(&terrain, &config, &mut rng);
        system.update(&mut soul, &mut c);
        assert_eq!(system.tracked(), 1);
        assert_eq!(system.state(soul.id).unwrap().phase, MovementPhase::Waiting);
    }

    proptest! {
        // Randomized seeds and tick lengths: an accepted step never crosses
        // a terrain-height delta above max_climb.
        #![proptest_config(ProptestConfig::with_cases(32))]
        #[test]
        fn accepted_steps_respect_max_climb(seed in 0u64..5000, dt in 0.005f64..0.1) {
            let (mut system, terrain, config) = test_setup();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut soul = test_soul();
            system.track(soul.id, &mut rng);

            let mut prev_ground = terrain.height(soul.position.x, soul.position.z);
            for _ in 0..3_000 {
                let mut c = BehaviorContext {
                    terrain: &terrain,
                    bounds: config.bounds(),
                    rng: &mut rng,
                    hour: 12.0,
                    delta_secs: dt,
                    sim_delta_secs: dt * 60.0,
                };
                let before = soul.position;
                system.update(&mut soul, &mut c);
                if soul.position != before {
                    let ground = terrain.height(soul.position.x, soul.position.z);
                    prop_assert!((ground - prev_ground).abs() <= config.max_climb + 1e-4);
                    prev_ground = ground;
                }
            }
        }
    }
}
