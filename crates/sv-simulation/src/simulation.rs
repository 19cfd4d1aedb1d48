use rand::SeedableRng;
use rand::rngs::StdRng;
use sv_core::{Roster, SoulSeed};

use crate::behavior::{BehaviorContext, BehaviorSystem};
use crate::camera::{CameraRig, CameraSnapshot, FocusPose, ViewMode};
use crate::clock::{ClockReadout, WorldClock};
use crate::config::SimConfig;
use crate::error::SimResult;
use crate::lighting;
use crate::snapshot::{AgentSnapshot, WorldSnapshot};
use crate::terrain::HeightField;

/// The top-level world simulation.
///
/// Owns the clock, terrain, behavior system, camera rig, and the seeded RNG.
/// Single-threaded and cooperative: the host calls [`tick`](Self::tick) once
/// per frame and hands the returned snapshot to its renderer. Each tick runs
/// strictly clock → agents → camera, so the camera always reads this tick's
/// fresh agent positions and lighting reflects this tick's clock.
#[derive(Debug)]
pub struct WorldSimulation {
    config: SimConfig,
    clock: WorldClock,
    terrain: HeightField,
    behavior: BehaviorSystem,
    camera: CameraRig,
    roster: Option<Roster>,
    rng: StdRng,
    readout: ClockReadout,
}

impl WorldSimulation {
    /// Create a simulation from a validated configuration.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let clock = WorldClock::new(config.start_day, config.start_hour, config.time_speed);
        let terrain = HeightField::new(config.terrain.clone());
        let behavior = BehaviorSystem::from_config(&config);
        let camera = CameraRig::new(config.camera.clone(), false);
        let rng = StdRng::seed_from_u64(config.seed);
        let readout = clock.readout();
        Ok(Self {
            config,
            clock,
            terrain,
            behavior,
            camera,
            roster: None,
            rng,
            readout,
        })
    }

    /// Load a session roster, replacing any previous one.
    ///
    /// Runs the population planner once: every soul gets a position on the
    /// placement circle, an initial activity, and a movement state. The
    /// camera enters Follow when a focused soul exists, Overview otherwise.
    pub fn load_roster(&mut self, seeds: Vec<SoulSeed>) -> SimResult<()> {
        let roster = crate::planner::plan(
            seeds,
            &self.clock,
            &self.terrain,
            &self.config,
            &mut self.rng,
        )?;

        self.behavior.clear();
        for soul in roster.iter() {
            self.behavior.track(soul.id, &mut self.rng);
        }

        let has_focus = roster.focused_id().is_some();
        self.camera = CameraRig::new(self.config.camera.clone(), has_focus);
        self.roster = Some(roster);
        Ok(())
    }

    /// Drop the current roster. The clock keeps running; agent and camera
    /// updates become no-ops until a new roster loads.
    pub fn clear_roster(&mut self) {
        self.roster = None;
        self.behavior.clear();
        self.camera = CameraRig::new(self.config.camera.clone(), false);
    }

    /// Advance the world by one tick of `delta_secs` real seconds and return
    /// the frame's snapshot.
    pub fn tick(&mut self, delta_secs: f64) -> WorldSnapshot {
        // A malformed host delta becomes a zero-length tick.
        let delta_secs = if delta_secs.is_finite() && delta_secs > 0.0 {
            delta_secs
        } else {
            0.0
        };

        // (1) clock
        self.clock.advance(delta_secs);
        let hour = self.clock.fractional_hour();
        let sim_delta_secs = delta_secs * self.clock.sim_seconds_per_real_second();

        // (2) agents, in roster order
        if let Some(roster) = self.roster.as_mut() {
            for soul in roster.iter_mut() {
                let mut ctx = BehaviorContext {
                    terrain: &self.terrain,
                    bounds: self.config.bounds(),
                    rng: &mut self.rng,
                    hour,
                    delta_secs,
                    sim_delta_secs,
                };
                self.behavior.update(soul, &mut ctx);
            }
        }

        // (3) camera, reading this tick's fresh focused pose
        let focus = self.roster.as_ref().and_then(|r| r.focused()).map(|soul| {
            FocusPose {
                position: soul.position,
                yaw: soul.yaw,
            }
        });
        self.camera.update(focus, &self.terrain);

        let fresh = self.clock.readout();
        if fresh != self.readout {
            self.readout = fresh;
        }

        WorldSnapshot {
            agents: self
                .roster
                .as_ref()
                .map(|r| r.iter().map(AgentSnapshot::of).collect())
                .unwrap_or_default(),
            lighting: lighting::project(&self.clock),
            camera: self.camera.snapshot(),
            clock: self.readout,
        }
    }

    /// Advance to the next camera view mode. Returns the mode entered.
    pub fn cycle_view_mode(&mut self) -> ViewMode {
        let has_focus = self.focused_exists();
        self.camera.cycle_mode(has_focus)
    }

    /// Request a specific camera view mode. Returns the mode entered, which
    /// is Overview whenever no focused soul exists.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> ViewMode {
        let has_focus = self.focused_exists();
        self.camera.set_mode(mode, has_focus)
    }

    /// The simulated clock.
    pub fn clock(&self) -> &WorldClock {
        &self.clock
    }

    /// The terrain height field backing mesh generation and movement.
    pub fn terrain(&self) -> &HeightField {
        &self.terrain
    }

    /// The loaded roster, if any.
    pub fn roster(&self) -> Option<&Roster> {
        self.roster.as_ref()
    }

    /// The camera's current transform and permissions.
    pub fn camera_snapshot(&self) -> CameraSnapshot {
        self.camera.snapshot()
    }

    /// The displayed clock readout, refreshed at minute cadence.
    pub fn clock_readout(&self) -> ClockReadout {
        self.readout
    }

    fn focused_exists(&self) -> bool {
        self.roster
            .as_ref()
            .and_then(|r| r.focused_id())
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ViewMode;
    use crate::lighting::TimeBand;
    use glam::Vec2;

    const TICK: f64 = 1.0 / 60.0;

    fn seeds(n: usize, focused: Option<usize>) -> Vec<SoulSeed> {
        (0..n)
            .map(|i| {
                let seed = SoulSeed::new(format!("Soul {i}"), format!("soul{i}"))
                    .with_trait(["creative", "social", "curious", "calm", "adventurous"][i % 5]);
                if focused == Some(i) { seed.focused() } else { seed }
            })
            .collect()
    }

    fn loaded_sim() -> WorldSimulation {
        let mut sim = WorldSimulation::new(SimConfig::default()).unwrap();
        sim.load_roster(seeds(5, Some(1))).unwrap();
        sim
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = SimConfig::default().with_world_size(1.0);
        assert!(WorldSimulation::new(config).is_err());
    }

    #[test]
    fn five_souls_one_focused_inside_bounds() {
        let sim = loaded_sim();
        let roster = sim.roster().unwrap();
        assert_eq!(roster.len(), 5);
        assert_eq!(roster.iter().filter(|s| s.is_focused).count(), 1);
        let bounds = SimConfig::default().bounds();
        for soul in roster.iter() {
            assert!(bounds.contains(Vec2::new(soul.position.x, soul.position.z)));
        }
    }

    #[test]
    fn default_follow_camera_keeps_clearance() {
        let mut sim = loaded_sim();
        let snap = sim.tick(TICK);
        assert!(!snap.camera.permissions.rotate);
        let ground = sim
            .terrain()
            .height(snap.camera.position.x, snap.camera.position.z);
        let min_clearance = SimConfig::default().camera.min_clearance;
        assert!(snap.camera.position.y - ground >= min_clearance - 1e-4);
    }

    #[test]
    fn tick_without_roster_still_advances_clock() {
        let mut sim = WorldSimulation::new(SimConfig::default()).unwrap();
        let before = sim.clock().fractional_hour();
        let snap = sim.tick(60.0);
        assert!(sim.clock().fractional_hour() > before);
        assert!(snap.agents.is_empty());
        // Camera idles in Overview with controls enabled
        assert!(snap.camera.permissions.rotate);
    }

    #[test]
    fn malformed_tick_is_zero_length_and_recoverable() {
        let mut sim = loaded_sim();
        let before = sim.tick(0.25);

        for bad in [f64::NAN, f64::NEG_INFINITY, -3.0] {
            let during = sim.tick(bad);
            assert_eq!(during.clock, before.clock);
            for (a, b) in during.agents.iter().zip(before.agents.iter()) {
                assert_eq!(a.position, b.position);
            }
        }

        // Agents still leave their spawn poses on healthy ticks afterwards
        let mut moved = false;
        for _ in 0..10_000 {
            let snap = sim.tick(0.25);
            if snap
                .agents
                .iter()
                .zip(before.agents.iter())
                .any(|(a, b)| a.position != b.position)
            {
                moved = true;
                break;
            }
        }
        assert!(moved);
    }

    #[test]
    fn camera_reads_fresh_agent_positions() {
        let mut sim = loaded_sim();
        // Run long enough for the focused soul to start moving
        for _ in 0..30_000 {
            let snap = sim.tick(TICK);
            let focused = snap
                .agents
                .iter()
                .zip(sim.roster().unwrap().iter())
                .find(|(_, s)| s.is_focused)
                .map(|(a, _)| a)
                .unwrap();
            // Follow keeps looking slightly above the focused soul's
            // position from this same tick
            let look_delta = snap.camera.look_at - focused.position;
            assert!(look_delta.x.abs() < 1e-4);
            assert!(look_delta.z.abs() < 1e-4);
        }
    }

    #[test]
    fn view_mode_cycle_round_trips() {
        let mut sim = loaded_sim();
        assert!(!sim.camera_snapshot().permissions.rotate);
        assert_eq!(sim.cycle_view_mode(), ViewMode::Front);
        assert_eq!(sim.cycle_view_mode(), ViewMode::Overview);
        assert_eq!(sim.cycle_view_mode(), ViewMode::Follow);
    }

    #[test]
    fn unfocused_roster_locks_camera_to_overview() {
        let mut sim = WorldSimulation::new(SimConfig::default()).unwrap();
        sim.load_roster(seeds(3, None)).unwrap();
        let snap = sim.tick(TICK);
        assert!(snap.camera.permissions.rotate);
        assert_eq!(sim.cycle_view_mode(), ViewMode::Overview);
        assert_eq!(sim.set_view_mode(ViewMode::Follow), ViewMode::Overview);
    }

    #[test]
    fn night_rolls_into_dawn_palette() {
        let config = SimConfig::default().with_start_time(1, 23.9);
        let mut sim = WorldSimulation::new(config).unwrap();

        let snap = sim.tick(1.0);
        assert_eq!(snap.lighting.band, TimeBand::Night);
        assert_eq!(snap.clock.day, 1);

        // 12 simulated minutes cross midnight into day 2
        let snap = sim.tick(12.0);
        assert_eq!(snap.clock.day, 2);
        assert_eq!(snap.lighting.band, TimeBand::Night);

        // Advance to the dawn lower bound at hour 5
        let snap = sim.tick(5.0 * 60.0);
        assert_eq!(snap.lighting.band, TimeBand::Dawn);
    }

    #[test]
    fn clock_readout_updates_at_minute_cadence() {
        let mut sim = WorldSimulation::new(SimConfig::default()).unwrap();
        let start = sim.clock_readout();
        // Sub-minute ticks leave the readout untouched
        let snap = sim.tick(0.4);
        assert_eq!(snap.clock, start);
        // Crossing the minute boundary refreshes it
        let snap = sim.tick(0.7);
        assert_ne!(snap.clock, start);
        assert_eq!(snap.clock.minute, 1);
    }

    #[test]
    fn identical_seeds_give_identical_runs() {
        let run = || {
            let mut sim = WorldSimulation::new(SimConfig::default().with_seed(99)).unwrap();
            let mut seeds = seeds(4, Some(0));
            // Fix IDs so both runs hash identically
            for (i, seed) in seeds.iter_mut().enumerate() {
                seed.id = sv_core::SoulId(uuid_from(i));
            }
            sim.load_roster(seeds).unwrap();
            let mut last = None;
            for _ in 0..2_000 {
                last = Some(sim.tick(TICK));
            }
            last.unwrap()
        };

        let a = run();
        let b = run();
        for (x, y) in a.agents.iter().zip(b.agents.iter()) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.yaw, y.yaw);
        }
        assert_eq!(a.camera, b.camera);
    }

    fn uuid_from(i: usize) -> uuid::Uuid {
        uuid::Uuid::from_u128(i as u128 + 1)
    }

    #[test]
    fn reloading_roster_replaces_agents() {
        let mut sim = loaded_sim();
        sim.tick(TICK);
        sim.load_roster(seeds(2, Some(0))).unwrap();
        let snap = sim.tick(TICK);
        assert_eq!(snap.agents.len(), 2);
    }

    #[test]
    fn clear_roster_empties_world() {
        let mut sim = loaded_sim();
        sim.clear_roster();
        let snap = sim.tick(TICK);
        assert!(snap.agents.is_empty());
        assert!(sim.roster().is_none());
        assert!(snap.camera.permissions.pan);
    }
}
