//! Tick-based world simulation for Soulvale.
//!
//! Drives autonomous souls across a procedurally generated landscape: a
//! deterministic terrain height field, a simulated day/night clock with its
//! lighting projection, per-agent wander behavior gated by terrain slope, a
//! one-shot population planner, and a three-mode camera rig. The host calls
//! [`WorldSimulation::tick`] once per frame and hands the returned
//! [`WorldSnapshot`] to its rendering layer; nothing here blocks, spawns
//! threads, or touches the GPU.

/// Per-agent movement state machine and its tuning.
pub mod behavior;
/// Finite-state camera rig: Follow, Front, and Overview modes.
pub mod camera;
/// The simulated day/night clock and its display readout.
pub mod clock;
/// Session configuration and world bounds.
pub mod config;
/// Error types for the simulation crate.
pub mod error;
/// Pure lighting projection of the clock: sun geometry and time-band palettes.
pub mod lighting;
/// One-shot roster placement and the activity lookup table.
pub mod planner;
/// The top-level simulation orchestrator.
pub mod simulation;
/// Per-tick output types handed to the rendering layer.
pub mod snapshot;
/// Deterministic procedural terrain height field.
pub mod terrain;

/// Re-exports of [`behavior::BehaviorParams`] and [`behavior::MovementPhase`].
pub use behavior::{BehaviorParams, MovementPhase};
/// Re-exports of the camera types.
pub use camera::{CameraParams, CameraRig, CameraSnapshot, ControlPermissions, ViewMode};
/// Re-exports of [`clock::ClockReadout`] and [`clock::WorldClock`].
pub use clock::{ClockReadout, WorldClock};
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`lighting::LightingSnapshot`] and [`lighting::TimeBand`].
pub use lighting::{LightingSnapshot, TimeBand};
/// Re-export of [`simulation::WorldSimulation`].
pub use simulation::WorldSimulation;
/// Re-exports of [`snapshot::AgentSnapshot`] and [`snapshot::WorldSnapshot`].
pub use snapshot::{AgentSnapshot, WorldSnapshot};
/// Re-exports of [`terrain::HeightField`] and [`terrain::TerrainSample`].
pub use terrain::{HeightField, TerrainSample};
