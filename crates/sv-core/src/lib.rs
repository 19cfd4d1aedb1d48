//! Core types for Soulvale: souls, traits, activities, and the session roster.
//!
//! This crate defines the data model the simulation operates on. It is
//! independent of the tick loop — you can construct a [`Roster`]
//! programmatically or deserialize one from JSON.

/// Activity kinds and the per-soul activity record.
pub mod activity;
/// RGB color type shared by soul display colors and lighting palettes.
pub mod color;
/// Error types used throughout the crate.
pub mod error;
/// The validated, ordered soul roster for a session.
pub mod roster;
/// Soul identity, roster-load seeds, and the live soul entity.
pub mod soul;
/// Personality traits and the trait→color table.
pub mod traits;

/// Re-export activity types.
pub use activity::{ActivityKind, ActivityRecord};
/// Re-export the color type.
pub use color::Color;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the roster.
pub use roster::Roster;
/// Re-export soul types.
pub use soul::{Soul, SoulId, SoulSeed};
/// Re-export trait types.
pub use traits::PersonalityTrait;
