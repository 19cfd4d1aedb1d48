use sv_core::CoreError;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors reported by the simulation.
///
/// These surface at configuration and roster-load time only; the per-tick
/// update never fails. Degenerate movement (unreachable targets, too-steep
/// terrain) is handled as a state-machine transition, not an error.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A configuration value was out of its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The roster failed validation.
    #[error(transparent)]
    Roster(#[from] CoreError),

    /// A roster must be loaded before this operation.
    #[error("no roster loaded")]
    NoRoster,
}
