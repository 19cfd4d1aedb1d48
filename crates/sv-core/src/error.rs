use crate::soul::SoulId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or manipulating a roster.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The supplied roster contained no souls.
    #[error("roster is empty")]
    EmptyRoster,

    /// More than one soul was marked as focused.
    #[error("roster has {0} focused souls, expected at most one")]
    MultipleFocused(usize),

    /// A soul was supplied with an empty trait list.
    #[error("soul \"{0}\" has no personality traits")]
    EmptyTraits(String),

    /// Two souls in the roster share the same ID.
    #[error("duplicate soul id: {0}")]
    DuplicateSoul(SoulId),

    /// The requested soul ID does not exist in the roster.
    #[error("soul not found: {0}")]
    SoulNotFound(SoulId),

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
