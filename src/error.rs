//! Error type shared by every fallible operation in the crate.

/// Errors raised by tour construction, the genetic operators and the engine.
///
/// All variants are precondition failures detected at the start of the
/// affected operation. A generation step that fails is not retried; the
/// caller is expected to abort the run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TspError {
    /// Empty city set, empty population, or inconsistent engine parameters.
    #[error("InvalidConfiguration: {0}")]
    InvalidConfiguration(String),

    /// Tour distance is zero, so fitness is undefined.
    #[error("DegenerateTour: {cities} cities, distance {distance}")]
    DegenerateTour { cities: usize, distance: f64 },

    /// The mutation retry budget ran out before a swap passed validation.
    #[error("UnresolvedMutation: position {position} failed validation after {attempts} attempts")]
    UnresolvedMutation { position: usize, attempts: usize },

    /// A position or city index outside the valid range.
    #[error("IndexOutOfRange: {what} index {index} (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TspError>;

impl TspError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TspError::InvalidConfiguration(message.into())
    }

    pub(crate) fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        TspError::IndexOutOfRange { what, index, len }
    }
}
