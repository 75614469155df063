//! Error types for the stair plot surface.

use thiserror::Error;

/// Result type alias for surface operations.
pub type PlotResult<T> = std::result::Result<T, PlotError>;

/// Errors returned by the public surface API.
///
/// A call that fails never leaves the surface partially mutated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotError {
    /// Bad construction or layout parameters (slot count, flag length, ...).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Series rejected at the data boundary.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A colour string that is neither a known name nor `#rrggbb`.
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

impl PlotError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }
}
