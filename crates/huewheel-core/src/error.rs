//! Error types for the harmony engine.

/// Raised when a hue breakpoint table cannot be interpolated.
///
/// The built-in table is fixed and never produces this; it guards tables
/// built through [`crate::hue::HueRemapper::from_knots`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("degenerate hue segment [{low}, {high}]")]
    DegenerateSegment { low: f64, high: f64 },

    #[error("hue knots are not strictly increasing at index {index}")]
    NonMonotonic { index: usize },

    #[error("hue knot table needs at least two knots, got {0}")]
    TooFewKnots(usize),
}

/// Errors surfaced by the picker's public operations.
///
/// Every operation returning this error has validated its input before
/// touching any marker state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PickerError {
    #[error("invalid mode specified: {0}")]
    InvalidMode(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("marker index {index} out of range (have {len})")]
    MarkerOutOfRange { index: usize, len: usize },

    #[error("marker {0} is hidden and cannot be dragged")]
    MarkerHidden(usize),

    #[error("pointer position ({x}, {y}) is not finite")]
    InvalidPointer { x: f64, y: f64 },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
