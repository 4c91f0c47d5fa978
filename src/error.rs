//! Error types for the compass-dial library

/// Failures surfaced by the compass
///
/// None of these are fatal: each degrades to a status message or to keeping
/// the last known dial state.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CompassError {
    /// The location source refused access
    #[error("location permission denied")]
    PermissionDenied,

    /// A heading was NaN or infinite and was dropped
    #[error("invalid heading: {0}")]
    InvalidHeading(f32),

    /// The heading source could not start; headings must be simulated
    #[error("heading sensor unavailable")]
    SensorUnavailable,
}
