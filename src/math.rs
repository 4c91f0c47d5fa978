//! Angle utilities for the compass-dial library

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Degrees in one full turn
pub const FULL_TURN: f32 = 360.0;

/// Degrees in half a turn, the largest step the dial may take in one update
pub const HALF_TURN: f32 = 180.0;

/// Wrap an angle in degrees into `[0, 360)`
///
/// Negative and overflowing values are folded back onto the circle, so
/// `-10` becomes `350` and `725` becomes `5`. Non-finite input is returned
/// unchanged; callers check [`is_valid_heading`] first.
///
/// # Example
/// ```
/// use compass_dial::normalize_degrees;
///
/// assert_eq!(normalize_degrees(-10.0), 350.0);
/// assert_eq!(normalize_degrees(725.0), 5.0);
/// ```
pub fn normalize_degrees(angle: f32) -> f32 {
    ((angle % FULL_TURN) + FULL_TURN) % FULL_TURN
}

/// Fold an unbounded dial rotation into `[0, 360)`
///
/// Same folding as [`normalize_degrees`] at the accumulator's f64 precision.
pub fn normalize_rotation(rotation: f64) -> f64 {
    let full_turn = f64::from(FULL_TURN);
    ((rotation % full_turn) + full_turn) % full_turn
}

/// Whether a heading can enter the dial state at all
///
/// Out-of-range finite values are acceptable because they are normalized;
/// NaN and infinities are not.
pub fn is_valid_heading(angle: f32) -> bool {
    angle.is_finite()
}
