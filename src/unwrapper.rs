//! Shortest-arc heading unwrapping for continuous dial rotation

use crate::error::CompassError;
use crate::math::{FULL_TURN, HALF_TURN, is_valid_heading, normalize_degrees, normalize_rotation};
use crate::types::DEFAULT_INITIAL_ROTATION;

/// Rotation changes smaller than this (degrees) are treated as no motion
pub const ROTATION_TOLERANCE: f64 = 1e-3;

/// Result of feeding one heading through the unwrapper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationUpdate {
    /// Unbounded dial rotation after the update
    pub rotation: f64,
    /// Signed step applied, in `(-180, 180]`
    pub delta: f64,
    /// Whether the rotation moved; false means downstream work can be skipped
    pub changed: bool,
}

/// Signed shortest angular distance from `from` to `to` in degrees
///
/// Both angles may be any finite value. The result lies in `(-180, 180]`:
/// a heading exactly opposite is always reached by turning clockwise.
///
/// # Example
/// ```
/// use compass_dial::shortest_delta;
///
/// assert_eq!(shortest_delta(350.0, 10.0), 20.0);
/// assert_eq!(shortest_delta(10.0, 350.0), -20.0);
/// assert_eq!(shortest_delta(180.0, 0.0), 180.0);
/// ```
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    let delta = normalize_rotation(to) - normalize_rotation(from);
    let (full_turn, half_turn) = (f64::from(FULL_TURN), f64::from(HALF_TURN));

    if delta > half_turn {
        delta - full_turn
    } else if delta <= -half_turn {
        delta + full_turn
    } else {
        delta
    }
}

/// Pure state transition from `current` rotation toward `heading`
///
/// Returns the next rotation without touching any state, leaving the caller
/// to decide whether an unchanged result is worth propagating.
pub fn step(current: f64, heading: f32) -> RotationUpdate {
    let delta = shortest_delta(current, f64::from(heading));
    let rotation = current + delta;

    if delta.abs() < ROTATION_TOLERANCE || rotation == current {
        return RotationUpdate {
            rotation: current,
            delta: 0.0,
            changed: false,
        };
    }

    RotationUpdate {
        rotation,
        delta,
        changed: true,
    }
}

/// Stateful heading unwrapper
///
/// Converts a stream of wrap-around headings in `[0, 360)` into an unbounded
/// rotation that never moves more than 180° per update. Crossing north keeps
/// counting (350 → 10 gives 370, not 10), so a spring animation toward the
/// value never snaps the long way around.
///
/// The rotation is accumulated in f64 so it keeps sub-millidegree resolution
/// after many thousands of turns.
///
/// # Example
/// ```
/// use compass_dial::HeadingUnwrapper;
///
/// let mut unwrapper = HeadingUnwrapper::with_rotation(350.0);
/// let update = unwrapper.update(10.0).unwrap();
/// assert_eq!(update.rotation, 370.0);
/// assert!(update.changed);
///
/// // Repeating the heading is a no-op
/// assert!(!unwrapper.update(10.0).unwrap().changed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingUnwrapper {
    /// Rotation applied at construction and on reset
    initial_rotation: f64,
    /// Current unbounded rotation in degrees
    rotation: f64,
}

impl HeadingUnwrapper {
    /// Create an unwrapper starting at the default 220°
    pub fn new() -> Self {
        Self::with_rotation(f64::from(DEFAULT_INITIAL_ROTATION))
    }

    /// Create an unwrapper starting at `initial_rotation` degrees
    ///
    /// A non-finite seed falls back to the default so the accumulator never
    /// starts out poisoned.
    pub fn with_rotation(initial_rotation: f64) -> Self {
        let initial_rotation = if initial_rotation.is_finite() {
            initial_rotation
        } else {
            f64::from(DEFAULT_INITIAL_ROTATION)
        };

        Self {
            initial_rotation,
            rotation: initial_rotation,
        }
    }

    /// Feed one raw heading and advance the rotation along the shortest arc
    ///
    /// Finite headings outside `[0, 360)` are normalized. NaN and infinities
    /// are rejected with [`CompassError::InvalidHeading`] and leave the
    /// rotation untouched.
    pub fn update(&mut self, heading: f32) -> Result<RotationUpdate, CompassError> {
        if !is_valid_heading(heading) {
            return Err(CompassError::InvalidHeading(heading));
        }

        let update = step(self.rotation, heading);
        if update.changed {
            self.rotation = update.rotation;
        }

        Ok(update)
    }

    /// Current unbounded rotation in degrees
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Current rotation folded into `[0, 360)`
    pub fn heading(&self) -> f32 {
        // Narrowing can round 359.99999... up to 360
        normalize_degrees(normalize_rotation(self.rotation) as f32)
    }

    /// Rotation the unwrapper was seeded with
    pub fn initial_rotation(&self) -> f64 {
        self.initial_rotation
    }

    /// Return to the initial rotation
    pub fn reset(&mut self) {
        self.rotation = self.initial_rotation;
    }
}

impl Default for HeadingUnwrapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-3;

    #[test]
    fn test_default_rotation() {
        let unwrapper = HeadingUnwrapper::new();
        assert_eq!(unwrapper.rotation(), 220.0);
        assert_eq!(unwrapper.heading(), 220.0);
    }

    #[test]
    fn test_wrap_around_clockwise() {
        let mut unwrapper = HeadingUnwrapper::with_rotation(350.0);
        let update = unwrapper.update(10.0).unwrap();

        assert_eq!(update.delta, 20.0);
        assert_eq!(update.rotation, 370.0);
        assert_eq!(unwrapper.rotation(), 370.0);
    }

    #[test]
    fn test_wrap_around_counter_clockwise() {
        let mut unwrapper = HeadingUnwrapper::with_rotation(10.0);
        let update = unwrapper.update(350.0).unwrap();

        assert_eq!(update.delta, -20.0);
        assert_eq!(unwrapper.rotation(), -10.0);
    }

    #[test]
    fn test_opposite_heading_tie_break() {
        // +180 stays +180
        let mut unwrapper = HeadingUnwrapper::with_rotation(0.0);
        let update = unwrapper.update(180.0).unwrap();
        assert_eq!(update.delta, 180.0);
        assert_eq!(unwrapper.rotation(), 180.0);

        // -180 is remapped to +180
        let mut unwrapper = HeadingUnwrapper::with_rotation(180.0);
        let update = unwrapper.update(0.0).unwrap();
        assert_eq!(update.delta, 180.0);
        assert_eq!(unwrapper.rotation(), 360.0);
    }

    #[test]
    fn test_idempotent_repeat() {
        let mut unwrapper = HeadingUnwrapper::new();

        let first = unwrapper.update(123.4).unwrap();
        assert!(first.changed);
        let rotation = unwrapper.rotation();

        let second = unwrapper.update(123.4).unwrap();
        assert!(!second.changed);
        assert_eq!(second.delta, 0.0);
        assert_eq!(unwrapper.rotation(), rotation);
    }

    #[test]
    fn test_same_as_initial_is_noop() {
        let mut unwrapper = HeadingUnwrapper::new();
        let update = unwrapper.update(220.0).unwrap();
        assert!(!update.changed);
        assert_eq!(update.rotation, 220.0);
    }

    #[test]
    fn test_accumulates_across_multiple_turns() {
        let mut unwrapper = HeadingUnwrapper::with_rotation(0.0);

        // Two full clockwise turns in 90° steps
        for i in 1..=8 {
            unwrapper.update((i * 90 % 360) as f32).unwrap();
        }

        assert!((unwrapper.rotation() - 720.0).abs() < EPSILON);
        assert_eq!(unwrapper.heading(), 0.0);
    }

    #[test]
    fn test_out_of_range_heading_normalized() {
        let mut unwrapper = HeadingUnwrapper::with_rotation(0.0);
        let update = unwrapper.update(-90.0).unwrap();
        assert_eq!(update.delta, -90.0);
        assert_eq!(unwrapper.rotation(), -90.0);

        let update = unwrapper.update(450.0).unwrap();
        assert_eq!(update.delta, 180.0);
        assert_eq!(unwrapper.rotation(), 90.0);
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut unwrapper = HeadingUnwrapper::with_rotation(42.0);

        assert!(matches!(
            unwrapper.update(f32::NAN),
            Err(CompassError::InvalidHeading(_))
        ));
        assert_eq!(
            unwrapper.update(f32::INFINITY),
            Err(CompassError::InvalidHeading(f32::INFINITY))
        );
        assert_eq!(unwrapper.rotation(), 42.0);
    }

    #[test]
    fn test_non_finite_seed_falls_back() {
        let unwrapper = HeadingUnwrapper::with_rotation(f64::NAN);
        assert_eq!(unwrapper.rotation(), f64::from(DEFAULT_INITIAL_ROTATION));
    }

    #[test]
    fn test_reset() {
        let mut unwrapper = HeadingUnwrapper::with_rotation(100.0);
        unwrapper.update(250.0).unwrap();
        unwrapper.update(30.0).unwrap();
        assert_ne!(unwrapper.rotation(), 100.0);

        unwrapper.reset();
        assert_eq!(unwrapper.rotation(), 100.0);
        assert_eq!(unwrapper.initial_rotation(), 100.0);
    }

    #[test]
    fn test_step_is_pure() {
        let update = step(720.0, 90.0);
        assert_eq!(update.rotation, 810.0);
        assert_eq!(update.delta, 90.0);
        assert!(update.changed);

        let update = step(-350.0, 10.0);
        assert!(!update.changed);
        assert_eq!(update.rotation, -350.0);
    }

    #[test]
    fn test_many_turns_stay_idempotent() {
        // 100 clockwise turns in 10° steps
        let mut unwrapper = HeadingUnwrapper::with_rotation(0.0);
        for i in 1..=3600 {
            unwrapper.update((i * 10 % 360) as f32).unwrap();
        }
        assert_eq!(unwrapper.rotation(), 36_000.0);

        for i in 0..3600 {
            let heading = i as f32 * 0.1 + 0.037;
            let first = unwrapper.update(heading).unwrap();
            let settled = unwrapper.rotation();

            let repeat = unwrapper.update(heading).unwrap();
            assert!(
                !repeat.changed,
                "repeat of {} moved the dial by {}",
                heading,
                repeat.delta
            );
            assert_eq!(unwrapper.rotation(), settled);

            let error = shortest_delta(normalize_rotation(first.rotation), f64::from(heading));
            assert!(error.abs() < EPSILON, "rotation {} off heading {}", first.rotation, heading);
        }
    }

    #[test]
    fn test_changed_means_moved() {
        let update = step(36_000.0, 0.0005);
        assert!(!update.changed);
        assert_eq!(update.rotation, 36_000.0);

        // Past 2^53 a 90° step may vanish in rounding
        let update = step(1e17, 90.0);
        assert_eq!(update.rotation == 1e17, !update.changed);
    }

    #[test]
    fn test_shortest_delta_range() {
        for from in (0..360).step_by(15) {
            for to in (0..360).step_by(15) {
                let delta = shortest_delta(from as f64, to as f64);
                assert!(
                    delta > -180.0 && delta <= 180.0,
                    "delta {} out of range for {} -> {}",
                    delta,
                    from,
                    to
                );
            }
        }
    }
}
