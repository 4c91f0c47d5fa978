//! Magnetometer-to-heading conversion at the sensor boundary
//!
//! Every heading that enters the dial uses one convention: degrees clockwise
//! from north in `[0, 360)`. This module is the only place sensor axes are
//! interpreted.

use crate::math::{RAD_TO_DEG, normalize_degrees};
use crate::types::Convention;
use nalgebra::{RealField, Vector2, Vector3};

/// Calculate the heading of a level device from a magnetometer reading
///
/// Only the horizontal field components are used; the device is assumed to be
/// held flat. The reading is mapped onto a `(north, east)` pair according to
/// the axes convention and the angle of that pair is returned.
///
/// # Arguments
/// * `convention` - Earth axes convention of the sensor
/// * `magnetometer` - Magnetometer reading in any consistent unit
///
/// # Returns
/// Heading in degrees in `[0, 360)`, 0° = north, clockwise positive. `None`
/// if the horizontal field is zero or the reading is not finite.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use compass_dial::{Convention, compass::calculate_heading};
///
/// let mag = Vector3::new(0.0, -1.0, 0.0); // East in NWU
/// let heading = calculate_heading(Convention::Nwu, mag).unwrap();
/// assert!((heading - 90.0).abs() < 1e-3);
/// ```
pub fn calculate_heading(convention: Convention, magnetometer: Vector3<f32>) -> Option<f32> {
    let horizontal = horizontal_field(convention, magnetometer);

    if !horizontal.iter().all(|c| c.is_finite()) || horizontal.norm_squared() == 0.0 {
        return None;
    }

    let heading_rad = horizontal.y.atan2(horizontal.x);

    Some(normalize_degrees(heading_rad * RAD_TO_DEG))
}

/// Project a reading onto `(north, east)` for the given convention
fn horizontal_field(convention: Convention, magnetometer: Vector3<f32>) -> Vector2<f32> {
    match convention {
        // X=North, Y=West
        Convention::Nwu => Vector2::new(magnetometer.x, -magnetometer.y),
        // X=East, Y=North
        Convention::Enu => Vector2::new(magnetometer.y, magnetometer.x),
        // X=North, Y=East
        Convention::Ned => Vector2::new(magnetometer.x, magnetometer.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::ComplexField;

    fn assert_heading(convention: Convention, mag: Vector3<f32>, expected: f32) {
        let heading = calculate_heading(convention, mag).unwrap();
        assert!(
            (heading - expected).abs() < 1e-3,
            "{:?} heading for {:?} should be {}°, got {}",
            convention,
            mag,
            expected,
            heading
        );
    }

    #[test]
    fn test_compass_nwu_cardinal_directions() {
        assert_heading(Convention::Nwu, Vector3::new(1.0, 0.0, 0.0), 0.0);
        assert_heading(Convention::Nwu, Vector3::new(0.0, -1.0, 0.0), 90.0);
        assert_heading(Convention::Nwu, Vector3::new(-1.0, 0.0, 0.0), 180.0);
        assert_heading(Convention::Nwu, Vector3::new(0.0, 1.0, 0.0), 270.0);
    }

    #[test]
    fn test_compass_enu_cardinal_directions() {
        assert_heading(Convention::Enu, Vector3::new(0.0, 1.0, 0.0), 0.0);
        assert_heading(Convention::Enu, Vector3::new(1.0, 0.0, 0.0), 90.0);
        assert_heading(Convention::Enu, Vector3::new(0.0, -1.0, 0.0), 180.0);
        assert_heading(Convention::Enu, Vector3::new(-1.0, 0.0, 0.0), 270.0);
    }

    #[test]
    fn test_compass_ned_cardinal_directions() {
        assert_heading(Convention::Ned, Vector3::new(1.0, 0.0, 0.0), 0.0);
        assert_heading(Convention::Ned, Vector3::new(0.0, 1.0, 0.0), 90.0);
        assert_heading(Convention::Ned, Vector3::new(-1.0, 0.0, 0.0), 180.0);
        assert_heading(Convention::Ned, Vector3::new(0.0, -1.0, 0.0), 270.0);
    }

    #[test]
    fn test_compass_ignores_vertical_component() {
        let flat = calculate_heading(Convention::Nwu, Vector3::new(0.6, -0.6, 0.0)).unwrap();
        let dipped = calculate_heading(Convention::Nwu, Vector3::new(0.6, -0.6, -0.8)).unwrap();
        assert!((flat - 45.0).abs() < 1e-3);
        assert!((flat - dipped).abs() < 1e-6);
    }

    #[test]
    fn test_compass_scale_invariant() {
        let unit = calculate_heading(Convention::Enu, Vector3::new(0.5, 0.5, 0.0)).unwrap();
        let micro_tesla = calculate_heading(Convention::Enu, Vector3::new(25.0, 25.0, -40.0)).unwrap();
        assert!((unit - micro_tesla).abs() < 1e-3);
    }

    #[test]
    fn test_compass_degenerate_readings() {
        assert_eq!(calculate_heading(Convention::Nwu, Vector3::zeros()), None);
        assert_eq!(
            calculate_heading(Convention::Nwu, Vector3::new(0.0, 0.0, 48.0)),
            None
        );
        assert_eq!(
            calculate_heading(Convention::Ned, Vector3::new(f32::NAN, 1.0, 0.0)),
            None
        );
    }

    #[test]
    fn test_compass_heading_range() {
        // Sweep the field around the horizon; headings stay in [0, 360)
        for angle_deg in (0..360).step_by(15) {
            let angle_rad = (angle_deg as f32).to_radians();
            let mag = Vector3::new(angle_rad.cos(), -angle_rad.sin(), 0.0); // NWU

            let heading = calculate_heading(Convention::Nwu, mag).unwrap();

            assert!(
                (0.0..360.0).contains(&heading),
                "Heading {:.1}° out of range for field angle {}°",
                heading,
                angle_deg
            );
            let error = crate::unwrapper::shortest_delta(angle_deg as f64, f64::from(heading));
            assert!(error.abs() < 1e-2, "field {}° gave heading {}", angle_deg, heading);
        }
    }
}
