//! Core types and conventions for the compass-dial library

/// Starting dial rotation in degrees, matching the simulated default heading
pub const DEFAULT_INITIAL_ROTATION: f32 = 220.0;

/// Earth axes convention of the magnetometer feeding the dial
///
/// Defines how the X and Y axes of a level sensor map onto north and east.
/// Headings produced from any convention share one output convention:
/// degrees clockwise from north in `[0, 360)`.
///
/// # Conventions
/// - **NWU**: North-West-Up (X=North, Y=West, Z=Up)
/// - **ENU**: East-North-Up (X=East, Y=North, Z=Up)
/// - **NED**: North-East-Down (X=North, Y=East, Z=Down)
///
/// # Example
/// ```
/// use compass_dial::{CompassSettings, CompassViewModel, Convention};
///
/// let settings = CompassSettings {
///     convention: Convention::Enu,
///     ..Default::default()
/// };
/// let view_model = CompassViewModel::with_settings(settings, ());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Convention {
    /// North-West-Up coordinate system
    #[default]
    Nwu,
    /// East-North-Up coordinate system
    Enu,
    /// North-East-Down coordinate system
    Ned,
}

/// Compass settings
///
/// # Example
/// ```
/// use compass_dial::{CompassSettings, Convention};
///
/// let settings = CompassSettings {
///     convention: Convention::Ned,
///     initial_rotation: 0.0, // start with north up
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompassSettings {
    /// Axes convention of the magnetometer (NWU, ENU, or NED)
    pub convention: Convention,
    /// Dial rotation in degrees at session start
    ///
    /// May lie outside `[0, 360)`; it is the seed of an unbounded accumulator.
    pub initial_rotation: f32,
}

impl Default for CompassSettings {
    fn default() -> Self {
        Self {
            convention: Convention::default(),
            initial_rotation: DEFAULT_INITIAL_ROTATION,
        }
    }
}

/// Where the headings driving the dial come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingMode {
    /// Samples arrive from a live heading source
    #[default]
    Sensor,
    /// No live sensor; headings are injected manually or at random
    Simulated,
}

/// Geographic position reported by a location source
///
/// Display only; the heading algorithm never consumes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}
