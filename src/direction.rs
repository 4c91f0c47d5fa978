//! Eight-point direction labels for headings

use crate::math::{is_valid_heading, normalize_degrees};
use core::fmt;

/// Width of each direction sector in degrees
pub const SECTOR_WIDTH: f32 = 45.0;

/// One of the 8 cardinal and intercardinal compass points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl Direction {
    /// All directions in clockwise order starting at north
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::Northeast,
        Direction::East,
        Direction::Southeast,
        Direction::South,
        Direction::Southwest,
        Direction::West,
        Direction::Northwest,
    ];

    /// Full human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::Northeast => "Northeast",
            Direction::East => "East",
            Direction::Southeast => "Southeast",
            Direction::South => "South",
            Direction::Southwest => "Southwest",
            Direction::West => "West",
            Direction::Northwest => "Northwest",
        }
    }

    /// Short label used on the dial face
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::Northeast => "NE",
            Direction::East => "E",
            Direction::Southeast => "SE",
            Direction::South => "S",
            Direction::Southwest => "SW",
            Direction::West => "W",
            Direction::Northwest => "NW",
        }
    }

    /// Heading in degrees at the center of this direction's sector
    pub fn center(&self) -> f32 {
        match self {
            Direction::North => 0.0,
            Direction::Northeast => 45.0,
            Direction::East => 90.0,
            Direction::Southeast => 135.0,
            Direction::South => 180.0,
            Direction::Southwest => 225.0,
            Direction::West => 270.0,
            Direction::Northwest => 315.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a heading into its 8-point direction
///
/// Sectors are 45° wide and centered on each compass point, so boundaries sit
/// at odd multiples of 22.5°. Each sector includes its low boundary and
/// excludes its high one: `22.5` is northeast, `337.5` is north.
///
/// Input outside `[0, 360)` is normalized first. Returns `None` only for NaN
/// or infinite input.
///
/// # Example
/// ```
/// use compass_dial::{Direction, classify};
///
/// assert_eq!(classify(10.0), Some(Direction::North));
/// assert_eq!(classify(22.5), Some(Direction::Northeast));
/// assert_eq!(classify(-90.0), Some(Direction::West));
/// assert_eq!(classify(f32::NAN), None);
/// ```
pub fn classify(angle: f32) -> Option<Direction> {
    if !is_valid_heading(angle) {
        return None;
    }

    Some(sector_of(normalize_degrees(angle)))
}

/// Direction sector of a heading already in `[0, 360)`
pub(crate) fn sector_of(heading: f32) -> Direction {
    // Shift by half a sector so each boundary lands on a whole multiple.
    // f64 keeps the division exact at the boundaries.
    let width = f64::from(SECTOR_WIDTH);
    let index = ((f64::from(heading) + width / 2.0) / width) as usize;
    Direction::ALL[index % Direction::ALL.len()]
}
