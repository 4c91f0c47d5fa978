#![no_std]

//! [![github]](https://github.com/wboayue/compass-dial)&ensp;[![crates-io]](https://crates.io/crates/compass-dial)&ensp;[![license]](https://opensource.org/licenses/MIT)
//!
//! [github]: https://img.shields.io/badge/github-8da0cb?style=for-the-badge&labelColor=555555&logo=github
//! [crates-io]: https://img.shields.io/badge/crates.io-fc8d62?style=for-the-badge&labelColor=555555&logo=rust
//! [license]: https://img.shields.io/badge/License-MIT-blue.svg?style=for-the-badge&labelColor=555555
//!
//! Compass Dial - heading-to-rotation reconciliation for live compass displays
//!
//! Magnetic heading sensors report angles that wrap at 0°/360°. Animating a
//! dial straight to each reading makes it spin the long way around whenever
//! the heading crosses north. This library keeps an unbounded rotation that
//! always moves along the shortest arc, and labels each heading with one of
//! the 8 compass points.
//!
//! # Features
//!
//! - Shortest-arc unwrapping with a deterministic tie-break for opposite headings
//! - No-op detection so unchanged rotations never re-trigger animation
//! - 8-point direction classification with exact 22.5° boundaries
//! - Magnetometer adapter for NWU, ENU and NED sensor axes
//! - View model with sensor fallback to simulated headings
//! - `#![no_std]` compatible for embedded systems
//!
//! # Quick Start
//!
//! ```rust
//! use compass_dial::{CompassViewModel, Direction};
//!
//! let mut view_model = CompassViewModel::new(());
//!
//! // Dial starts at 220°, heading north takes the short way round
//! view_model.on_raw_heading(350.0).unwrap();
//! view_model.on_raw_heading(10.0).unwrap();
//!
//! let reading = view_model.reading();
//! assert_eq!(reading.rotation, 370.0);
//! assert_eq!(reading.direction, Direction::North);
//!
//! // Rotate the dial graphic by this, keep the needle fixed
//! let _angle = reading.dial_rotation();
//! ```
//!
//! For more documentation and examples, see: <https://github.com/wboayue/compass-dial>

pub mod compass;
mod direction;
mod error;
mod math;
mod session;
mod types;
mod unwrapper;

// Re-export all public types and functions
pub use compass::calculate_heading;
pub use direction::{Direction, SECTOR_WIDTH, classify};
pub use error::CompassError;
pub use math::{
    DEG_TO_RAD, FULL_TURN, HALF_TURN, RAD_TO_DEG, is_valid_heading, normalize_degrees,
    normalize_rotation,
};
pub use session::{
    CompassReading, CompassSession, CompassView, CompassViewModel, SampleSource, Subscription,
};
pub use types::*;
pub use unwrapper::{HeadingUnwrapper, ROTATION_TOLERANCE, RotationUpdate, shortest_delta, step};
