//! Compass session state and the view model that drives a dial renderer
//!
//! Samples flow one way: a heading source (or the random simulator) calls into
//! [`CompassViewModel`], which advances the [`CompassSession`] and publishes a
//! [`CompassReading`] to a [`CompassView`]. All mutation goes through
//! `&mut self`, so a view model has exactly one writer; hosts merging several
//! sources must serialize their callbacks onto it.

use crate::compass::calculate_heading;
use crate::direction::{Direction, sector_of};
use crate::error::CompassError;
use crate::math::{is_valid_heading, normalize_degrees};
use crate::types::{CompassSettings, Coordinates, HeadingMode};
use crate::unwrapper::{HeadingUnwrapper, RotationUpdate};
use log::{debug, trace, warn};
use nalgebra::Vector3;
use rand::Rng;

/// Snapshot handed to the rendering layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompassReading {
    /// Unbounded rotation to animate the dial toward, in degrees
    pub rotation: f64,
    /// Latest raw heading in `[0, 360)`
    pub heading: f32,
    /// Direction label of the raw heading
    pub direction: Direction,
}

impl CompassReading {
    /// Rotation to apply to the dial graphic so the needle can stay fixed
    pub fn dial_rotation(&self) -> f64 {
        -self.rotation
    }

    /// Whether the label or the whole-degree text differ from `other`
    pub(crate) fn is_displayed_differently(&self, other: &CompassReading) -> bool {
        self.direction != other.direction || self.rounded_heading() != other.rounded_heading()
    }

    /// Heading rounded to whole degrees for text display
    ///
    /// Rounds half up and folds 360 back to 0.
    pub fn rounded_heading(&self) -> u16 {
        // Headings are non-negative, so truncation is floor
        let rounded = (self.heading + 0.5) as u16;
        rounded % 360
    }
}

/// Dial state for one compass view session
///
/// Couples the unwrapped rotation with the most recent raw heading and the
/// orthogonal display state (location, last status).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompassSession {
    unwrapper: HeadingUnwrapper,
    heading: f32,
    location: Option<Coordinates>,
    status: Option<CompassError>,
}

impl CompassSession {
    /// Start a session with the dial at `initial_rotation` degrees
    pub fn new(initial_rotation: f64) -> Self {
        let unwrapper = HeadingUnwrapper::with_rotation(initial_rotation);
        Self {
            heading: unwrapper.heading(),
            unwrapper,
            location: None,
            status: None,
        }
    }

    /// Advance the session with one raw heading
    ///
    /// Non-finite headings are rejected and leave the session untouched.
    pub fn apply(&mut self, heading: f32) -> Result<RotationUpdate, CompassError> {
        if !is_valid_heading(heading) {
            return Err(CompassError::InvalidHeading(heading));
        }

        let heading = normalize_degrees(heading);
        let update = self.unwrapper.update(heading)?;
        self.heading = heading;

        Ok(update)
    }

    /// Current reading for the renderer
    pub fn reading(&self) -> CompassReading {
        CompassReading {
            rotation: self.unwrapper.rotation(),
            heading: self.heading,
            direction: sector_of(self.heading),
        }
    }

    /// Unbounded dial rotation in degrees
    pub fn rotation(&self) -> f64 {
        self.unwrapper.rotation()
    }

    /// Latest raw heading in `[0, 360)`
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Last reported position, `None` while waiting for a first fix
    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    /// Last non-fatal failure shown to the user
    pub fn status(&self) -> Option<CompassError> {
        self.status
    }
}

impl Default for CompassSession {
    fn default() -> Self {
        Self::new(f64::from(CompassSettings::default().initial_rotation))
    }
}

/// Rendering layer fed by the view model
///
/// Every method has an empty default so renderers implement only what they
/// display. `()` is a view that discards everything.
pub trait CompassView {
    /// A new dial rotation and label are available
    fn on_reading(&mut self, _reading: &CompassReading) {}

    /// A non-fatal failure should be shown as a status message
    fn on_status(&mut self, _status: &CompassError) {}

    /// A new position is available for display
    fn on_location(&mut self, _coordinates: &Coordinates) {}
}

impl CompassView for () {}

impl<V: CompassView + ?Sized> CompassView for &mut V {
    fn on_reading(&mut self, reading: &CompassReading) {
        (**self).on_reading(reading)
    }

    fn on_status(&mut self, status: &CompassError) {
        (**self).on_status(status)
    }

    fn on_location(&mut self, coordinates: &Coordinates) {
        (**self).on_location(coordinates)
    }
}

/// Lifecycle of an external sample feed (heading sensor, location watch)
///
/// Samples themselves are pushed into the view model by the host; the source
/// only controls whether the underlying hardware is running.
pub trait SampleSource {
    /// Begin delivering samples
    fn start(&mut self) -> Result<(), CompassError>;

    /// Stop delivering samples and release the underlying resources
    fn stop(&mut self);
}

/// Running source that is stopped when the guard is dropped
pub struct Subscription<'a, S: SampleSource + ?Sized> {
    source: &'a mut S,
}

impl<'a, S: SampleSource + ?Sized> Subscription<'a, S> {
    /// Stop the source now instead of at end of scope
    pub fn cancel(self) {
        drop(self)
    }

    /// Borrow the running source
    pub fn source(&self) -> &S {
        self.source
    }
}

impl<S: SampleSource + ?Sized> Drop for Subscription<'_, S> {
    fn drop(&mut self) {
        self.source.stop();
    }
}

/// Bridges heading samples to a dial renderer
///
/// # Example
/// ```
/// use compass_dial::{CompassReading, CompassView, CompassViewModel, Direction};
///
/// #[derive(Default)]
/// struct Label(Option<Direction>);
///
/// impl CompassView for Label {
///     fn on_reading(&mut self, reading: &CompassReading) {
///         self.0 = Some(reading.direction);
///     }
/// }
///
/// let mut view_model = CompassViewModel::new(Label::default());
/// view_model.on_raw_heading(95.0).unwrap();
/// assert_eq!(view_model.view().0, Some(Direction::East));
/// ```
pub struct CompassViewModel<V: CompassView> {
    settings: CompassSettings,
    session: CompassSession,
    mode: HeadingMode,
    view: V,
}

impl<V: CompassView> CompassViewModel<V> {
    /// Create a view model with default settings
    pub fn new(view: V) -> Self {
        Self::with_settings(CompassSettings::default(), view)
    }

    /// Create a view model with specified settings
    pub fn with_settings(settings: CompassSettings, view: V) -> Self {
        Self {
            settings,
            session: CompassSession::new(f64::from(settings.initial_rotation)),
            mode: HeadingMode::default(),
            view,
        }
    }

    /// Feed one raw heading in degrees
    ///
    /// Advances the dial along the shortest arc and relabels from the raw
    /// heading. The reading is published when the rotation moved or when the
    /// label or displayed whole-degree heading differs from the last one, so
    /// a step below [`ROTATION_TOLERANCE`](crate::ROTATION_TOLERANCE) that
    /// crosses a sector boundary still reaches the view. Non-finite headings
    /// are dropped with [`CompassError::InvalidHeading`]; the previous
    /// rotation and label stay in place.
    pub fn on_raw_heading(&mut self, heading: f32) -> Result<RotationUpdate, CompassError> {
        trace!("heading sample {}", heading);

        let before = self.session.reading();
        let update = match self.session.apply(heading) {
            Ok(update) => update,
            Err(err) => {
                warn!("dropping heading sample: {}", err);
                return Err(err);
            }
        };

        let reading = self.session.reading();
        if update.changed || reading.is_displayed_differently(&before) {
            debug!(
                "dial rotation {:.1} (delta {:+.1}) heading {:.1} {}",
                reading.rotation, update.delta, reading.heading, reading.direction
            );
            self.view.on_reading(&reading);
        }

        Ok(update)
    }

    /// Feed one magnetometer reading through the sensor adapter
    ///
    /// A reading with no horizontal field carries no heading and is dropped
    /// like any other unusable sample.
    pub fn on_magnetometer(
        &mut self,
        magnetometer: Vector3<f32>,
    ) -> Result<RotationUpdate, CompassError> {
        match calculate_heading(self.settings.convention, magnetometer) {
            Some(heading) => self.on_raw_heading(heading),
            None => {
                warn!("magnetometer reading has no horizontal field: {:?}", magnetometer);
                Err(CompassError::InvalidHeading(f32::NAN))
            }
        }
    }

    /// Inject a uniformly random heading in `[0, 360)`
    ///
    /// Takes the same path as a sensor sample. Used where no live sensor is
    /// available; the generator is supplied by the host.
    pub fn simulate_random_heading<R: Rng>(
        &mut self,
        rng: &mut R,
    ) -> Result<RotationUpdate, CompassError> {
        let heading = normalize_degrees(rng.random_range(0.0..360.0f32));
        debug!("simulated heading {:.1}", heading);
        self.on_raw_heading(heading)
    }

    /// Start a heading source, falling back to simulation if it fails
    ///
    /// Returns the running subscription, or `None` when the sensor is
    /// unavailable and the view model has switched to
    /// [`HeadingMode::Simulated`].
    pub fn attach_heading_source<'a, S: SampleSource + ?Sized>(
        &mut self,
        source: &'a mut S,
    ) -> Option<Subscription<'a, S>> {
        match source.start() {
            Ok(()) => {
                debug!("heading source started");
                self.mode = HeadingMode::Sensor;
                Some(Subscription { source })
            }
            Err(err) => {
                warn!("heading source failed to start ({}), simulating headings", err);
                self.mode = HeadingMode::Simulated;
                self.report(CompassError::SensorUnavailable);
                None
            }
        }
    }

    /// Start a location source for display
    ///
    /// A refusal is reported as a status message and never affects heading
    /// processing.
    pub fn attach_location_source<'a, S: SampleSource + ?Sized>(
        &mut self,
        source: &'a mut S,
    ) -> Option<Subscription<'a, S>> {
        match source.start() {
            Ok(()) => {
                debug!("location source started");
                Some(Subscription { source })
            }
            Err(err) => {
                warn!("location source failed to start: {}", err);
                self.report(err);
                None
            }
        }
    }

    /// Record a new position and forward it to the view
    pub fn on_location(&mut self, coordinates: Coordinates) {
        if !coordinates.latitude.is_finite() || !coordinates.longitude.is_finite() {
            warn!("dropping non-finite location {:?}", coordinates);
            return;
        }
        if coordinates.latitude.abs() > 90.0 || coordinates.longitude.abs() > 180.0 {
            warn!("dropping out-of-range location {:?}", coordinates);
            return;
        }

        trace!(
            "location {:.6}, {:.6}",
            coordinates.latitude, coordinates.longitude
        );
        self.session.location = Some(coordinates);
        self.view.on_location(&coordinates);
    }

    /// Return the dial to the configured initial rotation
    ///
    /// Location and status survive; they are not part of the dial.
    pub fn reset(&mut self) {
        let location = self.session.location;
        let status = self.session.status;

        self.session = CompassSession::new(f64::from(self.settings.initial_rotation));
        self.session.location = location;
        self.session.status = status;
        self.view.on_reading(&self.session.reading());
    }

    /// Update compass settings
    ///
    /// Takes effect for following samples; the dial is not reset.
    pub fn set_settings(&mut self, settings: CompassSettings) {
        self.settings = settings;
    }

    /// Get current compass settings
    pub fn settings(&self) -> CompassSettings {
        self.settings
    }

    /// Current reading for the renderer
    pub fn reading(&self) -> CompassReading {
        self.session.reading()
    }

    /// Dial state behind the published readings
    pub fn session(&self) -> &CompassSession {
        &self.session
    }

    /// Whether headings come from the sensor or the simulator
    pub fn mode(&self) -> HeadingMode {
        self.mode
    }

    /// Borrow the rendering layer
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutably borrow the rendering layer
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Consume the view model and hand back its view
    pub fn into_view(self) -> V {
        self.view
    }

    fn report(&mut self, status: CompassError) {
        self.session.status = Some(status);
        self.view.on_status(&status);
    }
}
