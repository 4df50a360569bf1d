//! A simulated time-of-flight range sensor. The reading is the distance from the sensor to the
//! nearest obstacle point inside its beam.
//!
//! Every change of pose rebuilds the sensor's point of view: the obstacle points in its
//! surroundings re-expressed in its local frame (facing along +x) and converted to polar form.
//! This is the expensive step, and it happens once per placement rather than once per reading, so
//! a sweep of many readings from the same pose only filters the cached polar points.

use crate::common::{AngleUnit, ANGLE_TOL};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::environment::ObstacleSet;
use crate::errors::SimError;
use crate::geom2::{to_local_all, to_polar_all, Polar, Pose};
use crate::sensors::surroundings::Surroundings;
use crate::sensors::{RangeFinder, Reading, ScanResult, SensorId, MIN_SCAN_STEP};
use crate::viz::VisualizationSink;
use crate::{Point2, Result};
use std::fmt::{Debug, Formatter};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Find the nearest point whose angle lies inside the beam of full width `beam` centered on
/// `center`, with both edges of the beam included. Distance ties resolve to the smaller angle.
/// All angles are in radians.
///
/// # Arguments
///
/// * `points`: candidate points in the sensor's local polar frame
/// * `center`: the direction the beam is pointed at
/// * `beam`: the full angular width of the beam
///
/// returns: Option<Polar>
///
/// # Examples
///
/// ```
/// use flatsense::sensors::nearest_in_beam;
/// use flatsense::Polar;
/// let points = [Polar::new(30.0, 0.0), Polar::new(10.0, 0.0), Polar::new(5.0, 1.4)];
/// let nearest = nearest_in_beam(&points, 0.0, 30f64.to_radians());
/// assert_eq!(nearest, Some(Polar::new(10.0, 0.0)));
/// ```
pub fn nearest_in_beam(points: &[Polar], center: f64, beam: f64) -> Option<Polar> {
    let low = center - beam / 2.0 - ANGLE_TOL;
    let high = center + beam / 2.0 + ANGLE_TOL;
    points
        .iter()
        .filter(|p| p.phi >= low && p.phi <= high)
        .min_by(|a, b| a.total_cmp(b))
        .copied()
}

#[derive(Clone)]
pub struct RangeSensor {
    id: SensorId,

    /// Full width of the beam, in radians
    beam: f64,

    /// Maximum measurable distance
    range: f64,

    /// Measurement accuracy. The sensor does not use it itself; carriers add it to their safety
    /// radius.
    accuracy: f64,

    pose: Pose,
    obstacles: Option<ObstacleSet>,
    surroundings: Surroundings,
    local_polar_points: Vec<Polar>,

    /// Raw nearest point of the last reading, range and angle in degrees, before the range limit
    detected_point: Option<Reading>,

    /// The last returned reading
    measured_point: Option<Reading>,

    view_rebuilds: usize,
    sink: Arc<dyn DiagnosticSink>,
}

impl Debug for RangeSensor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeSensor")
            .field("id", &self.id)
            .field("beam", &self.beam)
            .field("range", &self.range)
            .field("accuracy", &self.accuracy)
            .field("pose", &self.pose)
            .field("local_points", &self.local_polar_points.len())
            .finish_non_exhaustive()
    }
}

impl RangeSensor {
    /// Create a sensor at the origin facing along +x, with no obstacles loaded. Issues are
    /// reported through `tracing`; use `with_sink` to direct them elsewhere.
    ///
    /// # Arguments
    ///
    /// * `name`: the sensor's name, which must be unique on its carrier
    /// * `beam`: the full beam width, in degrees
    /// * `range`: the maximum measurable distance
    /// * `accuracy`: the measurement accuracy, in the same unit as `range`
    ///
    /// returns: RangeSensor
    pub fn new(name: &str, beam: f64, range: f64, accuracy: f64) -> Self {
        Self {
            id: SensorId::new(name),
            beam: beam.to_radians(),
            range,
            accuracy,
            pose: Pose::origin(),
            obstacles: None,
            surroundings: Surroundings::empty(Point2::origin(), range),
            local_polar_points: Vec::new(),
            detected_point: None,
            measured_point: None,
            view_rebuilds: 0,
            sink: TracingSink::shared(),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn id(&self) -> &SensorId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.id.as_str()
    }

    /// Full beam width in degrees
    pub fn beam(&self) -> f64 {
        self.beam.to_degrees()
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn position(&self) -> Point2 {
        self.pose.position()
    }

    /// Orientation in radians
    pub fn orientation(&self) -> f64 {
        self.pose.theta
    }

    pub fn surroundings(&self) -> &Surroundings {
        &self.surroundings
    }

    /// The obstacle points around the sensor in its local polar frame, as of the last placement
    pub fn local_polar_points(&self) -> &[Polar] {
        &self.local_polar_points
    }

    pub fn detected_point(&self) -> Option<Reading> {
        self.detected_point
    }

    pub fn measured_point(&self) -> Option<Reading> {
        self.measured_point
    }

    /// How many times the local point of view has been rebuilt since construction
    pub fn view_rebuilds(&self) -> usize {
        self.view_rebuilds
    }

    pub fn obstacles(&self) -> Option<&ObstacleSet> {
        self.obstacles.as_ref()
    }

    /// Hand the sensor the obstacles to detect, replacing any previously loaded set, and rebuild
    /// its point of view at the current pose. Returns the number of obstacle points.
    pub fn load_environment(&mut self, obstacles: &ObstacleSet) -> usize {
        self.obstacles = Some(obstacles.clone());
        self.rebuild_view();
        obstacles.len()
    }

    /// Place the sensor at a new position and orientation, rebuilding its point of view once
    pub fn place(&mut self, pose: Pose) {
        self.pose = pose;
        self.rebuild_view();
    }

    /// Move the sensor to `position` keeping its orientation
    pub fn translate(&mut self, position: Point2) {
        self.pose = Pose::from_point(position, self.pose.theta);
        self.rebuild_view();
    }

    /// Turn the sensor to face `angle` in place. The surroundings only depend on the position, so
    /// they are kept and only the local view is rebuilt.
    pub fn rotate(&mut self, angle: f64, unit: AngleUnit) {
        self.pose.theta = unit.to_radians(angle);
        self.rebuild_view();
    }

    fn rebuild_view(&mut self) {
        let position = self.pose.position();
        let source = self.obstacles.as_ref().map(|o| o.id());

        if !self.surroundings.is_valid_for(&position, source) {
            self.surroundings = match &self.obstacles {
                Some(obstacles) => Surroundings::compute(position, self.range, obstacles),
                None => Surroundings::empty(position, self.range),
            };
        }

        let local = to_local_all(self.surroundings.points(), &self.pose.to_iso());
        self.local_polar_points = to_polar_all(&local);
        self.view_rebuilds += 1;

        debug!(
            sensor = %self.id,
            x = position.x,
            y = position.y,
            heading = self.pose.heading_degrees(),
            points = self.local_polar_points.len(),
            "rebuilt sensor point of view"
        );
    }

    /// Simulate a reading with the beam pointed `at_angle` degrees from the facing direction.
    ///
    /// The reading is the nearest point in the beam. If the beam is empty, or the nearest point
    /// is farther than the sensor's range, the reading is the zero sentinel `(0, at_angle)`. The
    /// raw nearest point is kept separately in `detected_point` even when it is out of range.
    pub fn read(&mut self, at_angle: f64) -> Reading {
        let Some(nearest) = nearest_in_beam(&self.local_polar_points, at_angle.to_radians(), self.beam)
        else {
            self.detected_point = None;
            self.measured_point = Some(Reading::nothing(at_angle));
            return Reading::nothing(at_angle);
        };

        self.detected_point = Some(Reading::new(nearest.rho, nearest.phi.to_degrees()));

        let measure = if nearest.rho > self.range {
            0.0
        } else {
            nearest.rho
        };

        let reading = Reading::new(measure, at_angle);
        self.measured_point = Some(reading);
        reading
    }

    /// Sweep readings from `angle_from` up to but excluding `angle_to`, every `step` degrees,
    /// relative to the facing direction. A step below one degree is raised to one degree and
    /// reported as a warning. The sensor's pose is not touched by the sweep.
    pub fn scan(&mut self, angle_from: f64, angle_to: f64, step: f64) -> ScanResult {
        let step = if step < MIN_SCAN_STEP {
            self.sink.report(&SimError::SubMinimumScanStep {
                sensor: self.id.to_string(),
                requested: step,
            });
            MIN_SCAN_STEP
        } else {
            step
        };

        let readings = crate::common::arange(angle_from, angle_to, step)
            .into_iter()
            .map(|a| self.read(a))
            .collect::<Vec<_>>();

        debug!(
            sensor = %self.id,
            from = angle_from,
            to = angle_to,
            step,
            readings = readings.len(),
            "scan complete"
        );
        readings
    }

    /// Load real measurements taken from the sensor's current pose and place them in the world
    /// frame. See `io::load_measurements` for the file format.
    pub fn load_measurements(&self, path: &Path) -> Result<Vec<Point2>> {
        crate::io::load_measurements(path, &self.pose, self.sink.as_ref())
    }

    /// Draw the sensor's pose and its surroundings
    pub fn plot(&self, sink: &mut dyn VisualizationSink) {
        sink.draw_pose(self.name(), &self.pose);
    }

    pub fn plot_surroundings(&self, sink: &mut dyn VisualizationSink) {
        self.surroundings.plot(self.name(), sink);
    }
}

impl RangeFinder for RangeSensor {
    fn read(&mut self, at_angle: f64) -> Reading {
        RangeSensor::read(self, at_angle)
    }

    fn scan(&mut self, angle_from: f64, angle_to: f64, step: f64) -> ScanResult {
        RangeSensor::scan(self, angle_from, angle_to, step)
    }
}
