//! This module contains the simulated range sensors, the bounding box pre-filter they use to keep
//! their local view small, and the mount that binds a sensor to a moving carrier.

mod mount;
mod range_sensor;
mod surroundings;

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

pub use mount::{Mount, MountedSensor};
pub use range_sensor::{nearest_in_beam, RangeSensor};
pub use surroundings::Surroundings;

/// The smallest angular step, in degrees, a scan will sweep with
pub const MIN_SCAN_STEP: f64 = 1.0;

/// Identity of a sensor, unique among the sensors of one carrier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SensorId(String);

impl SensorId {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SensorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SensorId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Borrow<str> for SensorId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A single range reading in the producing sensor's local frame: the measured distance and the
/// direction, in degrees from the sensor's facing direction, the beam was pointed at.
///
/// A `range` of exactly zero is the sentinel for both "nothing in the beam" and "the nearest
/// point in the beam is beyond the sensor's range". The two cases are deliberately not told apart.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub range: f64,
    pub angle: f64,
}

impl Reading {
    pub fn new(range: f64, angle: f64) -> Self {
        Self { range, angle }
    }

    pub fn nothing(angle: f64) -> Self {
        Self { range: 0.0, angle }
    }

    pub fn is_sentinel(&self) -> bool {
        self.range == 0.0
    }
}

/// Readings of one sweep, in order of increasing swept angle
pub type ScanResult = Vec<Reading>;

/// The read/scan capability shared by free-standing and mounted sensors
pub trait RangeFinder {
    /// Read the nearest obstacle in the beam pointed `at_angle` degrees from the facing direction
    fn read(&mut self, at_angle: f64) -> Reading;

    /// Sweep `read` from `angle_from` up to but excluding `angle_to` with a fixed `step`, all in
    /// degrees.
    fn scan(&mut self, angle_from: f64, angle_to: f64, step: f64) -> ScanResult;
}
