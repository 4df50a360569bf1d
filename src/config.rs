//! Vehicle setups described as JSON, so a simulation run can be set up without code.
//!
//! ```json
//! {
//!   "name": "rover",
//!   "chassis": { "length": 20, "width": 15 },
//!   "pose": { "x": 200, "y": 60, "angle": 90 },
//!   "sensors": [
//!     { "sensor": { "name": "front", "beam": 30, "range": 150, "accuracy": 2 },
//!       "point": [5, 0], "orientation": 0 }
//!   ],
//!   "scan": { "from": -45, "to": 45, "step": 5 }
//! }
//! ```

use crate::common::AngleUnit;
use crate::diagnostics::DiagnosticSink;
use crate::geom2::Pose;
use crate::sensors::{ScanResult, SensorId};
use crate::vehicle::{Chassis, Vehicle};
use crate::{Point2, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSpec {
    pub name: String,

    /// Full beam width in degrees
    pub beam: f64,
    pub range: f64,
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountSpec {
    pub sensor: SensorSpec,

    /// Mount point in the vehicle frame
    pub point: [f64; 2],

    /// Facing direction relative to the vehicle heading, in degrees
    #[serde(default)]
    pub orientation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChassisSpec {
    pub length: f64,
    pub width: f64,

    /// Defaults to a quarter of the length behind the axle
    #[serde(default)]
    pub axle_offset: Option<f64>,
}

impl ChassisSpec {
    pub fn build(&self) -> Chassis {
        match self.axle_offset {
            Some(offset) => Chassis::with_axle_offset(self.length, self.width, offset),
            None => Chassis::new(self.length, self.width),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PoseSpec {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    #[serde(default)]
    pub unit: AngleUnit,
}

impl PoseSpec {
    pub fn build(&self) -> Pose {
        Pose::new(self.x, self.y, self.angle, self.unit)
    }
}

/// The sweep used for a scan, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanSettings {
    pub from: f64,
    pub to: f64,
    pub step: f64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            from: -90.0,
            to: 90.0,
            step: 1.0,
        }
    }
}

impl ScanSettings {
    /// Scan with every sensor of the vehicle over this sweep
    pub fn scan_all(&self, vehicle: &mut Vehicle) -> BTreeMap<SensorId, ScanResult> {
        vehicle.scan_all(self.from, self.to, self.step)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub name: String,
    pub chassis: ChassisSpec,
    #[serde(default)]
    pub pose: PoseSpec,
    #[serde(default)]
    pub sensors: Vec<MountSpec>,
    #[serde(default)]
    pub scan: ScanSettings,
}

impl VehicleConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the vehicle at its starting pose with every sensor mounted. A sensor that does not
    /// fit on the chassis fails the whole build.
    pub fn build(&self, sink: Arc<dyn DiagnosticSink>) -> Result<Vehicle> {
        let mut vehicle = Vehicle::new(&self.name, self.chassis.build())
            .with_sink(sink)
            .with_pose(self.pose.build());

        for spec in &self.sensors {
            vehicle.mount_sensor(
                &spec.sensor.name,
                spec.sensor.beam,
                spec.sensor.range,
                spec.sensor.accuracy,
                Point2::new(spec.point[0], spec.point[1]),
                spec.orientation,
            )?;
        }

        Ok(vehicle)
    }
}
