//! Simulation of range-finding sensors (ultrasonic rangefinders and the like) carried by a
//! vehicle moving through a flat, point-sampled environment.
//!
//! The core of the crate is the chain that turns a vehicle pose into sensor readings: the
//! vehicle pose is composed with each sensor's mount to get the sensor's global pose, the
//! obstacle points around the sensor are re-expressed in its local polar frame, and a reading is
//! the nearest of those points inside the beam.

use std::error::Error;

pub mod common;
pub mod config;
pub mod diagnostics;
pub mod environment;
pub mod errors;
pub mod geom2;
pub mod io;
pub mod sensors;
pub mod shapes;
pub mod vehicle;
pub mod viz;

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

pub type Point2 = parry2d_f64::na::Point2<f64>;
pub type Vector2 = parry2d_f64::na::Vector2<f64>;
pub type Iso2 = parry2d_f64::na::Isometry2<f64>;
pub type Aabb2 = parry2d_f64::bounding_volume::Aabb;

pub use crate::common::{AngleDir, AngleUnit};
pub use crate::diagnostics::{DiagnosticSink, RecordingSink, TracingSink};
pub use crate::environment::{Environment, ObstacleProvider, ObstacleSet};
pub use crate::errors::{Severity, SimError};
pub use crate::geom2::{Polar, Pose};
pub use crate::sensors::{Mount, MountedSensor, RangeSensor, Reading, ScanResult, SensorId};
pub use crate::shapes::Shape;
pub use crate::vehicle::{Chassis, PathEntry, Vehicle};
pub use crate::viz::{SceneRecorder, VisualizationSink};
