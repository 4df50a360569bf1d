use crate::common::AngleUnit;
use crate::geom2::{frame, rotate_point, Pose};
use crate::sensors::{RangeFinder, RangeSensor, Reading, ScanResult};
use crate::{Iso2, Point2};

/// The fixed placement of a sensor in its carrier's own frame
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mount {
    offset: Point2,

    /// Orientation relative to the carrier's heading, in radians
    orientation: f64,
}

impl Mount {
    /// Create a mount at `offset` in the carrier frame, turned `orientation` degrees from the
    /// carrier's heading.
    pub fn new(offset: Point2, orientation: f64) -> Self {
        Self {
            offset,
            orientation: orientation.to_radians(),
        }
    }

    pub fn offset(&self) -> Point2 {
        self.offset
    }

    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    /// The global pose of a sensor on this mount when the carrier is at `carrier`. The offset
    /// turns rigidly with the carrier about the carrier's origin before being shifted by the
    /// carrier's position.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatsense::{AngleUnit, Mount, Point2, Pose};
    /// use approx::assert_relative_eq;
    /// let mount = Mount::new(Point2::new(10.0, 0.0), 0.0);
    /// let placed = mount.placement(&Pose::new(5.0, 5.0, 90.0, AngleUnit::Degrees));
    /// assert_relative_eq!(placed.x, 5.0, epsilon = 1.0e-12);
    /// assert_relative_eq!(placed.y, 15.0, epsilon = 1.0e-12);
    /// ```
    pub fn placement(&self, carrier: &Pose) -> Pose {
        let shifted = rotate_point(&self.offset, carrier.theta);
        Pose::from_radians(
            carrier.x + shifted.x,
            carrier.y + shifted.y,
            self.orientation + carrier.theta,
        )
    }

    /// The mount as a frame in the carrier's coordinate system, for bringing points measured by
    /// the sensor back into the carrier frame.
    pub fn sys_ref(&self) -> Iso2 {
        frame(
            self.offset.x,
            self.offset.y,
            self.orientation,
            AngleUnit::Radians,
        )
    }
}

/// A range sensor bound to a carrier through a mount
#[derive(Debug, Clone)]
pub struct MountedSensor {
    mount: Mount,
    sensor: RangeSensor,
}

impl MountedSensor {
    pub fn new(mount: Mount, sensor: RangeSensor) -> Self {
        Self { mount, sensor }
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn sensor(&self) -> &RangeSensor {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut RangeSensor {
        &mut self.sensor
    }

    /// Move the sensor to follow its carrier. This has to run after every change of the carrier
    /// pose, since placing the sensor is the only thing that rebuilds its local view.
    pub fn update_placement(&mut self, carrier: &Pose) {
        self.sensor.place(self.mount.placement(carrier));
    }
}

impl RangeFinder for MountedSensor {
    fn read(&mut self, at_angle: f64) -> Reading {
        self.sensor.read(at_angle)
    }

    fn scan(&mut self, angle_from: f64, angle_to: f64, step: f64) -> ScanResult {
        self.sensor.scan(angle_from, angle_to, step)
    }
}
