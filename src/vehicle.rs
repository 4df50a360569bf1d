//! A vehicle carrying range sensors through the environment. The vehicle owns its sensors through
//! their mounts and keeps them in step with its own pose: every turn or move is a complete
//! update of the vehicle pose and of every sensor placement before it returns.

mod chassis;

use crate::common::AngleDir;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::environment::ObstacleSet;
use crate::errors::SimError;
use crate::geom2::{to_global_all, to_rect_all, Polar, Pose};
use crate::sensors::{Mount, MountedSensor, RangeSensor, Reading, ScanResult, SensorId};
use crate::viz::VisualizationSink;
use crate::{Iso2, Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::{debug, info};

pub use chassis::Chassis;

/// One step of the vehicle's path, logged after every turn and every move. The heading is in
/// degrees and `seq` counts motions from 1.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEntry {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub seq: usize,
}

pub struct Vehicle {
    name: String,
    chassis: Chassis,
    pose: Pose,
    path: Vec<PathEntry>,
    sensors: BTreeMap<SensorId, MountedSensor>,
    obstacles: Option<ObstacleSet>,
    tracer: Option<Box<dyn VisualizationSink>>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Debug for Vehicle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vehicle")
            .field("name", &self.name)
            .field("chassis", &self.chassis)
            .field("pose", &self.pose)
            .field("sensors", &self.sensors.keys().collect::<Vec<_>>())
            .field("path", &self.path.len())
            .field("tracing", &self.tracer.is_some())
            .finish()
    }
}

impl Vehicle {
    /// Create a vehicle at the origin heading along +x, with no sensors. Issues are reported
    /// through `tracing` unless a different sink is given with `with_sink`.
    pub fn new(name: &str, chassis: Chassis) -> Self {
        Self {
            name: name.to_string(),
            chassis,
            pose: Pose::origin(),
            path: Vec::new(),
            sensors: BTreeMap::new(),
            obstacles: None,
            tracer: None,
            sink: TracingSink::shared(),
        }
    }

    /// Set the diagnostic sink used by the vehicle and by every sensor mounted from now on
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Set the starting pose without logging a path step
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self.update_placements();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chassis(&self) -> &Chassis {
        &self.chassis
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn position(&self) -> Point2 {
        self.pose.position()
    }

    /// Heading in radians
    pub fn orientation(&self) -> f64 {
        self.pose.theta
    }

    /// The vehicle's frame in the world, for bringing vehicle-frame points into the world
    pub fn sys_ref(&self) -> Iso2 {
        self.pose.to_iso()
    }

    pub fn path(&self) -> &[PathEntry] {
        &self.path
    }

    pub fn sensor(&self, name: &str) -> Option<&RangeSensor> {
        self.sensors.get(name).map(|m| m.sensor())
    }

    pub fn mounted(&self, name: &str) -> Option<&MountedSensor> {
        self.sensors.get(name)
    }

    pub fn sensor_ids(&self) -> impl Iterator<Item = &SensorId> {
        self.sensors.keys()
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    /// The radius around the axle the vehicle needs to keep clear: the circumscribed chassis
    /// radius plus the accuracy of its least accurate sensor.
    pub fn safety_radius(&self) -> f64 {
        let accuracy = self
            .sensors
            .values()
            .map(|m| m.sensor().accuracy())
            .fold(0.0, f64::max);
        self.chassis.circumscribed_radius() + accuracy
    }

    /// Mount a new range sensor on the chassis and place it at once.
    ///
    /// # Arguments
    ///
    /// * `name`: the sensor name. Mounting with a name already in use replaces that sensor.
    /// * `beam`: the full beam width, in degrees
    /// * `range`: the maximum measurable distance
    /// * `accuracy`: the measurement accuracy
    /// * `mount_point`: where the sensor sits, in the vehicle frame
    /// * `mount_orientation`: the sensor facing direction relative to the vehicle heading, in
    ///   degrees
    ///
    /// returns: Result<(), SimError>
    ///
    /// A mount point outside the chassis footprint fails with `MountOutOfBounds` and leaves the
    /// vehicle unchanged.
    pub fn mount_sensor(
        &mut self,
        name: &str,
        beam: f64,
        range: f64,
        accuracy: f64,
        mount_point: Point2,
        mount_orientation: f64,
    ) -> Result<(), SimError> {
        if !self.chassis.contains(&mount_point) {
            let err = SimError::MountOutOfBounds {
                sensor: name.to_string(),
                x: mount_point.x,
                y: mount_point.y,
            };
            self.sink.report(&err);
            return Err(err);
        }

        let mut sensor = RangeSensor::new(name, beam, range, accuracy).with_sink(self.sink.clone());
        if let Some(obstacles) = &self.obstacles {
            sensor.load_environment(obstacles);
        }

        let mut mounted = MountedSensor::new(Mount::new(mount_point, mount_orientation), sensor);
        mounted.update_placement(&self.pose);

        if self.sensors.insert(SensorId::new(name), mounted).is_some() {
            info!(vehicle = %self.name, sensor = name, "replaced sensor");
        } else {
            info!(vehicle = %self.name, sensor = name, "mounted sensor");
        }
        Ok(())
    }

    /// Hand the obstacles to every mounted sensor, and to any sensor mounted later
    pub fn load_environment(&mut self, obstacles: &ObstacleSet) {
        for mounted in self.sensors.values_mut() {
            mounted.sensor_mut().load_environment(obstacles);
        }
        self.obstacles = Some(obstacles.clone());
        debug!(vehicle = %self.name, points = obstacles.len(), "loaded environment");
    }

    /// Turn in place by `angle` degrees; positive turns left (counter-clockwise), negative turns
    /// right.
    pub fn turn(&mut self, angle: f64) {
        self.pose.theta += angle.to_radians();
        debug!(vehicle = %self.name, angle, "turn");
        self.after_motion();
    }

    /// Turn in place by `angle` degrees in the given direction, whatever the sign of `angle`
    pub fn turn_towards(&mut self, direction: AngleDir, angle: f64) {
        self.turn(direction.to_sign() * angle.abs());
    }

    /// Move straight along the current heading by `|distance|`, forward if `distance` is positive
    /// and backward if it is negative.
    pub fn move_by(&mut self, distance: f64) {
        let (sin, cos) = self.pose.theta.sin_cos();
        let step = Vector2::new(cos, sin) * distance;
        self.pose.x += step.x;
        self.pose.y += step.y;
        debug!(vehicle = %self.name, distance, "move");
        self.after_motion();
    }

    fn update_placements(&mut self) {
        for mounted in self.sensors.values_mut() {
            mounted.update_placement(&self.pose);
        }
    }

    fn after_motion(&mut self) {
        self.update_placements();

        self.path.push(PathEntry {
            x: self.pose.x,
            y: self.pose.y,
            angle: self.pose.heading_degrees(),
            seq: self.path.len() + 1,
        });

        if let Some(mut tracer) = self.tracer.take() {
            self.light_plot(tracer.as_mut());
            self.tracer = Some(tracer);
        }
    }

    /// Take a single reading from the named sensor
    pub fn ping(&mut self, name: &str, angle: f64) -> Result<Reading, SimError> {
        let Some(mounted) = self.sensors.get_mut(name) else {
            let err = SimError::SensorNotFound(name.to_string());
            self.sink.report(&err);
            return Err(err);
        };

        let reading = mounted.sensor_mut().read(angle);
        debug!(sensor = name, angle, range = reading.range, "ping");
        Ok(reading)
    }

    /// Scan with the named sensor. An unknown name is reported and gives an empty map.
    pub fn scan(
        &mut self,
        name: &str,
        angle_from: f64,
        angle_to: f64,
        step: f64,
    ) -> BTreeMap<SensorId, ScanResult> {
        let mut result = BTreeMap::new();
        match self.sensors.get_mut(name) {
            Some(mounted) => {
                let readings = mounted.sensor_mut().scan(angle_from, angle_to, step);
                result.insert(SensorId::new(name), readings);
            }
            None => self.sink.report(&SimError::SensorNotFound(name.to_string())),
        }
        result
    }

    /// Scan with every mounted sensor over the same sweep
    pub fn scan_all(
        &mut self,
        angle_from: f64,
        angle_to: f64,
        step: f64,
    ) -> BTreeMap<SensorId, ScanResult> {
        self.sensors
            .iter_mut()
            .map(|(id, mounted)| {
                let readings = mounted.sensor_mut().scan(angle_from, angle_to, step);
                (id.clone(), readings)
            })
            .collect()
    }

    /// Bring scan readings into the world frame. Each reading is converted to a point in its
    /// sensor's frame, then into the vehicle frame through the sensor mount, and finally into the
    /// world through the vehicle's current pose. Sentinel readings are kept and land on the
    /// sensor's own position.
    ///
    /// Readings from sensors the vehicle does not carry are reported and left out.
    pub fn scan_to_map(
        &self,
        scans: &BTreeMap<SensorId, ScanResult>,
    ) -> BTreeMap<SensorId, Vec<Point2>> {
        let vehicle_ref = self.sys_ref();
        let mut map = BTreeMap::new();

        for (id, readings) in scans {
            let Some(mounted) = self.sensors.get(id) else {
                self.sink.report(&SimError::SensorNotFound(id.to_string()));
                continue;
            };

            let polar = readings
                .iter()
                .map(|r| Polar::new(r.range, r.angle.to_radians()))
                .collect::<Vec<_>>();
            let in_sensor = to_rect_all(&polar);
            let in_vehicle = to_global_all(&in_sensor, &mounted.mount().sys_ref());
            map.insert(id.clone(), to_global_all(&in_vehicle, &vehicle_ref));
        }

        map
    }

    /// Send a light plot of the vehicle to `sink` after every turn and move
    pub fn trace(&mut self, sink: Box<dyn VisualizationSink>) {
        self.tracer = Some(sink);
    }

    /// Stop tracing and hand back the sink, if there was one
    pub fn untrace(&mut self) -> Option<Box<dyn VisualizationSink>> {
        self.tracer.take()
    }

    pub fn is_tracing(&self) -> bool {
        self.tracer.is_some()
    }

    /// Draw the vehicle pose and the pose of every sensor
    pub fn light_plot(&self, sink: &mut dyn VisualizationSink) {
        sink.draw_pose(&self.name, &self.pose);
        for mounted in self.sensors.values() {
            mounted.sensor().plot(sink);
        }
    }

    /// Draw the chassis outline in its current placement along with the light plot
    pub fn plot(&self, sink: &mut dyn VisualizationSink) {
        let outline = to_global_all(&self.chassis.outline(), &self.sys_ref());
        sink.draw_points(&format!("{}/chassis", self.name), &outline);
        self.light_plot(sink);
    }

    /// Draw the logged path as a polyline
    pub fn plot_path(&self, sink: &mut dyn VisualizationSink) {
        let points = self
            .path
            .iter()
            .map(|e| Point2::new(e.x, e.y))
            .collect::<Vec<_>>();
        sink.draw_points(&format!("{}/path", self.name), &points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use crate::errors::Severity;
    use crate::geom2::rotate_point;
    use crate::viz::SceneRecorder;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;
    use std::sync::Mutex;

    fn test_vehicle() -> Vehicle {
        let mut vehicle = Vehicle::new("rover", Chassis::new(20.0, 15.0));
        vehicle
            .mount_sensor("front", 30.0, 50.0, 1.0, Point2::new(5.0, 0.0), 0.0)
            .unwrap();
        vehicle
            .mount_sensor("left", 30.0, 50.0, 2.0, Point2::new(-5.0, 7.5), 90.0)
            .unwrap();
        vehicle
    }

    #[test]
    fn test_pose_propagation_uses_final_pose() {
        let mut vehicle = test_vehicle();
        vehicle.move_by(50.0);
        vehicle.turn(90.0);

        assert_relative_eq!(vehicle.position(), Point2::new(50.0, 0.0), epsilon = 1.0e-12);
        for id in vehicle.sensor_ids() {
            let mounted = vehicle.mounted(id.as_str()).unwrap();
            let expected =
                vehicle.position() + rotate_point(&mounted.mount().offset(), FRAC_PI_2).coords;
            let sensor = mounted.sensor();
            assert_relative_eq!(sensor.position(), expected, epsilon = 1.0e-12);
            assert_relative_eq!(
                sensor.orientation(),
                FRAC_PI_2 + mounted.mount().orientation(),
                epsilon = 1.0e-12
            );
        }
    }

    #[test]
    fn test_mount_outside_footprint_rejected() {
        let sink = Arc::new(RecordingSink::new());
        let mut vehicle = Vehicle::new("rover", Chassis::new(20.0, 15.0)).with_sink(sink.clone());

        let result = vehicle.mount_sensor("rear", 30.0, 50.0, 1.0, Point2::new(-16.0, 0.0), 180.0);
        assert!(matches!(result, Err(SimError::MountOutOfBounds { .. })));
        assert_eq!(vehicle.sensor_count(), 0);
        assert_eq!(sink.count(Severity::Error), 1);
    }

    #[test]
    fn test_remount_replaces_sensor() {
        let mut vehicle = test_vehicle();
        vehicle
            .mount_sensor("front", 60.0, 80.0, 3.0, Point2::new(0.0, 0.0), 0.0)
            .unwrap();
        assert_eq!(vehicle.sensor_count(), 2);
        assert_eq!(vehicle.sensor("front").unwrap().range(), 80.0);
    }

    #[test]
    fn test_move_backward_and_turn_towards() {
        let mut vehicle = Vehicle::new("rover", Chassis::new(20.0, 15.0));
        vehicle.turn_towards(AngleDir::Cw, 90.0);
        vehicle.move_by(-10.0);

        assert_relative_eq!(vehicle.orientation(), -FRAC_PI_2, epsilon = 1.0e-12);
        assert_relative_eq!(vehicle.position(), Point2::new(0.0, 10.0), epsilon = 1.0e-12);
    }

    #[test]
    fn test_path_log() {
        let mut vehicle = Vehicle::new("rover", Chassis::new(20.0, 15.0));
        vehicle.move_by(10.0);
        vehicle.turn(90.0);
        vehicle.move_by(5.0);

        let path = vehicle.path();
        assert_eq!(path.len(), 3);
        assert_eq!(path.iter().map(|e| e.seq).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_relative_eq!(path[1].angle, 90.0, epsilon = 1.0e-12);
        assert_relative_eq!(path[2].x, 10.0, epsilon = 1.0e-12);
        assert_relative_eq!(path[2].y, 5.0, epsilon = 1.0e-12);
    }

    #[test]
    fn test_unknown_sensor() {
        let sink = Arc::new(RecordingSink::new());
        let mut vehicle = Vehicle::new("rover", Chassis::new(20.0, 15.0)).with_sink(sink.clone());

        assert!(vehicle.scan("nope", -90.0, 90.0, 1.0).is_empty());
        assert_eq!(
            vehicle.ping("nope", 0.0),
            Err(SimError::SensorNotFound("nope".to_string()))
        );
        assert_eq!(sink.count(Severity::Error), 2);
    }

    #[test]
    fn test_single_obstacle_scan() {
        let mut vehicle = Vehicle::new("rover", Chassis::new(20.0, 15.0));
        vehicle
            .mount_sensor("S1", 90.0, 50.0, 1.0, Point2::origin(), 0.0)
            .unwrap();
        vehicle.load_environment(&ObstacleSet::from_points(vec![Point2::new(30.0, 0.0)]));

        let scans = vehicle.scan("S1", -45.0, 45.0, 5.0);
        let readings = &scans[&SensorId::new("S1")];
        assert_eq!(readings.len(), 18);
        assert_eq!(readings[9], Reading::new(30.0, 0.0));

        // Sweeping past the half beam leaves the point out of sight
        let scans = vehicle.scan("S1", -90.0, 90.0, 5.0);
        for r in &scans[&SensorId::new("S1")] {
            if r.angle.abs() <= 45.0 {
                assert_relative_eq!(r.range, 30.0);
            } else {
                assert!(r.is_sentinel());
            }
        }
    }

    #[test]
    fn test_scan_to_map_applies_sensor_then_vehicle_frame() {
        let mut vehicle = Vehicle::new("rover", Chassis::new(20.0, 15.0))
            .with_pose(Pose::new(100.0, 50.0, 90.0, crate::AngleUnit::Degrees));
        vehicle
            .mount_sensor("side", 30.0, 50.0, 1.0, Point2::new(-5.0, 7.5), 90.0)
            .unwrap();

        // An obstacle 10 units straight out of the side sensor
        let obstacle = vehicle.sensor("side").unwrap().position() + Vector2::new(-10.0, 0.0);
        vehicle.load_environment(&ObstacleSet::from_points(vec![obstacle]));

        let scans = vehicle.scan("side", 0.0, 1.0, 1.0);
        assert_relative_eq!(scans[&SensorId::new("side")][0].range, 10.0, epsilon = 1.0e-9);

        let map = vehicle.scan_to_map(&scans);
        assert_relative_eq!(map[&SensorId::new("side")][0], obstacle, epsilon = 1.0e-9);
    }

    #[test]
    fn test_scan_to_map_skips_unknown_sensor() {
        let sink = Arc::new(RecordingSink::new());
        let vehicle = Vehicle::new("rover", Chassis::new(20.0, 15.0)).with_sink(sink.clone());
        let mut scans = BTreeMap::new();
        scans.insert(SensorId::new("ghost"), vec![Reading::new(1.0, 0.0)]);

        assert!(vehicle.scan_to_map(&scans).is_empty());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_sensor_mounted_after_environment_sees_it() {
        let mut vehicle = Vehicle::new("rover", Chassis::new(20.0, 15.0));
        vehicle.load_environment(&ObstacleSet::from_points(vec![Point2::new(30.0, 0.0)]));
        vehicle
            .mount_sensor("S1", 30.0, 50.0, 1.0, Point2::origin(), 0.0)
            .unwrap();
        assert_relative_eq!(vehicle.ping("S1", 0.0).unwrap().range, 30.0);
    }

    #[test]
    fn test_safety_radius() {
        let vehicle = test_vehicle();
        let expected = vehicle.chassis().circumscribed_radius() + 2.0;
        assert_relative_eq!(vehicle.safety_radius(), expected);
    }

    #[test]
    fn test_tracing_records_each_motion() {
        let recorder = Arc::new(Mutex::new(SceneRecorder::new()));
        let mut vehicle = test_vehicle();
        vehicle.trace(Box::new(recorder.clone()));
        vehicle.move_by(10.0);
        vehicle.turn(45.0);
        assert!(vehicle.untrace().is_some());
        vehicle.move_by(10.0);

        let scene = recorder.lock().unwrap().scene().clone();
        // The vehicle and its two sensors, twice
        assert_eq!(scene.poses.len(), 6);
        assert_eq!(scene.poses[0].label, "rover");
    }

    #[test]
    fn test_plot() {
        let mut vehicle = test_vehicle();
        vehicle.move_by(3.0);
        let mut recorder = SceneRecorder::new();
        vehicle.plot(&mut recorder);
        vehicle.plot_path(&mut recorder);

        let scene = recorder.scene();
        assert!(scene.layer("rover/chassis").is_some());
        assert_eq!(scene.layer("rover/path").unwrap().points, vec![[3.0, 0.0]]);
        assert_eq!(scene.poses.len(), 3);
    }
}
