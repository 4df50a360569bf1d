//! Everything the simulation draws goes to a `VisualizationSink`. The crate does no rendering of
//! its own: `SceneRecorder` keeps what it is handed in a `Scene` that can be written out as JSON
//! and drawn by whatever tool is at hand.

use crate::geom2::Pose;
use crate::Point2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub trait VisualizationSink {
    /// Draw an ordered list of points on the named layer. Drawing to a layer that already exists
    /// adds to it.
    fn draw_points(&mut self, layer: &str, points: &[Point2]);

    /// Draw a labeled pose marker
    fn draw_pose(&mut self, label: &str, pose: &Pose);
}

/// A shared sink, so the caller can hand a sink to a vehicle and still read it afterward
impl<S: VisualizationSink> VisualizationSink for Arc<Mutex<S>> {
    fn draw_points(&mut self, layer: &str, points: &[Point2]) {
        self.lock()
            .unwrap_or_else(|e| e.into_inner())
            .draw_points(layer, points);
    }

    fn draw_pose(&mut self, label: &str, pose: &Pose) {
        self.lock()
            .unwrap_or_else(|e| e.into_inner())
            .draw_pose(label, pose);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseMarker {
    pub label: String,
    pub pose: Pose,
}

/// A recorded drawing: point layers in the order they were first drawn, and pose markers in the
/// order they were drawn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub layers: Vec<Layer>,
    pub poses: Vec<PoseMarker>,
}

impl Scene {
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> crate::Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct SceneRecorder {
    scene: Scene,
}

impl SceneRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn into_scene(self) -> Scene {
        self.scene
    }

    pub fn clear(&mut self) {
        self.scene = Scene::default();
    }
}

impl VisualizationSink for SceneRecorder {
    fn draw_points(&mut self, layer: &str, points: &[Point2]) {
        let coords = points.iter().map(|p| [p.x, p.y]);
        match self.scene.layers.iter_mut().find(|l| l.name == layer) {
            Some(existing) => existing.points.extend(coords),
            None => self.scene.layers.push(Layer {
                name: layer.to_string(),
                points: coords.collect(),
            }),
        }
    }

    fn draw_pose(&mut self, label: &str, pose: &Pose) {
        self.scene.poses.push(PoseMarker {
            label: label.to_string(),
            pose: *pose,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_accumulate() {
        let mut recorder = SceneRecorder::new();
        recorder.draw_points("walls", &[Point2::new(0.0, 0.0)]);
        recorder.draw_points("chair", &[Point2::new(5.0, 5.0)]);
        recorder.draw_points("walls", &[Point2::new(1.0, 0.0)]);
        recorder.draw_pose("car", &Pose::origin());

        let scene = recorder.scene();
        assert_eq!(scene.layers.len(), 2);
        assert_eq!(scene.layer("walls").unwrap().points, vec![[0.0, 0.0], [1.0, 0.0]]);
        assert_eq!(scene.poses[0].label, "car");
    }

    #[test]
    fn test_scene_json_round_trip() {
        let mut recorder = SceneRecorder::new();
        recorder.draw_points("walls", &[Point2::new(0.5, -2.0)]);
        recorder.draw_pose("S1", &Pose::from_radians(1.0, 2.0, 0.5));

        let json = recorder.scene().to_json().unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, recorder.scene());
    }
}
