//! The obstacle side of the simulation: anything that can produce an ordered list of points, the
//! immutable snapshot of those points shared by all sensors, and a named collection of shapes
//! that makes up a simulated room or bench.

use crate::shapes::Shape;
use crate::viz::VisualizationSink;
use crate::Point2;
use std::sync::Arc;
use uuid::Uuid;

/// Something that can produce the ordered points of the obstacles it represents, in world
/// coordinates.
pub trait ObstacleProvider {
    fn get_points(&self) -> Vec<Point2>;
}

impl ObstacleProvider for [Point2] {
    fn get_points(&self) -> Vec<Point2> {
        self.to_vec()
    }
}

impl ObstacleProvider for Vec<Point2> {
    fn get_points(&self) -> Vec<Point2> {
        self.clone()
    }
}

/// A read-only snapshot of obstacle points. Cloning is cheap and all clones share the same
/// storage. Every snapshot gets its own id, so a sensor can tell whether the set it cached its
/// surroundings from is still the one it holds after a reload.
#[derive(Clone, Debug)]
pub struct ObstacleSet {
    id: Uuid,
    points: Arc<[Point2]>,
}

impl ObstacleSet {
    pub fn from_points(points: Vec<Point2>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: points.into(),
        }
    }

    pub fn from_provider<P: ObstacleProvider + ?Sized>(provider: &P) -> Self {
        Self::from_points(provider.get_points())
    }

    pub fn empty() -> Self {
        Self::from_points(Vec::new())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ObstacleProvider for ObstacleSet {
    fn get_points(&self) -> Vec<Point2> {
        self.points.to_vec()
    }
}

/// A named collection of shapes placed in a common world frame.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    name: String,
    objects: Vec<Shape>,
}

impl Environment {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            objects: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn objects(&self) -> &[Shape] {
        &self.objects
    }

    pub fn add_object(&mut self, shape: Shape) {
        self.objects.push(shape);
    }

    pub fn add_objects<I: IntoIterator<Item = Shape>>(&mut self, shapes: I) {
        self.objects.extend(shapes);
    }

    /// The total number of points of all objects
    pub fn size(&self) -> usize {
        self.objects.iter().map(|s| s.size()).sum()
    }

    /// Takes a snapshot of the current objects to hand over to sensors. Changing the environment
    /// afterward does not affect the snapshot; a new one has to be taken and loaded.
    pub fn snapshot(&self) -> ObstacleSet {
        ObstacleSet::from_provider(self)
    }

    pub fn plot(&self, sink: &mut dyn VisualizationSink) {
        for (i, object) in self.objects.iter().enumerate() {
            sink.draw_points(&format!("{}/{}", self.name, i), &object.get_points());
        }
    }
}

impl ObstacleProvider for Environment {
    fn get_points(&self) -> Vec<Point2> {
        self.objects.iter().flat_map(|s| s.get_points()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshots_get_distinct_ids() {
        let points = vec![Point2::new(1.0, 1.0), Point2::new(2.0, 2.0)];
        let a = ObstacleSet::from_provider(&points);
        let b = ObstacleSet::from_provider(&points);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.points(), b.points());

        let c = a.clone();
        assert_eq!(a.id(), c.id());
    }

    #[test]
    fn test_environment_collects_all_objects() {
        let mut env = Environment::new("bench");
        env.add_object(Shape::rectangle(2.0, 1.0, 0.5));
        env.add_object(Shape::circle(1.0, 0.5).translated(10.0, 0.0));

        let snapshot = env.snapshot();
        assert_eq!(snapshot.len(), env.size());
        assert!(snapshot.points().iter().any(|p| p.x > 8.0));
    }
}
