//! The square area around a sensor that can possibly hold a detectable point. Finding the
//! nearest point in a beam is the dominant cost of a reading, so the full obstacle set is first
//! cut down to the points inside `[x - range, x + range] x [y - range, y + range]`.
//!
//! The box depends only on the sensor position and the obstacle set it was cut from. It has to be
//! recomputed after every translation and every reload, and is kept as is across pure rotations.

use crate::environment::ObstacleSet;
use crate::viz::VisualizationSink;
use crate::{Aabb2, Point2};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Surroundings {
    center: Point2,
    bounds: Aabb2,
    source: Option<Uuid>,
    points: Vec<Point2>,
}

impl Surroundings {
    /// An empty area at `center`, not cut from any obstacle set
    pub fn empty(center: Point2, range: f64) -> Self {
        Self {
            center,
            bounds: bounds_around(&center, range),
            source: None,
            points: Vec::new(),
        }
    }

    /// Keep the obstacle points inside the box around `center`, bounds inclusive, in the order
    /// the obstacle set gives them.
    pub fn compute(center: Point2, range: f64, obstacles: &ObstacleSet) -> Self {
        let bounds = bounds_around(&center, range);
        let points = obstacles
            .points()
            .iter()
            .filter(|p| bounds.contains_local_point(p))
            .copied()
            .collect();

        Self {
            center,
            bounds,
            source: Some(obstacles.id()),
            points,
        }
    }

    /// True if this area was cut at `center` from the obstacle set with the given id (or from no
    /// set at all, if `source` is `None`).
    pub fn is_valid_for(&self, center: &Point2, source: Option<Uuid>) -> bool {
        self.center == *center && self.source == source
    }

    pub fn center(&self) -> Point2 {
        self.center
    }

    pub fn bounds(&self) -> &Aabb2 {
        &self.bounds
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn xwest(&self) -> f64 {
        self.bounds.mins.x
    }

    pub fn xeast(&self) -> f64 {
        self.bounds.maxs.x
    }

    pub fn ysouth(&self) -> f64 {
        self.bounds.mins.y
    }

    pub fn ynorth(&self) -> f64 {
        self.bounds.maxs.y
    }

    /// Draw the edges of the area and the points retained in it
    pub fn plot(&self, label: &str, sink: &mut dyn VisualizationSink) {
        let outline = vec![
            Point2::new(self.xwest(), self.ysouth()),
            Point2::new(self.xeast(), self.ysouth()),
            Point2::new(self.xeast(), self.ynorth()),
            Point2::new(self.xwest(), self.ynorth()),
            Point2::new(self.xwest(), self.ysouth()),
        ];
        sink.draw_points(&format!("{}/surroundings_box", label), &outline);
        sink.draw_points(&format!("{}/surroundings", label), &self.points);
    }
}

fn bounds_around(center: &Point2, range: f64) -> Aabb2 {
    Aabb2::new(
        Point2::new(center.x - range, center.y - range),
        Point2::new(center.x + range, center.y + range),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        let obstacles = ObstacleSet::from_points(vec![
            Point2::new(10.0, 0.0),
            Point2::new(-10.0, 10.0),
            Point2::new(10.000001, 0.0),
            Point2::new(0.0, -10.5),
            Point2::new(3.0, 3.0),
        ]);
        let area = Surroundings::compute(Point2::origin(), 10.0, &obstacles);

        assert_eq!(
            area.points(),
            &[
                Point2::new(10.0, 0.0),
                Point2::new(-10.0, 10.0),
                Point2::new(3.0, 3.0)
            ]
        );
        assert_eq!(area.xwest(), -10.0);
        assert_eq!(area.xeast(), 10.0);
        assert_eq!(area.ysouth(), -10.0);
        assert_eq!(area.ynorth(), 10.0);
    }

    #[test]
    fn test_validity_tracks_position_and_source() {
        let obstacles = ObstacleSet::from_points(vec![Point2::new(1.0, 1.0)]);
        let area = Surroundings::compute(Point2::new(2.0, 2.0), 5.0, &obstacles);

        assert!(area.is_valid_for(&Point2::new(2.0, 2.0), Some(obstacles.id())));
        assert!(!area.is_valid_for(&Point2::new(2.0, 2.5), Some(obstacles.id())));

        let reloaded = ObstacleSet::from_points(obstacles.points().to_vec());
        assert!(!area.is_valid_for(&Point2::new(2.0, 2.0), Some(reloaded.id())));
    }
}
