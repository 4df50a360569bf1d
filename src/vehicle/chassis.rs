use crate::common::points::dist;
use crate::shapes::rectangle_points;
use crate::{Aabb2, Point2, Vector2};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Distance between the front edge of the outline and the second line that marks the front
const FRONT_MARK_GAP: f64 = 2.0;

/// Spacing of the outline points
const OUTLINE_RES: f64 = 0.1;

/// The rectangular body of a vehicle, described in the vehicle's own frame: x points forward, y
/// to the left and the origin sits on the drive axle. The body center is `axle_offset` along x
/// from the axle, so a negative offset puts the axle ahead of the body center.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chassis {
    length: f64,
    width: f64,
    axle_offset: f64,
}

impl Chassis {
    /// A chassis whose body center sits a quarter of the length behind the axle
    pub fn new(length: f64, width: f64) -> Self {
        Self::with_axle_offset(length, width, -length / 4.0)
    }

    pub fn with_axle_offset(length: f64, width: f64, axle_offset: f64) -> Self {
        Self {
            length: length.abs(),
            width: width.abs(),
            axle_offset,
        }
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn axle_offset(&self) -> f64 {
        self.axle_offset
    }

    /// The footprint bounds in the vehicle frame. Sensors can only be mounted inside them.
    pub fn footprint(&self) -> Aabb2 {
        Aabb2::new(
            Point2::new(self.axle_offset - self.length / 2.0, -self.width / 2.0),
            Point2::new(self.axle_offset + self.length / 2.0, self.width / 2.0),
        )
    }

    /// True if `p`, in the vehicle frame, is on or inside the footprint
    pub fn contains(&self, p: &Point2) -> bool {
        self.footprint().contains_local_point(p)
    }

    /// The radius of the circle centered on the axle that encloses the whole body
    pub fn circumscribed_radius(&self) -> f64 {
        let fp = self.footprint();
        [fp.mins.x, fp.maxs.x]
            .into_iter()
            .cartesian_product([fp.mins.y, fp.maxs.y])
            .map(|(x, y)| dist(&Point2::origin(), &Point2::new(x, y)))
            .fold(0.0, f64::max)
    }

    /// Points of the body outline in the vehicle frame, including a second line just behind the
    /// front edge so the heading can be told at a glance.
    pub fn outline(&self) -> Vec<Point2> {
        let fp = self.footprint();
        let shift = Vector2::new(fp.mins.x, fp.mins.y);
        let mut points = rectangle_points(self.length, self.width, OUTLINE_RES)
            .into_iter()
            .map(|p| p + shift)
            .collect::<Vec<_>>();

        let x_mark = fp.maxs.x - FRONT_MARK_GAP.min(self.length / 2.0);
        points.extend(
            crate::common::arange(fp.mins.y, fp.maxs.y, OUTLINE_RES)
                .into_iter()
                .map(|y| Point2::new(x_mark, y)),
        );
        points
    }
}
