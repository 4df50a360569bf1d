//! Conversions of points between a local frame and its parent frame. A frame's orientation is
//! the counter-clockwise rotation of its axes relative to the parent's axes, so rotating a point
//! by `alpha` has the same effect on its coordinates as rotating the frame by `-alpha`.

use crate::common::points::{inverse_transform_points, transform_points};
use crate::common::AngleUnit;
use crate::{Iso2, Point2, Vector2};
use parry2d_f64::na::UnitComplex;

/// Build a frame with its origin at `(x, y)` in the parent frame and its axes rotated by `angle`,
/// given in `unit`.
pub fn frame(x: f64, y: f64, angle: f64, unit: AngleUnit) -> Iso2 {
    Iso2::new(Vector2::new(x, y), unit.to_radians(angle))
}

/// Re-express a point given in the parent frame in the local coordinates of `frame`: the frame
/// origin is subtracted and the result is rotated by the negative of the frame angle.
///
/// # Examples
///
/// ```
/// use flatsense::geom2::{frame, global_to_local};
/// use flatsense::{AngleUnit, Point2};
/// use approx::assert_relative_eq;
/// let f = frame(10.0, 0.0, 90.0, AngleUnit::Degrees);
/// let local = global_to_local(&Point2::new(10.0, 5.0), &f);
/// assert_relative_eq!(local, Point2::new(5.0, 0.0), epsilon = 1.0e-12);
/// ```
pub fn global_to_local(p: &Point2, frame: &Iso2) -> Point2 {
    frame.inverse_transform_point(p)
}

/// Re-express a point given in the local coordinates of `frame` in the parent frame: the point is
/// rotated by the frame angle and then the frame origin is added.
pub fn local_to_global(p: &Point2, frame: &Iso2) -> Point2 {
    frame * p
}

pub fn to_local_all(points: &[Point2], frame: &Iso2) -> Vec<Point2> {
    inverse_transform_points(points, frame)
}

pub fn to_global_all(points: &[Point2], frame: &Iso2) -> Vec<Point2> {
    transform_points(points, frame)
}

/// Rotate a point counter-clockwise about the origin by `angle` radians
pub fn rotate_point(p: &Point2, angle: f64) -> Point2 {
    UnitComplex::new(angle) * p
}
