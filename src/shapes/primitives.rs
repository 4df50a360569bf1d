//! Point generators for the primitive shapes, each in its own canonical frame.

use crate::common::arange;
use crate::geom2::{to_polar, to_rect, Polar};
use crate::Point2;
use std::f64::consts::PI;

/// The outline of a rectangle with its lower left corner at the origin. The four vertices come
/// first, followed by the horizontal sides and then the vertical sides, sampled every `res`.
pub fn rectangle_points(base: f64, height: f64, res: f64) -> Vec<Point2> {
    let mut points = vec![
        Point2::new(0.0, 0.0),
        Point2::new(0.0, height),
        Point2::new(base, height),
        Point2::new(base, 0.0),
    ];

    for x in arange(0.0, base, res) {
        points.push(Point2::new(x, 0.0));
        points.push(Point2::new(x, height));
    }

    for y in arange(0.0, height, res) {
        points.push(Point2::new(0.0, y));
        points.push(Point2::new(base, y));
    }

    points
}

/// A circle centered at the origin. The center itself is the first point, followed by the
/// circumference sampled so that neighboring points are `res` apart along the arc.
pub fn circle_points(radius: f64, res: f64) -> Vec<Point2> {
    let mut points = vec![Point2::origin()];
    let angle_res = res / radius;
    points.extend(
        arange(0.0, 2.0 * PI, angle_res)
            .into_iter()
            .map(|a| to_rect(&Polar::new(radius, a))),
    );
    points
}

/// The two equal sides of an isosceles triangle whose base runs from the origin to `(base, 0)`,
/// without the base itself. The vertices are included. Only the left side is sampled; the right
/// one is its mirror image across the height.
pub fn arrow_points(base: f64, height: f64, res: f64) -> Vec<Point2> {
    let semi_base = base / 2.0;
    let mut points = vec![
        Point2::new(0.0, 0.0),
        Point2::new(base, 0.0),
        Point2::new(semi_base, height),
        Point2::new(semi_base, 0.0),
    ];

    // Sample along the side in polar form so the spacing is exact
    let side = to_polar(&Point2::new(semi_base, height));
    points.extend(
        arange(0.0, side.rho, res)
            .into_iter()
            .map(|r| to_rect(&Polar::new(r, side.phi))),
    );

    let mirrored = points
        .iter()
        .map(|p| Point2::new(base - p.x, p.y))
        .collect::<Vec<_>>();
    points.extend(mirrored);
    points
}

/// An arrow with its base drawn
pub fn triangle_points(base: f64, height: f64, res: f64) -> Vec<Point2> {
    let mut points = arrow_points(base, height, res);
    points.extend(arange(0.0, base, res).into_iter().map(|x| Point2::new(x, 0.0)));
    points
}
