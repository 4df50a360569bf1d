use crate::Point2;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A point in polar coordinates, `rho` being the distance from the origin and `phi` the angle in
/// radians measured counter-clockwise from the +x axis, in the range (-pi, pi].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polar {
    pub rho: f64,
    pub phi: f64,
}

impl Polar {
    pub fn new(rho: f64, phi: f64) -> Self {
        Self { rho, phi }
    }

    /// Total ordering by `rho` first and `phi` second. This is the order used to pick the
    /// nearest point among several candidates, so that ties in distance resolve towards the
    /// smallest angle.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.rho
            .total_cmp(&other.rho)
            .then_with(|| self.phi.total_cmp(&other.phi))
    }
}

/// Converts a rectangular point to polar coordinates, with `phi = atan2(y, x)`
pub fn to_polar(p: &Point2) -> Polar {
    Polar {
        rho: p.coords.norm(),
        phi: p.y.atan2(p.x),
    }
}

/// Converts polar coordinates back to a rectangular point
pub fn to_rect(polar: &Polar) -> Point2 {
    let (s, c) = polar.phi.sin_cos();
    Point2::new(polar.rho * c, polar.rho * s)
}

pub fn to_polar_all(points: &[Point2]) -> Vec<Polar> {
    points.iter().map(to_polar).collect()
}

pub fn to_rect_all(points: &[Polar]) -> Vec<Point2> {
    points.iter().map(to_rect).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};
    use test_case::test_case;

    #[test_case(1.0, 0.0, 1.0, 0.0)]
    #[test_case(0.0, 2.0, 2.0, FRAC_PI_2)]
    #[test_case(-3.0, 0.0, 3.0, PI)]
    #[test_case(0.0, -1.5, 1.5, -FRAC_PI_2)]
    fn test_to_polar(x: f64, y: f64, rho: f64, phi: f64) {
        let polar = to_polar(&Point2::new(x, y));
        assert_relative_eq!(polar.rho, rho, epsilon = 1.0e-12);
        assert_relative_eq!(polar.phi, phi, epsilon = 1.0e-12);
    }

    #[test]
    fn test_polar_rect_round_trip() {
        let points = vec![
            Point2::new(3.0, 4.0),
            Point2::new(-2.0, 0.5),
            Point2::new(-1.0, -7.0),
        ];
        let back = to_rect_all(&to_polar_all(&points));
        for (a, b) in points.iter().zip(back.iter()) {
            assert_relative_eq!(a, b, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn test_order_breaks_ties_by_angle() {
        let a = Polar::new(10.0, 0.2);
        let b = Polar::new(10.0, -0.2);
        let c = Polar::new(9.0, 1.0);
        assert_eq!(a.total_cmp(&b), Ordering::Greater);
        assert_eq!(c.total_cmp(&b), Ordering::Less);

        let nearest = [a, b, c].into_iter().min_by(|x, y| x.total_cmp(y));
        assert_eq!(nearest, Some(c));
    }
}
