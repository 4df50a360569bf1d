use crate::common::AngleUnit;
use crate::{Iso2, Point2, Vector2};
use serde::{Deserialize, Serialize};

/// A rigid placement `(x, y, theta)` of an entity in some reference frame. The orientation is
/// always stored in radians, whatever unit it was supplied in.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

impl Pose {
    /// Create a pose with the orientation given in the specified unit
    ///
    /// # Examples
    ///
    /// ```
    /// use flatsense::{AngleUnit, Pose};
    /// use approx::assert_relative_eq;
    /// let pose = Pose::new(1.0, 2.0, 90.0, AngleUnit::Degrees);
    /// assert_relative_eq!(pose.theta, std::f64::consts::FRAC_PI_2);
    /// ```
    pub fn new(x: f64, y: f64, angle: f64, unit: AngleUnit) -> Self {
        Self {
            x,
            y,
            theta: unit.to_radians(angle),
        }
    }

    pub fn from_radians(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    pub fn from_point(position: Point2, theta: f64) -> Self {
        Self::from_radians(position.x, position.y, theta)
    }

    pub fn origin() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    pub fn heading_degrees(&self) -> f64 {
        self.theta.to_degrees()
    }

    /// The frame this pose describes, for converting points between the pose's local frame and
    /// its parent frame.
    pub fn to_iso(&self) -> Iso2 {
        Iso2::new(Vector2::new(self.x, self.y), self.theta)
    }

    /// Build a pose from an isometry. The orientation comes back normalized to (-pi, pi].
    pub fn from_iso(iso: &Iso2) -> Self {
        Self::from_radians(
            iso.translation.vector.x,
            iso.translation.vector.y,
            iso.rotation.angle(),
        )
    }

    /// Compares two poses within a tolerance. Orientations are compared through their sine and
    /// cosine, so `theta` and `theta + 2pi` are the same pose.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        let (s0, c0) = self.theta.sin_cos();
        let (s1, c1) = other.theta.sin_cos();
        (self.x - other.x).abs() <= tol
            && (self.y - other.y).abs() <= tol
            && (s0 - s1).abs() <= tol
            && (c0 - c1).abs() <= tol
    }
}
