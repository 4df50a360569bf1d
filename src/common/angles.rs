//! This module contains common constructs for working with angles

use serde::{Deserialize, Serialize};

/// Tolerance used when an angle is compared against the edge of an angular window
pub const ANGLE_TOL: f64 = 1.0e-12;

/// Enumerates the two possible directions of rotation, clockwise and counter-clockwise. A
/// counter-clockwise rotation is a turn to the left for something facing along +x.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AngleDir {
    Cw,
    Ccw,
}

impl AngleDir {
    pub fn to_sign(self) -> f64 {
        match self {
            AngleDir::Cw => -1.0,
            AngleDir::Ccw => 1.0,
        }
    }

    pub fn from_sign(sign: f64) -> Self {
        if sign < 0.0 {
            AngleDir::Cw
        } else {
            AngleDir::Ccw
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            AngleDir::Cw => AngleDir::Ccw,
            AngleDir::Ccw => AngleDir::Cw,
        }
    }
}

/// The unit an angle was given in. Angles are always stored in radians internally, so this only
/// matters at the point where a caller hands a value over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Converts an angle expressed in this unit to radians
    ///
    /// # Examples
    ///
    /// ```
    /// use flatsense::AngleUnit;
    /// use approx::assert_relative_eq;
    /// use std::f64::consts::PI;
    /// assert_relative_eq!(AngleUnit::Degrees.to_radians(180.0), PI);
    /// assert_relative_eq!(AngleUnit::Radians.to_radians(PI), PI);
    /// ```
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Degrees => angle.to_radians(),
            AngleUnit::Radians => angle,
        }
    }

    /// Converts an angle in radians to this unit
    pub fn from_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Degrees => angle.to_degrees(),
            AngleUnit::Radians => angle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test_case(AngleDir::Cw, -1.0)]
    #[test_case(AngleDir::Ccw, 1.0)]
    fn test_dir_sign_round_trip(dir: AngleDir, sign: f64) {
        assert_eq!(dir.to_sign(), sign);
        assert_eq!(AngleDir::from_sign(sign), dir);
        assert_eq!(dir.opposite().to_sign(), -sign);
    }

    #[test_case(90.0)]
    #[test_case(-45.0)]
    #[test_case(720.0)]
    fn test_unit_round_trip(degrees: f64) {
        let rad = AngleUnit::Degrees.to_radians(degrees);
        assert_relative_eq!(AngleUnit::Degrees.from_radians(rad), degrees, epsilon = 1.0e-10);
        assert_relative_eq!(AngleUnit::Radians.to_radians(rad), rad);
    }
}
