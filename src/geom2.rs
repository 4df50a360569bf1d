//! Two dimensional geometry used by the simulation: poses, polar coordinates and conversions
//! between coordinate frames.
//!
//! A frame is represented by an `Iso2`: the position of the frame's origin and the rotation of its
//! axes, both expressed in the parent frame. Applying the isometry to a point takes it from the
//! local frame to the parent frame (rotate, then translate).

mod frames;
mod polar;
mod pose;

pub use self::frames::{
    frame, global_to_local, local_to_global, rotate_point, to_global_all, to_local_all,
};
pub use self::polar::{to_polar, to_polar_all, to_rect, to_rect_all, Polar};
pub use self::pose::Pose;
