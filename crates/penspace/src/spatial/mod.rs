//! Spatial primitives
//!
//! Right-handed coordinate system:
//! - X: Right (+) / Left (-)
//! - Y: Up (+) / Down (-)
//! - Z: Forward (+) / Backward (-)
//!
//! Distances are in meters.

mod bounds;
mod pose;
mod quat;
mod vector;

pub use bounds::{ray_sphere, Aabb, Rect};
pub use pose::Pose;
pub use quat::Quat;
pub use vector::{Vec2, Vec3};
