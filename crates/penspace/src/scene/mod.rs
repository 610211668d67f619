//! Physics and scene-query boundary

mod physics;
mod world;

pub use physics::{ColliderId, Layer, LayerMask, PhysicsWorld, RayHit};
pub use world::SimpleWorld;
