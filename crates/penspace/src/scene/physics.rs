//! Scene-query contract consumed by the pointer, anchors and grab

use crate::spatial::Vec3;

/// Handle to a collider owned by the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(pub u64);

/// Classification layer index (0 - 31)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layer(pub u8);

impl Layer {
    pub const DEFAULT: Self = Layer(0);

    /// Single-bit mask selecting only this layer
    pub fn mask(self) -> LayerMask {
        LayerMask(1u32 << (self.0 & 31))
    }
}

/// Bitmask of layers a query is run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: Self = LayerMask(u32::MAX);
    pub const NONE: Self = LayerMask(0);

    pub fn contains(self, layer: Layer) -> bool {
        self.0 & layer.mask().0 != 0
    }
}

/// Closest hit of a ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub collider: ColliderId,
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

/// Physics engine as seen by the stylus subsystem
///
/// Queries are read-only and must be answered synchronously within the tick.
/// Results of [`overlap_sphere`](PhysicsWorld::overlap_sphere) come back in
/// the engine's own order; callers must not rely on it being stable.
pub trait PhysicsWorld {
    /// Nearest collider on `mask` hit by the ray within `max_distance`.
    /// `direction` is unit length.
    fn ray_cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;

    /// Every collider on `mask` whose volume intersects the sphere
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<ColliderId>;

    /// Register a sphere collider, returning its handle
    fn add_sphere(&mut self, center: Vec3, radius: f32, layer: Layer) -> ColliderId;

    /// Move a collider so its origin sits at `position`
    fn move_collider(&mut self, id: ColliderId, position: Vec3);

    /// Returns false when the collider was already gone
    fn remove_collider(&mut self, id: ColliderId) -> bool;
}
