//! In-memory physics world
//!
//! Spheres and oriented boxes with brute-force queries. Enough for tests and
//! the terminal sandbox; a real engine implements [`PhysicsWorld`] instead.

use std::collections::BTreeMap;

use crate::spatial::{ray_sphere, Pose, Vec3};

use super::{ColliderId, Layer, LayerMask, PhysicsWorld, RayHit};

/// Collider geometry
#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    Sphere { center: Vec3, radius: f32 },
    /// Oriented box; `half_extents` are in the pose's local frame
    Box { pose: Pose, half_extents: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Collider {
    shape: Shape,
    layer: Layer,
}

/// Brute-force physics world
#[derive(Debug, Default)]
pub struct SimpleWorld {
    colliders: BTreeMap<ColliderId, Collider>,
    next_id: u64,
}

impl SimpleWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an oriented box collider
    pub fn add_box(&mut self, pose: Pose, half_extents: Vec3, layer: Layer) -> ColliderId {
        self.insert(Shape::Box { pose, half_extents }, layer)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    fn insert(&mut self, shape: Shape, layer: Layer) -> ColliderId {
        self.next_id += 1;
        let id = ColliderId(self.next_id);
        self.colliders.insert(id, Collider { shape, layer });
        id
    }
}

impl PhysicsWorld for SimpleWorld {
    fn ray_cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;

        for (&id, collider) in &self.colliders {
            if !mask.contains(collider.layer) {
                continue;
            }
            let hit = match collider.shape {
                Shape::Sphere { center, radius } => {
                    ray_sphere(origin, direction, center, radius).map(|distance| {
                        let point = origin + direction * distance;
                        let normal = if distance == 0.0 {
                            -direction
                        } else {
                            (point - center).normalize_or_zero()
                        };
                        (distance, point, normal)
                    })
                }
                Shape::Box { pose, half_extents } => {
                    ray_box(origin, direction, &pose, half_extents)
                }
            };

            if let Some((distance, point, normal)) = hit {
                if distance > max_distance {
                    continue;
                }
                if best.map_or(true, |b| distance < b.distance) {
                    best = Some(RayHit {
                        collider: id,
                        point,
                        normal,
                        distance,
                    });
                }
            }
        }

        best
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<ColliderId> {
        self.colliders
            .iter()
            .filter(|(_, c)| mask.contains(c.layer))
            .filter(|(_, c)| match c.shape {
                Shape::Sphere {
                    center: other,
                    radius: other_radius,
                } => {
                    let reach = radius + other_radius;
                    center.distance_squared(other) <= reach * reach
                }
                Shape::Box { pose, half_extents } => {
                    let local = pose.inverse_transform_point(center);
                    let closest = local.max(-half_extents).min(half_extents);
                    closest.distance_squared(local) <= radius * radius
                }
            })
            .map(|(&id, _)| id)
            .collect()
    }

    fn add_sphere(&mut self, center: Vec3, radius: f32, layer: Layer) -> ColliderId {
        self.insert(Shape::Sphere { center, radius }, layer)
    }

    fn move_collider(&mut self, id: ColliderId, position: Vec3) {
        if let Some(collider) = self.colliders.get_mut(&id) {
            match &mut collider.shape {
                Shape::Sphere { center, .. } => *center = position,
                Shape::Box { pose, .. } => pose.position = position,
            }
        }
    }

    fn remove_collider(&mut self, id: ColliderId) -> bool {
        self.colliders.remove(&id).is_some()
    }
}

/// Slab test against an oriented box. Returns distance, point and outward
/// normal of the entry face; a ray starting inside hits at distance 0.
fn ray_box(origin: Vec3, direction: Vec3, pose: &Pose, half: Vec3) -> Option<(f32, Vec3, Vec3)> {
    let local_origin = pose.inverse_transform_point(origin);
    let local_dir = pose.rotation.inverse().rotate(direction);

    let o = [local_origin.x, local_origin.y, local_origin.z];
    let d = [local_dir.x, local_dir.y, local_dir.z];
    let h = [half.x, half.y, half.z];

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut enter_axis = 0;

    for axis in 0..3 {
        if d[axis].abs() < 1e-8 {
            if o[axis] < -h[axis] || o[axis] > h[axis] {
                return None;
            }
            continue;
        }
        let t1 = (-h[axis] - o[axis]) / d[axis];
        let t2 = (h[axis] - o[axis]) / d[axis];
        let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        if near > t_enter {
            t_enter = near;
            enter_axis = axis;
        }
        t_exit = t_exit.min(far);
    }

    if t_exit < t_enter.max(0.0) {
        return None;
    }

    if t_enter < 0.0 {
        return Some((0.0, origin, -direction));
    }

    let mut normal = [0.0f32; 3];
    normal[enter_axis] = -d[enter_axis].signum();
    let normal = pose.rotation.rotate(Vec3::new(normal[0], normal[1], normal[2]));
    Some((t_enter, origin + direction * t_enter, normal))
}
