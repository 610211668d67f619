//! Bounding volumes used by finalize and the selection queries

use super::{Vec2, Vec3};

/// Axis-aligned box grown one point at a time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Degenerate box around a single point
    pub fn from_point(point: Vec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Smallest box containing every point, or `None` when there are none
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::from_point(first);
        for point in iter {
            bounds.encapsulate(point);
        }
        Some(bounds)
    }

    pub fn encapsulate(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Ray/sphere intersection, returning the distance along `dir` to the first
/// surface hit. `dir` must be unit length. A ray starting inside the sphere
/// reports distance 0.
pub fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - origin;
    let c = to_center.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let b = to_center.dot(dir);
    if b <= 0.0 {
        return None;
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    Some(b - disc.sqrt())
}

/// Axis-aligned 2D rectangle in a panel's local plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle of `size` placed so that `pivot` (0..1 on each axis, measured
    /// from the bottom-left corner) sits at `position`
    pub fn from_pivot(position: Vec2, size: Vec2, pivot: Vec2) -> Self {
        let min = Vec2::new(position.x - pivot.x * size.x, position.y - pivot.y * size.y);
        Self {
            min,
            max: Vec2::new(min.x + size.x, min.y + size.y),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}
