//! Anchored drawings
//!
//! Finalized drawings get a sphere selection volume placed just above the
//! centre of their ink and join the session's anchored set. The set only
//! grows until a reset clears it.

use tracing::{debug, info};

use crate::config::AnchorConfig;
use crate::scene::{ColliderId, Layer, PhysicsWorld};
use crate::spatial::{Aabb, Vec3};
use crate::stroke::{Anchor, DrawingId, WordDrawing};

#[derive(Debug)]
pub struct WordAnchorManager {
    vertical_offset: f32,
    selection_radius: f32,
    layer: Layer,
    drawings: Vec<WordDrawing>,
}

impl WordAnchorManager {
    pub fn new(config: &AnchorConfig) -> Self {
        Self {
            vertical_offset: config.vertical_offset,
            selection_radius: config.selection_radius,
            layer: config.layer(),
            drawings: Vec::new(),
        }
    }

    /// Anchor `drawing` above the centre of `bounds` and add it to the set
    pub fn anchor(
        &mut self,
        mut drawing: WordDrawing,
        bounds: Aabb,
        physics: &mut dyn PhysicsWorld,
    ) -> DrawingId {
        let position = bounds.center() + Vec3::UP * self.vertical_offset;
        let collider = physics.add_sphere(position, self.selection_radius, self.layer);
        let local_offset = drawing.root().inverse_transform_point(position);
        drawing.set_anchor(Anchor {
            local_offset,
            collider,
            radius: self.selection_radius,
            layer: self.layer,
        });

        let id = drawing.id();
        info!(
            "Anchored {} ({} strokes, {} points) at ({:.3}, {:.3}, {:.3})",
            id,
            drawing.strokes().len(),
            drawing.point_count(),
            position.x,
            position.y,
            position.z
        );
        self.drawings.push(drawing);
        id
    }

    /// Remove every anchored drawing and its selection volume
    pub fn clear(&mut self, physics: &mut dyn PhysicsWorld) -> usize {
        let count = self.drawings.len();
        for drawing in self.drawings.drain(..) {
            if let Some(anchor) = drawing.anchor() {
                physics.remove_collider(anchor.collider);
            }
        }
        if count > 0 {
            info!("Cleared {} anchored drawings", count);
        }
        count
    }

    /// Move a drawing's root, keeping its rotation, and drag the selection
    /// volume along. Returns false when the drawing is not anchored here.
    pub fn move_root(
        &mut self,
        id: DrawingId,
        root_position: Vec3,
        physics: &mut dyn PhysicsWorld,
    ) -> bool {
        let Some(drawing) = self.get_mut(id) else {
            return false;
        };
        drawing.set_root_position(root_position);
        if let (Some(anchor), Some(position)) = (drawing.anchor().copied(), drawing.anchor_position()) {
            physics.move_collider(anchor.collider, position);
        }
        debug!("Moved {} root to {:?}", id, root_position);
        true
    }

    pub fn get(&self, id: DrawingId) -> Option<&WordDrawing> {
        self.drawings.iter().find(|d| d.id() == id)
    }

    pub fn get_mut(&mut self, id: DrawingId) -> Option<&mut WordDrawing> {
        self.drawings.iter_mut().find(|d| d.id() == id)
    }

    /// The drawing whose selection volume is `collider`
    pub fn by_collider(&self, collider: ColliderId) -> Option<&WordDrawing> {
        self.drawings
            .iter()
            .find(|d| d.anchor().is_some_and(|a| a.collider == collider))
    }

    /// Anchored drawings in anchoring order
    pub fn iter(&self) -> impl Iterator<Item = &WordDrawing> {
        self.drawings.iter()
    }

    pub fn len(&self) -> usize {
        self.drawings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{LayerMask, SimpleWorld};
    use crate::spatial::Pose;

    fn drawing(id: u64, points: &[Vec3]) -> WordDrawing {
        let mut drawing = WordDrawing::new(DrawingId(id), Pose::from_position(Vec3::new(0.0, 1.0, 0.0)));
        let stroke = drawing.begin_stroke();
        for &p in points {
            stroke.push(p);
        }
        drawing.end_stroke();
        drawing
    }

    #[test]
    fn test_anchor_above_center() {
        let mut world = SimpleWorld::new();
        let config = AnchorConfig {
            layer: Some(8),
            ..AnchorConfig::default()
        };
        let mut anchors = WordAnchorManager::new(&config);
        let d = drawing(1, &[Vec3::ZERO, Vec3::new(0.2, 0.1, 0.0)]);
        let bounds = d.world_bounds().unwrap();

        let id = anchors.anchor(d, bounds, &mut world);
        let anchored = anchors.get(id).unwrap();
        let expected = Vec3::new(0.1, 1.05 + 0.02, 0.0);
        assert!(anchored.anchor_position().unwrap().approx_eq(expected, 1e-6));
        assert_eq!(anchors.len(), 1);

        let anchor = anchored.anchor().unwrap();
        assert_eq!(anchor.layer, Layer(8));
        assert_eq!(world.overlap_sphere(expected, 0.001, Layer(8).mask()), vec![anchor.collider]);
        assert_eq!(anchors.by_collider(anchor.collider).map(|d| d.id()), Some(id));
    }

    #[test]
    fn test_move_root_drags_collider() {
        let mut world = SimpleWorld::new();
        let mut anchors = WordAnchorManager::new(&AnchorConfig::default());
        let d = drawing(1, &[Vec3::ZERO]);
        let bounds = d.world_bounds().unwrap();
        let id = anchors.anchor(d, bounds, &mut world);

        assert!(anchors.move_root(id, Vec3::new(5.0, 0.0, 0.0), &mut world));
        let anchor_pos = anchors.get(id).unwrap().anchor_position().unwrap();
        assert!(anchor_pos.approx_eq(Vec3::new(5.0, 0.02, 0.0), 1e-6));
        assert_eq!(world.overlap_sphere(anchor_pos, 0.001, LayerMask::ALL).len(), 1);
        assert!(!anchors.move_root(DrawingId(99), Vec3::ZERO, &mut world));
    }

    #[test]
    fn test_clear_removes_colliders() {
        let mut world = SimpleWorld::new();
        let mut anchors = WordAnchorManager::new(&AnchorConfig::default());
        for id in 1..=3 {
            let d = drawing(id, &[Vec3::new(id as f32, 0.0, 0.0)]);
            let bounds = d.world_bounds().unwrap();
            anchors.anchor(d, bounds, &mut world);
        }
        assert_eq!(world.len(), 3);

        assert_eq!(anchors.clear(&mut world), 3);
        assert!(anchors.is_empty());
        assert!(world.is_empty());
    }
}
