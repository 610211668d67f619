//! Ink strokes grouped into word drawings

use crate::scene::{ColliderId, Layer};
use crate::spatial::{Aabb, Pose, Vec3};

/// Identifier of a word drawing, unique for the rig's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawingId(pub u64);

impl std::fmt::Display for DrawingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "drawing#{}", self.0)
    }
}

/// Append-only polyline in its drawing's root frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    points: Vec<Vec3>,
    sealed: bool,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignored once the stroke is sealed
    pub fn push(&mut self, local: Vec3) {
        if !self.sealed {
            self.points.push(local);
        }
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_open(&self) -> bool {
        !self.sealed
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Selection marker attached to a finalized drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Anchor position in the drawing's root frame
    pub local_offset: Vec3,
    pub collider: ColliderId,
    pub radius: f32,
    pub layer: Layer,
}

/// A word's worth of strokes sharing one root frame
#[derive(Debug, Clone, PartialEq)]
pub struct WordDrawing {
    id: DrawingId,
    root: Pose,
    strokes: Vec<Stroke>,
    anchor: Option<Anchor>,
    recognized_text: Option<String>,
}

impl WordDrawing {
    pub fn new(id: DrawingId, root: Pose) -> Self {
        Self {
            id,
            root,
            strokes: Vec::new(),
            anchor: None,
            recognized_text: None,
        }
    }

    pub fn id(&self) -> DrawingId {
        self.id
    }

    pub fn root(&self) -> Pose {
        self.root
    }

    pub(crate) fn set_root_position(&mut self, position: Vec3) {
        self.root.position = position;
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }

    pub(crate) fn begin_stroke(&mut self) -> &mut Stroke {
        self.strokes.push(Stroke::new());
        let last = self.strokes.len() - 1;
        &mut self.strokes[last]
    }

    pub(crate) fn open_stroke_mut(&mut self) -> Option<&mut Stroke> {
        self.strokes.last_mut().filter(|s| s.is_open())
    }

    /// Seal the open stroke, if any
    pub(crate) fn end_stroke(&mut self) {
        if let Some(stroke) = self.open_stroke_mut() {
            stroke.seal();
        }
    }

    pub fn has_open_stroke(&self) -> bool {
        self.strokes.last().is_some_and(Stroke::is_open)
    }

    /// Every point of every stroke in world space, in draw order
    pub fn world_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        let root = self.root;
        self.strokes
            .iter()
            .flat_map(|s| s.points().iter())
            .map(move |&p| root.transform_point(p))
    }

    /// World-space bounds of all ink, `None` with no points
    pub fn world_bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.world_points())
    }

    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    pub(crate) fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = Some(anchor);
    }

    pub fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }

    /// World position of the anchor
    pub fn anchor_position(&self) -> Option<Vec3> {
        self.anchor
            .map(|anchor| self.root.transform_point(anchor.local_offset))
    }

    /// Text attached by an external recognizer; never set by the core
    pub fn recognized_text(&self) -> Option<&str> {
        self.recognized_text.as_deref()
    }

    pub fn set_recognized_text(&mut self, text: impl Into<String>) {
        self.recognized_text = Some(text.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sealed_stroke_is_immutable() {
        let mut stroke = Stroke::new();
        stroke.push(Vec3::ZERO);
        stroke.seal();
        stroke.push(Vec3::ONE);
        assert_eq!(stroke.len(), 1);
        assert!(!stroke.is_open());
    }

    #[test]
    fn test_world_bounds_follow_root() {
        let mut drawing = WordDrawing::new(DrawingId(1), Pose::from_position(Vec3::new(1.0, 0.0, 0.0)));
        assert!(drawing.world_bounds().is_none());

        let stroke = drawing.begin_stroke();
        stroke.push(Vec3::new(0.0, 0.0, 0.0));
        stroke.push(Vec3::new(0.2, 0.1, 0.0));
        drawing.end_stroke();
        assert!(!drawing.has_open_stroke());

        let bounds = drawing.world_bounds().unwrap();
        assert!(bounds.center().approx_eq(Vec3::new(1.1, 0.05, 0.0), 1e-6));

        drawing.set_root_position(Vec3::ZERO);
        let bounds = drawing.world_bounds().unwrap();
        assert!(bounds.center().approx_eq(Vec3::new(0.1, 0.05, 0.0), 1e-6));
    }
}
