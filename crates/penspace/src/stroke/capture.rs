//! Draw-gesture state machine

use tracing::{debug, info};

use crate::anchor::WordAnchorManager;
use crate::context::ModeContext;
use crate::haptics::Haptics;
use crate::input::{StylusButton, StylusState};
use crate::scene::PhysicsWorld;
use crate::spatial::Pose;

use super::{DrawingId, WordDrawing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Drawing,
}

/// Turns a held draw button into strokes on one pending drawing
///
/// At most one drawing is pending at a time. Ending a stroke keeps the
/// drawing pending; only [`finalize`](Self::finalize) or
/// [`discard_pending`](Self::discard_pending) let go of it.
#[derive(Debug)]
pub struct StrokeCaptureEngine {
    state: CaptureState,
    pending: Option<WordDrawing>,
    root: Pose,
    draw_button: StylusButton,
    next_id: u64,
}

impl StrokeCaptureEngine {
    pub fn new(root: Pose, draw_button: StylusButton) -> Self {
        Self {
            state: CaptureState::Idle,
            pending: None,
            root,
            draw_button,
            next_id: 1,
        }
    }

    pub fn update(&mut self, stylus: &StylusState, mode: &ModeContext) {
        if !mode.drawing_enabled {
            self.force_end();
            return;
        }

        let button = stylus.button(self.draw_button);
        match self.state {
            CaptureState::Idle if button.pressed => {
                self.begin_stroke();
                self.append(stylus);
            }
            CaptureState::Idle => {}
            CaptureState::Drawing if button.released || !button.down => self.end_stroke(),
            CaptureState::Drawing => self.append(stylus),
        }
    }

    fn begin_stroke(&mut self) {
        let drawing = match self.pending.take() {
            Some(drawing) => drawing,
            None => {
                let id = DrawingId(self.next_id);
                self.next_id += 1;
                debug!("New pending {}", id);
                WordDrawing::new(id, self.root)
            }
        };
        let drawing = self.pending.insert(drawing);
        drawing.begin_stroke();
        self.state = CaptureState::Drawing;
        debug!("Stroke {} started on {}", drawing.strokes().len(), drawing.id());
    }

    fn append(&mut self, stylus: &StylusState) {
        if let Some(drawing) = self.pending.as_mut() {
            let local = drawing.root().inverse_transform_point(stylus.tip_position());
            if let Some(stroke) = drawing.open_stroke_mut() {
                stroke.push(local);
            }
        }
    }

    fn end_stroke(&mut self) {
        if let Some(drawing) = self.pending.as_mut() {
            drawing.end_stroke();
            debug!(
                "Stroke ended on {} ({} points total)",
                drawing.id(),
                drawing.point_count()
            );
        }
        self.state = CaptureState::Idle;
    }

    /// End the open stroke now, keeping the pending drawing
    pub fn force_end(&mut self) {
        if self.state == CaptureState::Drawing {
            self.end_stroke();
        }
    }

    /// Anchor the pending drawing
    ///
    /// An open stroke is ended first. A drawing without points is dropped
    /// silently and `None` is returned.
    pub fn finalize(
        &mut self,
        anchors: &mut WordAnchorManager,
        physics: &mut dyn PhysicsWorld,
        haptics: &mut Haptics,
    ) -> Option<DrawingId> {
        self.force_end();
        let drawing = self.pending.take()?;

        let Some(bounds) = drawing.world_bounds() else {
            debug!("Discarding empty {}", drawing.id());
            return None;
        };

        let id = anchors.anchor(drawing, bounds, physics);
        haptics.click();
        Some(id)
    }

    /// Drop the pending drawing without anchoring it
    pub fn discard_pending(&mut self) {
        self.state = CaptureState::Idle;
        if let Some(drawing) = self.pending.take() {
            info!("Discarded pending {}", drawing.id());
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == CaptureState::Drawing
    }

    pub fn pending(&self) -> Option<&WordDrawing> {
        self.pending.as_ref()
    }
}
