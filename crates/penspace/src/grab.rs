//! Proximity grab of anchored drawings

use tracing::{debug, info};

use crate::anchor::WordAnchorManager;
use crate::config::{AnchorConfig, GrabConfig};
use crate::context::ModeContext;
use crate::haptics::Haptics;
use crate::input::{StylusButton, StylusState};
use crate::scene::{LayerMask, PhysicsWorld};
use crate::spatial::Vec3;
use crate::stroke::DrawingId;

/// An active grab
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabSession {
    pub drawing: DrawingId,
    /// Anchor minus root, captured at grab start
    pub offset: Vec3,
}

/// Drags anchored drawings so their anchor sits on the tip
///
/// Only translation is applied; the drawing keeps its rotation.
#[derive(Debug)]
pub struct GrabController {
    search_radius: f32,
    mask: LayerMask,
    button: StylusButton,
    session: Option<GrabSession>,
}

impl GrabController {
    pub fn new(grab: &GrabConfig, anchor: &AnchorConfig, button: StylusButton) -> Self {
        Self {
            search_radius: grab.search_radius,
            mask: anchor.search_mask(),
            button,
            session: None,
        }
    }

    pub fn update(
        &mut self,
        stylus: &StylusState,
        mode: &ModeContext,
        anchors: &mut WordAnchorManager,
        physics: &mut dyn PhysicsWorld,
        haptics: &mut Haptics,
    ) {
        let button = stylus.button(self.button);

        if let Some(session) = self.session {
            if button.released || !button.down || !mode.grab_permitted() {
                info!("Released {}", session.drawing);
                self.session = None;
                return;
            }
            self.follow(session, stylus.tip_position(), anchors, physics);
            return;
        }

        if button.pressed && mode.grab_permitted() {
            let tip = stylus.tip_position();
            if let Some(session) = self.search(tip, anchors, physics) {
                info!("Grabbed {}", session.drawing);
                self.session = Some(session);
                haptics.click();
                self.follow(session, tip, anchors, physics);
            }
        }
    }

    /// Nearest anchored drawing whose selection volume touches the search
    /// sphere. Equidistant candidates go to whichever the physics world
    /// reported first.
    fn search(
        &self,
        tip: Vec3,
        anchors: &WordAnchorManager,
        physics: &dyn PhysicsWorld,
    ) -> Option<GrabSession> {
        let mut best: Option<(f32, GrabSession)> = None;

        for collider in physics.overlap_sphere(tip, self.search_radius, self.mask) {
            let Some(drawing) = anchors.by_collider(collider) else {
                continue;
            };
            let Some(anchor) = drawing.anchor_position() else {
                continue;
            };
            let distance = anchor.distance(tip);
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((
                    distance,
                    GrabSession {
                        drawing: drawing.id(),
                        offset: anchor - drawing.root().position,
                    },
                ));
            }
        }

        if best.is_none() {
            debug!("Nothing to grab near {:?}", tip);
        }
        best.map(|(_, session)| session)
    }

    fn follow(
        &mut self,
        session: GrabSession,
        tip: Vec3,
        anchors: &mut WordAnchorManager,
        physics: &mut dyn PhysicsWorld,
    ) {
        if !anchors.move_root(session.drawing, tip - session.offset, physics) {
            debug!("{} vanished mid-grab", session.drawing);
            self.session = None;
        }
    }

    /// Drop the session without moving anything
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Grab of {} cancelled", session.drawing);
        }
    }

    pub fn session(&self) -> Option<&GrabSession> {
        self.session.as_ref()
    }

    pub fn is_grabbing(&self) -> bool {
        self.session.is_some()
    }
}
