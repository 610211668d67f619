//! Per-tick orchestration of the stylus components

use std::time::Duration;

use tracing::{debug, info};

use crate::anchor::WordAnchorManager;
use crate::config::StylusConfig;
use crate::context::{FrameClock, ModeContext};
use crate::grab::{GrabController, GrabSession};
use crate::haptics::{HapticSink, Haptics};
use crate::input::{DeviceLayer, StylusInputDriver, StylusState};
use crate::pointer::{HitResult, PointerRaycaster, PointerTargets, Widget, WidgetRef};
use crate::scene::{PhysicsWorld, RayHit};
use crate::spatial::Vec3;
use crate::stroke::{DrawingId, StrokeCaptureEngine, WordDrawing};

/// The whole stylus subsystem, advanced once per frame with [`tick`](Self::tick)
///
/// Order within a tick: input driver, pointer (then click), stroke capture
/// (then finalize), grab.
pub struct StylusRig<P: PhysicsWorld> {
    config: StylusConfig,
    physics: P,
    targets: PointerTargets,
    driver: StylusInputDriver,
    pointer: PointerRaycaster,
    capture: StrokeCaptureEngine,
    anchors: WordAnchorManager,
    grab: GrabController,
    haptics: Haptics,
    mode: ModeContext,
    clock: FrameClock,
    finalized: Option<DrawingId>,
}

impl<P: PhysicsWorld> StylusRig<P> {
    pub fn new(config: StylusConfig, physics: P) -> Self {
        let bindings = &config.bindings;
        Self {
            driver: StylusInputDriver::new(&config.input),
            pointer: PointerRaycaster::new(&config.pointer),
            capture: StrokeCaptureEngine::new(config.drawing.root_pose(), bindings.draw),
            anchors: WordAnchorManager::new(&config.anchor),
            grab: GrabController::new(&config.grab, &config.anchor, bindings.grab),
            haptics: Haptics::new(config.haptics.click()),
            mode: ModeContext::new(config.drawing.enabled_on_start),
            clock: FrameClock::new(),
            targets: PointerTargets::new(),
            finalized: None,
            physics,
            config,
        }
    }

    pub fn with_haptics(mut self, sink: impl HapticSink + 'static) -> Self {
        self.haptics.set_sink(Some(Box::new(sink)));
        self
    }

    pub fn with_targets(mut self, targets: PointerTargets) -> Self {
        self.targets = targets;
        self
    }

    /// Advance one frame
    pub fn tick(&mut self, device: &mut dyn DeviceLayer, dt: Duration) -> &StylusState {
        self.clock.advance(dt);
        self.finalized = None;

        let state = *self
            .driver
            .update(device, self.clock.time, &mut self.haptics);

        self.pointer
            .update(&state, &self.mode, &self.physics, &mut self.targets);
        let click = self.config.bindings.click;
        if state.button(click.button).edge(click.edge) {
            self.pointer
                .trigger_click(&mut self.targets, &mut self.haptics);
        }

        self.capture.update(&state, &self.mode);
        let finalize = self.config.bindings.finalize;
        if self.mode.drawing_enabled && state.button(finalize.button).edge(finalize.edge) {
            self.finalize_current_drawing();
        }

        self.grab.update(
            &state,
            &self.mode,
            &mut self.anchors,
            &mut self.physics,
            &mut self.haptics,
        );

        self.driver.state()
    }

    pub fn state(&self) -> &StylusState {
        self.driver.state()
    }

    pub fn current_hit(&self) -> HitResult {
        self.pointer.current_hit()
    }

    pub fn ray_hit(&self) -> Option<&RayHit> {
        self.pointer.ray_hit()
    }

    pub fn hovered_widget(&self) -> Option<WidgetRef> {
        self.pointer.hovered_widget()
    }

    /// The hovered widget itself
    pub fn hovered(&self) -> Option<&dyn Widget> {
        self.targets.widget(self.pointer.hovered_widget()?)
    }

    /// Widget activated during the last tick or [`trigger_click`](Self::trigger_click)
    pub fn activated_widget(&self) -> Option<WidgetRef> {
        self.pointer.activated_widget()
    }

    /// Activate the hovered widget; see [`PointerRaycaster::trigger_click`]
    pub fn trigger_click(&mut self) -> bool {
        self.pointer
            .trigger_click(&mut self.targets, &mut self.haptics)
    }

    /// Pointer ray start and end
    pub fn ray(&self) -> (Vec3, Vec3) {
        self.pointer.ray()
    }

    /// Turn ink capture on or off. Turning it off ends an open stroke
    /// immediately; turning it on drops any active grab.
    pub fn set_drawing_enabled(&mut self, enabled: bool) {
        if self.mode.drawing_enabled == enabled {
            return;
        }
        self.mode.drawing_enabled = enabled;
        if enabled {
            self.grab.cancel();
        } else {
            self.capture.force_end();
        }
        info!("Drawing {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn drawing_enabled(&self) -> bool {
        self.mode.drawing_enabled
    }

    /// Anchor the pending drawing, if it has any ink
    pub fn finalize_current_drawing(&mut self) -> Option<DrawingId> {
        let id = self
            .capture
            .finalize(&mut self.anchors, &mut self.physics, &mut self.haptics);
        if id.is_some() {
            self.finalized = id;
        }
        id
    }

    /// Drawing anchored during the last tick
    pub fn finalized_this_tick(&self) -> Option<DrawingId> {
        self.finalized
    }

    /// Enable or suspend the pointer. Suspending clears hover immediately.
    pub fn set_pointer_active(&mut self, active: bool) {
        self.set_ui_exclusive(!active);
    }

    /// Hand the pointer to another input consumer, or take it back
    pub fn set_ui_exclusive(&mut self, exclusive: bool) {
        if self.mode.ui_exclusive == exclusive {
            return;
        }
        self.mode.ui_exclusive = exclusive;
        if exclusive {
            self.pointer.suspend(&mut self.targets);
        }
        debug!("UI exclusive mode {}", exclusive);
    }

    pub fn pointer_active(&self) -> bool {
        !self.mode.ui_exclusive
    }

    /// Drop the grab, the pending drawing and every anchored drawing
    pub fn reset(&mut self) {
        self.grab.cancel();
        self.capture.discard_pending();
        let cleared = self.anchors.clear(&mut self.physics);
        info!("Reset ({} anchored drawings removed)", cleared);
    }

    pub fn pending_drawing(&self) -> Option<&WordDrawing> {
        self.capture.pending()
    }

    pub fn is_drawing(&self) -> bool {
        self.capture.is_drawing()
    }

    pub fn anchors(&self) -> &WordAnchorManager {
        &self.anchors
    }

    /// Attach externally recognized text to an anchored drawing
    pub fn set_recognized_text(&mut self, id: DrawingId, text: impl Into<String>) -> bool {
        match self.anchors.get_mut(id) {
            Some(drawing) => {
                drawing.set_recognized_text(text);
                true
            }
            None => false,
        }
    }

    pub fn grab_session(&self) -> Option<&GrabSession> {
        self.grab.session()
    }

    pub fn targets(&self) -> &PointerTargets {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> &mut PointerTargets {
        &mut self.targets
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    pub fn mode(&self) -> ModeContext {
        self.mode
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn config(&self) -> &StylusConfig {
        &self.config
    }
}

impl<P: PhysicsWorld + std::fmt::Debug> std::fmt::Debug for StylusRig<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StylusRig")
            .field("mode", &self.mode)
            .field("clock", &self.clock)
            .field("physics", &self.physics)
            .field("anchored", &self.anchors.len())
            .field("grabbing", &self.grab.is_grabbing())
            .finish()
    }
}
