//! Pointer ray from the stylus tip

use tracing::{debug, trace};

use crate::config::PointerConfig;
use crate::context::ModeContext;
use crate::haptics::Haptics;
use crate::input::StylusState;
use crate::scene::{LayerMask, PhysicsWorld, RayHit};
use crate::spatial::Vec3;

use super::panel::Target;
use super::{HitResult, PointerTargets, WidgetRef};

/// Casts the tip ray once per tick and owns widget hover state
///
/// Hover exit is always dispatched before hover enter, and both happen inside
/// [`update`](Self::update), so a click later in the tick sees at most one
/// hovered widget.
#[derive(Debug)]
pub struct PointerRaycaster {
    max_distance: f32,
    mask: LayerMask,
    enabled: bool,
    target: HitResult,
    ray_hit: Option<RayHit>,
    hovered: Option<WidgetRef>,
    activated: Option<WidgetRef>,
    origin: Vec3,
    ray_end: Vec3,
}

impl PointerRaycaster {
    pub fn new(config: &PointerConfig) -> Self {
        Self {
            max_distance: config.max_distance,
            mask: config.mask(),
            enabled: false,
            target: HitResult::None,
            ray_hit: None,
            hovered: None,
            activated: None,
            origin: Vec3::ZERO,
            ray_end: Vec3::ZERO,
        }
    }

    pub fn update(
        &mut self,
        state: &StylusState,
        mode: &ModeContext,
        physics: &dyn PhysicsWorld,
        targets: &mut PointerTargets,
    ) {
        self.activated = None;

        if !mode.pointer_permitted() || !state.active {
            self.suspend(targets);
            self.origin = state.tip_position();
            self.ray_end = self.origin;
            return;
        }
        self.enabled = true;

        let origin = state.tip_position();
        let direction = state.tip_forward();
        self.origin = origin;

        let hit = physics.ray_cast(origin, direction, self.max_distance, self.mask);
        self.ray_hit = hit;
        self.target = match hit {
            None => {
                self.ray_end = origin + direction * self.max_distance;
                HitResult::None
            }
            Some(hit) => {
                self.ray_end = hit.point;
                Self::resolve(&hit, targets)
            }
        };
        trace!("Pointer target {:?}", self.target);

        self.set_hover(self.target.widget(), targets);
    }

    fn resolve(hit: &RayHit, targets: &PointerTargets) -> HitResult {
        match targets.resolve(hit.collider) {
            Some(Target::Panel(panel_id)) => targets
                .panel(panel_id)
                .and_then(|panel| panel.widget_at(panel.to_local(hit.point)))
                .map(|index| {
                    HitResult::Widget(WidgetRef {
                        panel: panel_id,
                        index,
                    })
                })
                .unwrap_or(HitResult::Object(hit.collider)),
            Some(Target::Marker(marker)) => HitResult::Marker(marker),
            None => HitResult::Object(hit.collider),
        }
    }

    fn set_hover(&mut self, next: Option<WidgetRef>, targets: &mut PointerTargets) {
        if next == self.hovered {
            return;
        }
        if let Some(previous) = self.hovered.take() {
            if let Some(widget) = targets.widget_mut(previous) {
                debug!("Hover exit {}", widget.id());
                widget.on_hover_exit();
            }
        }
        if let Some(next) = next {
            if let Some(widget) = targets.widget_mut(next) {
                debug!("Hover enter {}", widget.id());
                widget.on_hover_enter();
            }
        }
        self.hovered = next;
    }

    /// Drop the current hit and clear hover immediately
    pub fn suspend(&mut self, targets: &mut PointerTargets) {
        if self.enabled {
            debug!("Pointer suspended");
        }
        self.enabled = false;
        self.target = HitResult::None;
        self.ray_hit = None;
        self.set_hover(None, targets);
    }

    /// Activate the hovered widget
    ///
    /// Returns false, with no side effects, when nothing is hovered or the
    /// hovered widget is disabled.
    pub fn trigger_click(&mut self, targets: &mut PointerTargets, haptics: &mut Haptics) -> bool {
        let Some(hovered) = self.hovered else {
            return false;
        };
        let Some(widget) = targets.widget_mut(hovered) else {
            return false;
        };
        if !widget.is_interactive() || !widget.is_enabled() {
            return false;
        }

        debug!("Activate {}", widget.id());
        widget.activate();
        haptics.click();
        self.activated = Some(hovered);
        true
    }

    pub fn current_hit(&self) -> HitResult {
        self.target
    }

    /// Raw physics hit behind [`current_hit`](Self::current_hit)
    pub fn ray_hit(&self) -> Option<&RayHit> {
        self.ray_hit.as_ref()
    }

    pub fn hovered_widget(&self) -> Option<WidgetRef> {
        self.hovered
    }

    /// Widget activated since the last update
    pub fn activated_widget(&self) -> Option<WidgetRef> {
        self.activated
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Ray start and end for drawing the pointer line. The end is the hit
    /// point, or the max-distance point when nothing was hit.
    pub fn ray(&self) -> (Vec3, Vec3) {
        (self.origin, self.ray_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haptics::{HapticPulse, RecordingHaptics};
    use crate::pointer::{Marker, Panel, RecordingWidget, WidgetEvent, WidgetRect};
    use crate::scene::{Layer, SimpleWorld};
    use crate::spatial::{Pose, Vec2};
    use std::sync::{Arc, Mutex};

    struct Fixture {
        world: SimpleWorld,
        targets: PointerTargets,
        log: Arc<Mutex<Vec<WidgetEvent>>>,
        pointer: PointerRaycaster,
    }

    /// Panel one meter ahead with widget A on the left and B on the right
    fn fixture() -> Fixture {
        let mut world = SimpleWorld::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let pose = Pose::from_position(Vec3::new(0.0, 0.0, 1.0));
        let collider = world.add_box(pose, Vec3::new(0.5, 0.25, 0.005), Layer::DEFAULT);

        let mut targets = PointerTargets::new();
        targets.add_panel(
            Panel::new("menu", pose, 1.0, collider)
                .with_widget(RecordingWidget::new(
                    "A",
                    WidgetRect::centered(Vec2::new(-0.25, 0.0), Vec2::new(0.4, 0.4)),
                    log.clone(),
                ))
                .with_widget(
                    RecordingWidget::new(
                        "B",
                        WidgetRect::centered(Vec2::new(0.25, 0.0), Vec2::new(0.4, 0.4)),
                        log.clone(),
                    ),
                ),
        );

        Fixture {
            world,
            targets,
            log,
            pointer: PointerRaycaster::new(&PointerConfig::default()),
        }
    }

    fn stylus_at(x: f32) -> StylusState {
        StylusState {
            pose: Pose::from_position(Vec3::new(x, 0.0, 0.0)),
            active: true,
            ..StylusState::default()
        }
    }

    fn events(log: &Arc<Mutex<Vec<WidgetEvent>>>) -> Vec<WidgetEvent> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn test_hover_sequence_exit_before_enter() {
        let mut f = fixture();
        let mode = ModeContext::default();

        // A, A, B, B, nothing
        for x in [-0.25, -0.2, 0.25, 0.2, 2.0] {
            f.pointer.update(&stylus_at(x), &mode, &f.world, &mut f.targets);
        }

        assert_eq!(
            events(&f.log),
            vec![
                WidgetEvent::Enter("A".into()),
                WidgetEvent::Exit("A".into()),
                WidgetEvent::Enter("B".into()),
                WidgetEvent::Exit("B".into()),
            ]
        );
        assert!(f.pointer.current_hit().is_none());
    }

    #[test]
    fn test_panel_gap_resolves_to_object() {
        let mut f = fixture();
        f.pointer
            .update(&stylus_at(0.0), &ModeContext::default(), &f.world, &mut f.targets);

        let collider = f.targets.panel(crate::pointer::PanelId(0)).unwrap().collider();
        assert_eq!(f.pointer.current_hit(), HitResult::Object(collider));
        assert!(f.pointer.hovered_widget().is_none());
        let (_, end) = f.pointer.ray();
        assert!((end.z - 0.995).abs() < 1e-4);
    }

    #[test]
    fn test_miss_extends_to_max_distance() {
        let mut f = fixture();
        f.pointer
            .update(&stylus_at(3.0), &ModeContext::default(), &f.world, &mut f.targets);
        let (start, end) = f.pointer.ray();
        assert!(start.approx_eq(Vec3::new(3.0, 0.0, 0.0), 1e-6));
        assert!(end.approx_eq(Vec3::new(3.0, 0.0, 5.0), 1e-5));
    }

    #[test]
    fn test_marker_hit() {
        let mut f = fixture();
        let collider = f.world.add_sphere(Vec3::new(3.0, 0.0, 2.0), 0.1, Layer::DEFAULT);
        let marker = f
            .targets
            .add_marker(Marker::new("plant", Vec3::new(3.0, 0.0, 2.0), collider));

        f.pointer
            .update(&stylus_at(3.0), &ModeContext::default(), &f.world, &mut f.targets);
        assert_eq!(f.pointer.current_hit(), HitResult::Marker(marker));
    }

    #[test]
    fn test_exclusive_mode_clears_hover_once() {
        let mut f = fixture();
        let exclusive = ModeContext {
            ui_exclusive: true,
            ..ModeContext::default()
        };

        f.pointer
            .update(&stylus_at(-0.25), &ModeContext::default(), &f.world, &mut f.targets);
        f.pointer.update(&stylus_at(-0.25), &exclusive, &f.world, &mut f.targets);
        f.pointer.update(&stylus_at(-0.25), &exclusive, &f.world, &mut f.targets);

        assert_eq!(
            events(&f.log),
            vec![WidgetEvent::Enter("A".into()), WidgetEvent::Exit("A".into())]
        );
        assert!(!f.pointer.is_enabled());
        assert!(f.pointer.current_hit().is_none());
    }

    #[test]
    fn test_inactive_device_suspends() {
        let mut f = fixture();
        f.pointer
            .update(&stylus_at(0.25), &ModeContext::default(), &f.world, &mut f.targets);
        let inactive = StylusState {
            active: false,
            ..stylus_at(0.25)
        };
        f.pointer
            .update(&inactive, &ModeContext::default(), &f.world, &mut f.targets);

        assert!(f.pointer.hovered_widget().is_none());
        assert_eq!(events(&f.log).last(), Some(&WidgetEvent::Exit("B".into())));
    }

    #[test]
    fn test_trigger_click() {
        let mut f = fixture();
        let recorder = RecordingHaptics::new();
        let mut haptics = Haptics::new(HapticPulse::new(1.0, 0.011)).with_sink(recorder.clone());

        // Nothing hovered: no side effects
        assert!(!f.pointer.trigger_click(&mut f.targets, &mut haptics));
        assert_eq!(recorder.count(), 0);

        f.pointer
            .update(&stylus_at(0.25), &ModeContext::default(), &f.world, &mut f.targets);
        assert!(f.pointer.trigger_click(&mut f.targets, &mut haptics));
        assert_eq!(recorder.count(), 1);
        assert_eq!(events(&f.log).last(), Some(&WidgetEvent::Activate("B".into())));
        assert!(f.pointer.activated_widget().is_some());
    }

    #[test]
    fn test_disabled_widget_hovers_but_does_not_click() {
        let mut world = SimpleWorld::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let pose = Pose::from_position(Vec3::new(0.0, 0.0, 1.0));
        let collider = world.add_box(pose, Vec3::new(0.5, 0.5, 0.005), Layer::DEFAULT);
        let mut targets = PointerTargets::new();
        targets.add_panel(Panel::new("menu", pose, 1.0, collider).with_widget(
            RecordingWidget::new("off", WidgetRect::centered(Vec2::ZERO, Vec2::new(0.5, 0.5)), log.clone())
                .enabled(false),
        ));

        let mut pointer = PointerRaycaster::new(&PointerConfig::default());
        let mut haptics = Haptics::new(HapticPulse::new(1.0, 0.011));
        pointer.update(&stylus_at(0.0), &ModeContext::default(), &world, &mut targets);

        assert!(pointer.hovered_widget().is_some());
        assert!(!pointer.trigger_click(&mut targets, &mut haptics));
        assert_eq!(events(&log), vec![WidgetEvent::Enter("off".into())]);
    }

    #[test]
    fn test_non_interactive_widget_is_skipped() {
        let mut world = SimpleWorld::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let pose = Pose::from_position(Vec3::new(0.0, 0.0, 1.0));
        let collider = world.add_box(pose, Vec3::new(0.5, 0.5, 0.005), Layer::DEFAULT);
        let mut targets = PointerTargets::new();
        let rect = WidgetRect::centered(Vec2::ZERO, Vec2::new(0.5, 0.5));
        targets.add_panel(
            Panel::new("menu", pose, 1.0, collider)
                .with_widget(RecordingWidget::new("label", rect, log.clone()).interactive(false))
                .with_widget(RecordingWidget::new("button", rect, log.clone())),
        );

        let mut pointer = PointerRaycaster::new(&PointerConfig::default());
        pointer.update(&stylus_at(0.0), &ModeContext::default(), &world, &mut targets);
        assert_eq!(events(&log), vec![WidgetEvent::Enter("button".into())]);
    }
}
