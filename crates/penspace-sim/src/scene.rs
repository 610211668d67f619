//! Sandbox scene: a menu panel and two detected objects

use penspace::pointer::{Button, Marker, Panel, PointerTargets, WidgetRect};
use penspace::{Layer, PhysicsWorld, Pose, SimpleWorld, Vec2, Vec3};

pub const WRITE_BUTTON: &str = "write";
pub const DONE_BUTTON: &str = "done";
pub const RESET_BUTTON: &str = "reset";

/// Where the simulated stylus starts
pub const STYLUS_START: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Panel units are millimetres
const PANEL_SCALE: f32 = 0.001;
const PANEL_SIZE: Vec2 = Vec2::new(360.0, 80.0);
const BUTTON_SIZE: Vec2 = Vec2::new(100.0, 60.0);

pub fn build() -> (SimpleWorld, PointerTargets) {
    let mut world = SimpleWorld::new();
    let mut targets = PointerTargets::new();

    let pose = Pose::from_position(Vec3::new(0.0, 1.3, 1.0));
    let half_extents = Vec3::new(
        PANEL_SIZE.x * PANEL_SCALE * 0.5,
        PANEL_SIZE.y * PANEL_SCALE * 0.5,
        0.005,
    );
    let collider = world.add_box(pose, half_extents, Layer::DEFAULT);

    let button = |id: &str, label: &str, x: f32| {
        Button::new(id, label, WidgetRect::centered(Vec2::new(x, 0.0), BUTTON_SIZE))
    };
    targets.add_panel(
        Panel::new("menu", pose, PANEL_SCALE, collider)
            .with_widget(button(WRITE_BUTTON, "Write", -120.0))
            .with_widget(button(DONE_BUTTON, "Done", 0.0))
            .with_widget(button(RESET_BUTTON, "Reset", 120.0)),
    );

    for (label, position) in [
        ("mug", Vec3::new(-0.45, 0.85, 1.5)),
        ("plant", Vec3::new(0.45, 1.1, 1.5)),
    ] {
        let collider = world.add_sphere(position, 0.08, Layer::DEFAULT);
        targets.add_marker(Marker::new(label, position, collider));
    }

    (world, targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use penspace::LayerMask;

    #[test]
    fn test_scene_layout() {
        let (world, targets) = build();
        assert_eq!(world.len(), 3);
        assert!(targets.find_widget(DONE_BUTTON).is_some());
        assert_eq!(targets.markers().count(), 2);

        // Straight ahead from the start hits nothing
        assert!(world
            .ray_cast(STYLUS_START, Vec3::FORWARD, 5.0, LayerMask::ALL)
            .is_none());
        // Raised to panel height, the ray lands on the Done button
        let hit = world
            .ray_cast(Vec3::new(0.0, 1.3, 0.0), Vec3::FORWARD, 5.0, LayerMask::ALL)
            .unwrap();
        let (panel_id, panel) = targets.panels().next().unwrap();
        assert_eq!(hit.collider, panel.collider());
        assert_eq!(panel.widget_at(panel.to_local(hit.point)), Some(1));
        assert_eq!(targets.find_widget(DONE_BUTTON).map(|w| w.panel), Some(panel_id));
    }
}
