//! End-to-end: draw two strokes, finalize, grab the result and let go

use std::time::Duration;

use penspace::haptics::RecordingHaptics;
use penspace::input::ScriptedDevice;
use penspace::spatial::Aabb;
use penspace::{Pose, RawStylusSample, SimpleWorld, StylusConfig, StylusRig, Vec3};

const DT: Duration = Duration::from_millis(16);
const PRESSED_FORCE: f32 = 0.5;

fn at(position: Vec3) -> RawStylusSample {
    RawStylusSample::tracked(Pose::from_position(position))
}

fn drawing_at(position: Vec3) -> RawStylusSample {
    at(position).with_middle_force(PRESSED_FORCE)
}

#[test]
fn test_draw_finalize_grab_release() {
    let config = StylusConfig::from_toml_str(
        r#"
        [drawing]
        root_position = [0.0, 1.0, 0.5]

        [anchor]
        layer = 8
        "#,
    )
    .unwrap();
    let haptics = RecordingHaptics::new();
    let mut rig = StylusRig::new(config, SimpleWorld::new()).with_haptics(haptics.clone());
    rig.set_drawing_enabled(true);

    let stroke_a = [
        Vec3::new(0.00, 1.00, 0.50),
        Vec3::new(0.02, 1.03, 0.50),
        Vec3::new(0.04, 1.00, 0.50),
    ];
    let stroke_b = [Vec3::new(0.06, 1.00, 0.50), Vec3::new(0.08, 1.04, 0.50)];

    let mut device = ScriptedDevice::new();
    for &p in &stroke_a {
        device.push(drawing_at(p));
    }
    device.push(at(stroke_a[2]));
    for &p in &stroke_b {
        device.push(drawing_at(p));
    }
    device.push(at(stroke_b[1]));
    // Finalize on back press
    device.push(at(stroke_b[1]).with_back(true));
    device.push(at(stroke_b[1]));

    while device.remaining() > 0 {
        rig.tick(&mut device, DT);
    }

    let drawings: Vec<_> = rig.anchors().iter().collect();
    assert_eq!(drawings.len(), 1);
    let drawing = drawings[0];
    let lens: Vec<usize> = drawing.strokes().iter().map(|s| s.len()).collect();
    assert_eq!(lens, vec![3, 2]);
    assert!(rig.pending_drawing().is_none());

    let bounds = Aabb::from_points(stroke_a.iter().chain(stroke_b.iter()).copied()).unwrap();
    let expected_anchor = bounds.center() + Vec3::UP * 0.02;
    let anchor = drawing.anchor_position().unwrap();
    assert!(anchor.approx_eq(expected_anchor, 1e-5));
    assert_eq!(haptics.count(), 1);
    let id = drawing.id();

    // Grab from 5cm away with drawing off
    rig.set_drawing_enabled(false);
    let grab_tip = anchor + Vec3::new(0.05, 0.0, 0.0);
    let path = [
        grab_tip,
        grab_tip + Vec3::new(0.1, 0.0, 0.0),
        grab_tip + Vec3::new(0.2, 0.1, -0.3),
    ];

    let mut device = ScriptedDevice::new();
    for &p in &path {
        device.push(drawing_at(p));
    }
    for &tip in &path {
        rig.tick(&mut device, DT);
        assert_eq!(rig.grab_session().map(|s| s.drawing), Some(id));
        let anchor = rig.anchors().get(id).unwrap().anchor_position().unwrap();
        assert!(anchor.approx_eq(tip, 1e-5));
    }

    // Release well away from the last tip
    let last_tip = path[2];
    device.push(at(last_tip + Vec3::new(1.0, 0.0, 0.0)));
    rig.tick(&mut device, DT);
    assert!(rig.grab_session().is_none());
    let anchor = rig.anchors().get(id).unwrap().anchor_position().unwrap();
    assert!(anchor.approx_eq(last_tip, 1e-5));

    // Ink moved with the root, keeping its shape
    let moved = rig.anchors().get(id).unwrap();
    let shift = last_tip - expected_anchor;
    let first_point = moved.world_points().next().unwrap();
    assert!(first_point.approx_eq(stroke_a[0] + shift, 1e-5));
}

#[test]
fn test_empty_finalize_changes_nothing() {
    let mut rig = StylusRig::new(StylusConfig::default(), SimpleWorld::new());
    rig.set_drawing_enabled(true);

    let mut device = ScriptedDevice::new();
    device.push(at(Vec3::ZERO).with_back(true));
    rig.tick(&mut device, DT);

    assert!(rig.finalized_this_tick().is_none());
    assert!(rig.anchors().is_empty());
    assert!(rig.physics().is_empty());
}
