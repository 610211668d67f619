//! Sandbox rendering

use penspace::pointer::HitResult;
use penspace::{Vec2, Vec3};

use crate::state::SimState;
use crate::view::{FrontView, ANCHOR, HOVER, INK, PANEL, PENDING_INK, RAY, TEXT};

pub fn render(state: &SimState, view: &mut FrontView) {
    let rig = &state.rig;

    let (ray_start, ray_end) = rig.ray();
    if rig.pointer_active() && rig.state().active {
        view.line(ray_start, ray_end, '·', RAY);
    }

    render_panels(state, view);

    for (marker_ref, marker) in rig.targets().markers() {
        let color = if rig.current_hit() == HitResult::Marker(marker_ref) {
            HOVER
        } else {
            TEXT
        };
        view.plot(marker.position, '◆', color);
        if let Some((x, y)) = view.project(marker.position) {
            view.text(x + 2, y, &marker.label, color);
        }
    }

    for drawing in rig.anchors().iter() {
        for point in drawing.world_points() {
            view.plot(point, '•', INK);
        }
        if let Some(anchor) = drawing.anchor_position() {
            view.plot(anchor, '⚓', ANCHOR);
            if let (Some(text), Some((x, y))) = (drawing.recognized_text(), view.project(anchor)) {
                view.text(x + 2, y, text, ANCHOR);
            }
        }
    }
    if let Some(drawing) = rig.pending_drawing() {
        for point in drawing.world_points() {
            view.plot(point, '•', PENDING_INK);
        }
    }

    let tip_color = if rig.grab_session().is_some() { ANCHOR } else { HOVER };
    view.plot(rig.state().tip_position(), '✚', tip_color);

    render_status(state, view);
}

fn render_panels(state: &SimState, view: &mut FrontView) {
    let rig = &state.rig;
    let hovered = rig.hovered_widget();

    for (panel_id, panel) in rig.targets().panels() {
        for (index, widget) in panel.widgets().enumerate() {
            let rect = widget.rect().rect();
            let min = panel.to_world(rect.min);
            let max = panel.to_world(rect.max);
            let is_hovered = hovered.is_some_and(|h| h.panel == panel_id && h.index == index);
            let color = if is_hovered { HOVER } else { PANEL };
            view.rect(min, max, color);

            let center = panel.to_world(Vec2::new(
                (rect.min.x + rect.max.x) * 0.5,
                (rect.min.y + rect.max.y) * 0.5,
            ));
            if let Some((x, y)) = view.project(center) {
                view.text_centered(x, y, widget.label(), color);
            }
        }
    }
}

fn render_status(state: &SimState, view: &mut FrontView) {
    let rig = &state.rig;
    let stylus = rig.state();
    let p: Vec3 = stylus.tip_position();

    let mode = match (rig.drawing_enabled(), rig.grab_session().is_some()) {
        (true, _) if rig.is_drawing() => "DRAWING",
        (true, _) => "WRITER",
        (false, true) => "GRABBING",
        (false, false) => "POINTER",
    };
    let hit = match rig.current_hit() {
        HitResult::None => "-".to_string(),
        HitResult::Object(id) => format!("object {}", id.0),
        HitResult::Widget(w) => rig
            .targets()
            .widget(w)
            .map(|w| format!("widget {}", w.id()))
            .unwrap_or_default(),
        HitResult::Marker(m) => rig
            .targets()
            .marker(m)
            .map(|m| format!("marker {}", m.label))
            .unwrap_or_default(),
    };

    view.status(
        0,
        &format!(
            " {:<8} tip ({:+.2}, {:+.2}, {:+.2})  middle {:.3}{}  hit {}  anchored {}  lookups {}{}",
            mode,
            p.x,
            p.y,
            p.z,
            stylus.middle_force,
            if stylus.middle.down { "▼" } else { " " },
            hit,
            rig.anchors().len(),
            state.pending_lookups(),
            if stylus.active { "" } else { "  [no tracking]" },
        ),
        TEXT,
    );
    if let Some(message) = &state.status_message {
        view.status(1, &format!(" {}", message), HOVER);
    }
    view.status(
        2,
        " arrows/PgUp/PgDn move  ijkl aim  m middle  f front  b back  x tracking | w writer  u pointer  n finalize  r reset  q quit",
        PANEL,
    );
}
