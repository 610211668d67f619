//! World-space panels and detection markers the pointer can hit

use std::collections::HashMap;

use crate::scene::ColliderId;
use crate::spatial::{Pose, Vec2, Vec3};

use super::{MarkerRef, PanelId, Widget, WidgetRef};

/// A flat UI surface placed in the world
///
/// The panel plane is the local XY plane of `pose`; one local unit is
/// `scale` meters. Widgets are hit-tested in child order.
pub struct Panel {
    name: String,
    pose: Pose,
    scale: f32,
    collider: ColliderId,
    widgets: Vec<Box<dyn Widget>>,
}

impl Panel {
    pub fn new(name: impl Into<String>, pose: Pose, scale: f32, collider: ColliderId) -> Self {
        Self {
            name: name.into(),
            pose,
            scale,
            collider,
            widgets: Vec::new(),
        }
    }

    pub fn with_widget(mut self, widget: impl Widget + 'static) -> Self {
        self.widgets.push(Box::new(widget));
        self
    }

    pub fn push_widget(&mut self, widget: Box<dyn Widget>) -> usize {
        self.widgets.push(widget);
        self.widgets.len() - 1
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn collider(&self) -> ColliderId {
        self.collider
    }

    pub fn widgets(&self) -> impl Iterator<Item = &dyn Widget> {
        self.widgets.iter().map(|w| w.as_ref())
    }

    pub fn widget(&self, index: usize) -> Option<&dyn Widget> {
        self.widgets.get(index).map(|w| w.as_ref())
    }

    pub fn widget_mut(&mut self, index: usize) -> Option<&mut (dyn Widget + 'static)> {
        self.widgets.get_mut(index).map(|w| w.as_mut())
    }

    /// World point to panel-local 2D coordinates
    pub fn to_local(&self, world: Vec3) -> Vec2 {
        let local = self.pose.inverse_transform_point(world);
        let scale = if self.scale.abs() > f32::EPSILON {
            self.scale
        } else {
            1.0
        };
        Vec2::new(local.x / scale, local.y / scale)
    }

    /// Panel-local 2D coordinates to a world point on the panel plane
    pub fn to_world(&self, local: Vec2) -> Vec3 {
        self.pose
            .transform_point(Vec3::new(local.x * self.scale, local.y * self.scale, 0.0))
    }

    /// First interactive widget, in child order, whose rectangle contains
    /// `local`
    pub fn widget_at(&self, local: Vec2) -> Option<usize> {
        self.widgets
            .iter()
            .position(|w| w.is_interactive() && w.rect().contains(local))
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("name", &self.name)
            .field("pose", &self.pose)
            .field("scale", &self.scale)
            .field("collider", &self.collider)
            .field("widgets", &self.widgets.len())
            .finish()
    }
}

/// A detected real-world object the user can point at
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub label: String,
    pub position: Vec3,
    pub collider: ColliderId,
}

impl Marker {
    pub fn new(label: impl Into<String>, position: Vec3, collider: ColliderId) -> Self {
        Self {
            label: label.into(),
            position,
            collider,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Panel(PanelId),
    Marker(MarkerRef),
}

/// Everything the pointer resolves beyond plain geometry
#[derive(Debug, Default)]
pub struct PointerTargets {
    panels: Vec<Panel>,
    markers: Vec<Marker>,
    by_collider: HashMap<ColliderId, Target>,
}

impl PointerTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_panel(&mut self, panel: Panel) -> PanelId {
        let id = PanelId(self.panels.len());
        self.by_collider.insert(panel.collider(), Target::Panel(id));
        self.panels.push(panel);
        id
    }

    pub fn add_marker(&mut self, marker: Marker) -> MarkerRef {
        let id = MarkerRef(self.markers.len());
        self.by_collider.insert(marker.collider, Target::Marker(id));
        self.markers.push(marker);
        id
    }

    pub(crate) fn resolve(&self, collider: ColliderId) -> Option<Target> {
        self.by_collider.get(&collider).copied()
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(id.0)
    }

    pub fn panel_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.panels.get_mut(id.0)
    }

    pub fn panels(&self) -> impl Iterator<Item = (PanelId, &Panel)> {
        self.panels.iter().enumerate().map(|(i, p)| (PanelId(i), p))
    }

    pub fn marker(&self, id: MarkerRef) -> Option<&Marker> {
        self.markers.get(id.0)
    }

    pub fn markers(&self) -> impl Iterator<Item = (MarkerRef, &Marker)> {
        self.markers.iter().enumerate().map(|(i, m)| (MarkerRef(i), m))
    }

    pub fn widget(&self, widget: WidgetRef) -> Option<&dyn Widget> {
        self.panel(widget.panel)?.widget(widget.index)
    }

    pub fn widget_mut(&mut self, widget: WidgetRef) -> Option<&mut (dyn Widget + 'static)> {
        self.panel_mut(widget.panel)?.widget_mut(widget.index)
    }

    /// Find a widget by its id across all panels
    pub fn find_widget(&self, id: &str) -> Option<WidgetRef> {
        self.panels().find_map(|(panel_id, panel)| {
            panel
                .widgets()
                .position(|w| w.id() == id)
                .map(|index| WidgetRef {
                    panel: panel_id,
                    index,
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::{Button, WidgetRect};
    use crate::spatial::Quat;
    use std::f32::consts::FRAC_PI_2;

    fn button(id: &str, x: f32) -> Button {
        Button::new(id, id, WidgetRect::centered(Vec2::new(x, 0.0), Vec2::new(100.0, 50.0)))
    }

    #[test]
    fn test_to_local_applies_pose_and_scale() {
        // Panel turned to face +X, 1mm per unit
        let pose = Pose::new(Vec3::new(2.0, 1.0, 0.0), Quat::from_axis_angle(Vec3::UP, -FRAC_PI_2));
        let panel = Panel::new("menu", pose, 0.001, ColliderId(1));

        let world = panel.to_world(Vec2::new(150.0, -20.0));
        let local = panel.to_local(world);
        assert!((local.x - 150.0).abs() < 1e-2);
        assert!((local.y + 20.0).abs() < 1e-2);
        assert!((world.y - 0.98).abs() < 1e-5);
    }

    #[test]
    fn test_widget_at_uses_child_order() {
        let overlapping = Button::new("under", "under", WidgetRect::centered(Vec2::ZERO, Vec2::new(400.0, 400.0)));
        let panel = Panel::new("menu", Pose::IDENTITY, 0.001, ColliderId(1))
            .with_widget(button("a", 0.0))
            .with_widget(overlapping)
            .with_widget(button("b", 150.0));

        assert_eq!(panel.widget_at(Vec2::new(10.0, 0.0)), Some(0));
        assert_eq!(panel.widget_at(Vec2::new(150.0, 0.0)), Some(1));
        assert_eq!(panel.widget_at(Vec2::new(500.0, 0.0)), None);
    }

    #[test]
    fn test_targets_lookup() {
        let mut targets = PointerTargets::new();
        let panel = targets.add_panel(
            Panel::new("menu", Pose::IDENTITY, 1.0, ColliderId(3)).with_widget(button("done", 0.0)),
        );
        let marker = targets.add_marker(Marker::new("cup", Vec3::ZERO, ColliderId(4)));

        assert_eq!(targets.resolve(ColliderId(3)), Some(Target::Panel(panel)));
        assert_eq!(targets.resolve(ColliderId(4)), Some(Target::Marker(marker)));
        assert_eq!(targets.resolve(ColliderId(5)), None);
        assert_eq!(targets.find_widget("done"), Some(WidgetRef { panel, index: 0 }));
        assert_eq!(targets.marker(marker).map(|m| m.label.as_str()), Some("cup"));
    }
}
