//! Widget contract for world-space panels

use crate::spatial::{Rect, Vec2};

/// A widget's rectangle in its panel's local plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetRect {
    pub position: Vec2,
    pub size: Vec2,
    /// 0..1 on each axis; (0.5, 0.5) centres the rectangle on `position`
    pub pivot: Vec2,
}

impl WidgetRect {
    pub fn centered(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            pivot: Vec2::new(0.5, 0.5),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pivot(self.position, self.size, self.pivot)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.rect().contains(point)
    }
}

/// A UI element the pointer can hover and activate
///
/// Activation must go through
/// [`PointerRaycaster::trigger_click`](super::PointerRaycaster::trigger_click);
/// callers never call [`activate`](Widget::activate) directly.
pub trait Widget: Send {
    fn id(&self) -> &str;

    /// Text shown on the widget
    fn label(&self) -> &str {
        self.id()
    }

    /// Local rectangle used for the manual hit test
    fn rect(&self) -> WidgetRect;

    /// Non-interactive widgets are skipped by the hit test
    fn is_interactive(&self) -> bool {
        true
    }

    /// Disabled widgets can be hovered but not activated
    fn is_enabled(&self) -> bool {
        true
    }

    fn on_hover_enter(&mut self) {}

    fn on_hover_exit(&mut self) {}

    fn activate(&mut self);
}

/// Push button with a text label
#[derive(Debug, Clone)]
pub struct Button {
    id: String,
    label: String,
    rect: WidgetRect,
    enabled: bool,
    hovered: bool,
    clicks: u32,
}

impl Button {
    pub fn new(id: impl Into<String>, label: impl Into<String>, rect: WidgetRect) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            rect,
            enabled: true,
            hovered: false,
            clicks: 0,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }
}

impl Widget for Button {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn rect(&self) -> WidgetRect {
        self.rect
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn on_hover_enter(&mut self) {
        self.hovered = true;
    }

    fn on_hover_exit(&mut self) {
        self.hovered = false;
    }

    fn activate(&mut self) {
        self.clicks += 1;
    }
}

/// Widget that appends its callbacks to a shared log
#[cfg(test)]
pub(crate) mod recording {
    use std::sync::{Arc, Mutex};

    use super::{Widget, WidgetRect};

    /// What happened to a widget
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum WidgetEvent {
        Enter(String),
        Exit(String),
        Activate(String),
    }

    #[derive(Debug, Clone)]
    pub(crate) struct RecordingWidget {
        id: String,
        rect: WidgetRect,
        interactive: bool,
        enabled: bool,
        log: Arc<Mutex<Vec<WidgetEvent>>>,
    }

    impl RecordingWidget {
        pub(crate) fn new(id: impl Into<String>, rect: WidgetRect, log: Arc<Mutex<Vec<WidgetEvent>>>) -> Self {
            Self {
                id: id.into(),
                rect,
                interactive: true,
                enabled: true,
                log,
            }
        }

        pub(crate) fn interactive(mut self, interactive: bool) -> Self {
            self.interactive = interactive;
            self
        }

        pub(crate) fn enabled(mut self, enabled: bool) -> Self {
            self.enabled = enabled;
            self
        }

        fn record(&self, event: WidgetEvent) {
            if let Ok(mut log) = self.log.lock() {
                log.push(event);
            }
        }
    }

    impl Widget for RecordingWidget {
        fn id(&self) -> &str {
            &self.id
        }

        fn rect(&self) -> WidgetRect {
            self.rect
        }

        fn is_interactive(&self) -> bool {
            self.interactive
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn on_hover_enter(&mut self) {
            self.record(WidgetEvent::Enter(self.id.clone()));
        }

        fn on_hover_exit(&mut self) {
            self.record(WidgetEvent::Exit(self.id.clone()));
        }

        fn activate(&mut self) {
            self.record(WidgetEvent::Activate(self.id.clone()));
        }
    }
}
