//! Pointer ray and manual widget hit testing
//!
//! World-space panels have no event camera, so a ray hit on a panel's
//! collider is converted into the panel's local plane and matched against
//! widget rectangles by hand.

mod hit;
mod panel;
mod raycaster;
mod widget;

pub use hit::{HitResult, MarkerRef, PanelId, WidgetRef};
pub use panel::{Marker, Panel, PointerTargets};
pub use raycaster::PointerRaycaster;
pub use widget::{Button, Widget, WidgetRect};

#[cfg(test)]
pub(crate) use widget::recording::{RecordingWidget, WidgetEvent};
