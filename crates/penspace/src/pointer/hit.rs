//! Resolved pointer hits

use crate::scene::ColliderId;

/// Index of a panel registered with [`PointerTargets`](super::PointerTargets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelId(pub usize);

/// A widget by panel and child index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetRef {
    pub panel: PanelId,
    pub index: usize,
}

/// Index of a detection marker registered with
/// [`PointerTargets`](super::PointerTargets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerRef(pub usize);

/// What the pointer ray resolved to this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitResult {
    #[default]
    None,
    /// Plain scene geometry, or a panel hit outside every widget
    Object(ColliderId),
    Widget(WidgetRef),
    Marker(MarkerRef),
}

impl HitResult {
    pub fn is_none(&self) -> bool {
        matches!(self, HitResult::None)
    }

    pub fn widget(&self) -> Option<WidgetRef> {
        match self {
            HitResult::Widget(widget) => Some(*widget),
            _ => None,
        }
    }

    pub fn marker(&self) -> Option<MarkerRef> {
        match self {
            HitResult::Marker(marker) => Some(*marker),
            _ => None,
        }
    }
}
