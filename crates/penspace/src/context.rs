//! Per-tick context passed into the stylus components

use std::time::Duration;

/// Global mode flags set by the host's mode controller
///
/// Components only read these; the rig owns the single copy and hands it to
/// each component every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeContext {
    /// Ink capture is on. Grabbing is ignored while this is set.
    pub drawing_enabled: bool,
    /// Another input consumer owns the pointer; the ray is suspended
    pub ui_exclusive: bool,
}

impl ModeContext {
    pub fn new(drawing_enabled: bool) -> Self {
        Self {
            drawing_enabled,
            ui_exclusive: false,
        }
    }

    pub fn grab_permitted(&self) -> bool {
        !self.drawing_enabled
    }

    pub fn pointer_permitted(&self) -> bool {
        !self.ui_exclusive
    }
}

/// Monotonic frame time accumulated from tick deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    /// Time since the rig started
    pub time: Duration,
    /// Time since last tick
    pub delta_time: Duration,
    pub tick: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            time: Duration::ZERO,
            delta_time: Duration::from_millis(16),
            tick: 0,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next tick
    pub fn advance(&mut self, dt: Duration) {
        self.delta_time = dt;
        self.time += dt;
        self.tick = self.tick.wrapping_add(1);
    }
}
