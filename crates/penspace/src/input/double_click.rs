//! Back-button double-click detection

use std::time::Duration;

/// Fires once when two presses land within `window` of each other
///
/// After firing the stored press is forgotten, so a third press inside the
/// same window starts a new pair instead of firing again.
#[derive(Debug, Clone)]
pub struct DoubleClickDetector {
    window: Duration,
    last_press: Option<Duration>,
}

impl DoubleClickDetector {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_press: None,
        }
    }

    /// Feed the pressed edge of this tick. `now` is monotonic time since the
    /// rig started.
    pub fn update(&mut self, pressed: bool, now: Duration) -> bool {
        if !pressed {
            return false;
        }
        match self.last_press {
            Some(last) if now.saturating_sub(last) <= self.window => {
                self.last_press = None;
                true
            }
            _ => {
                self.last_press = Some(now);
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_press = None;
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
