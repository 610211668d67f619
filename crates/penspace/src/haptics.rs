//! Fire-and-forget haptic feedback

use std::sync::{Arc, Mutex};

use tracing::{trace, warn};

/// A single vibration request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HapticPulse {
    /// 0.0 - 1.0
    pub amplitude: f32,
    pub duration_secs: f32,
}

impl HapticPulse {
    pub fn new(amplitude: f32, duration_secs: f32) -> Self {
        Self {
            amplitude: amplitude.clamp(0.0, 1.0),
            duration_secs: duration_secs.max(0.0),
        }
    }
}

/// Device side of the haptics contract. Implementations must not block.
pub trait HapticSink: Send {
    fn trigger(&mut self, pulse: HapticPulse);
}

/// Sink that remembers every pulse, for tests and the sandbox status line
#[derive(Debug, Clone, Default)]
pub struct RecordingHaptics {
    pulses: Arc<Mutex<Vec<HapticPulse>>>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of pulses received so far
    pub fn pulses(&self) -> Vec<HapticPulse> {
        self.pulses.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.pulses.lock().map(|p| p.len()).unwrap_or(0)
    }
}

impl HapticSink for RecordingHaptics {
    fn trigger(&mut self, pulse: HapticPulse) {
        if let Ok(mut pulses) = self.pulses.lock() {
            pulses.push(pulse);
        }
    }
}

/// Handle shared by every component that wants to buzz the stylus
///
/// With no sink attached pulses are dropped; the first dropped pulse is
/// logged, later ones are not.
pub struct Haptics {
    sink: Option<Box<dyn HapticSink>>,
    click: HapticPulse,
    warned_missing: bool,
}

impl Haptics {
    pub fn new(click: HapticPulse) -> Self {
        Self {
            sink: None,
            click,
            warned_missing: false,
        }
    }

    pub fn with_sink(mut self, sink: impl HapticSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn set_sink(&mut self, sink: Option<Box<dyn HapticSink>>) {
        self.sink = sink;
        self.warned_missing = false;
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    pub fn pulse(&mut self, pulse: HapticPulse) {
        match self.sink.as_mut() {
            Some(sink) => {
                trace!(
                    "Haptic pulse amplitude={} duration={}s",
                    pulse.amplitude,
                    pulse.duration_secs
                );
                sink.trigger(pulse);
            }
            None if !self.warned_missing => {
                warn!("No haptic sink attached; haptic pulses are dropped");
                self.warned_missing = true;
            }
            None => {}
        }
    }

    /// The configured short click
    pub fn click(&mut self) {
        let click = self.click;
        self.pulse(click);
    }
}

impl std::fmt::Debug for Haptics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Haptics")
            .field("has_sink", &self.sink.is_some())
            .field("click", &self.click)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_is_clamped() {
        let pulse = HapticPulse::new(3.0, -1.0);
        assert_eq!(pulse.amplitude, 1.0);
        assert_eq!(pulse.duration_secs, 0.0);
    }

    #[test]
    fn test_click_reaches_sink() {
        let recorder = RecordingHaptics::new();
        let mut haptics = Haptics::new(HapticPulse::new(0.5, 0.01)).with_sink(recorder.clone());
        haptics.click();
        haptics.click();
        assert_eq!(recorder.pulses(), vec![HapticPulse::new(0.5, 0.01); 2]);
    }

    #[test]
    fn test_missing_sink_is_silent() {
        let mut haptics = Haptics::new(HapticPulse::new(1.0, 0.011));
        haptics.click();
        haptics.click();
        assert!(!haptics.has_sink());
        assert!(haptics.warned_missing);
    }
}
