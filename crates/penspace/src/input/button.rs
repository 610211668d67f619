//! Edge detection for digital and analog buttons

use super::ButtonState;

/// Edge detector for a purely digital channel
#[derive(Debug, Clone, Copy, Default)]
pub struct DigitalButton {
    prev_down: bool,
}

impl DigitalButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, raw: bool) -> ButtonState {
        let state = edges(raw, self.prev_down);
        self.prev_down = raw;
        state
    }

    pub fn is_down(&self) -> bool {
        self.prev_down
    }
}

/// Two-threshold debouncer for an analog force channel
///
/// A released button becomes pressed only once the force exceeds
/// `press_threshold`; a pressed button stays pressed while the force exceeds
/// `release_threshold`. `press_threshold > release_threshold`.
#[derive(Debug, Clone, Copy)]
pub struct HysteresisButton {
    press_threshold: f32,
    release_threshold: f32,
    prev_down: bool,
}

impl HysteresisButton {
    pub fn new(press_threshold: f32, release_threshold: f32) -> Self {
        debug_assert!(press_threshold > release_threshold);
        Self {
            press_threshold,
            release_threshold,
            prev_down: false,
        }
    }

    pub fn update(&mut self, force: f32) -> ButtonState {
        let threshold = if self.prev_down {
            self.release_threshold
        } else {
            self.press_threshold
        };
        let down = force > threshold;
        let state = edges(down, self.prev_down);
        self.prev_down = down;
        state
    }

    pub fn is_down(&self) -> bool {
        self.prev_down
    }
}

fn edges(down: bool, prev_down: bool) -> ButtonState {
    ButtonState {
        down,
        pressed: down && !prev_down,
        released: !down && prev_down,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digital_edges() {
        let mut button = DigitalButton::new();
        let seq = [false, true, true, false, false, true];
        let states: Vec<ButtonState> = seq.iter().map(|&raw| button.update(raw)).collect();

        assert!(!states[0].pressed && !states[0].released);
        assert!(states[1].pressed && states[1].down);
        assert!(!states[2].pressed && states[2].down);
        assert!(states[3].released && !states[3].down);
        assert!(!states[4].released);
        assert!(states[5].pressed);
    }

    #[test]
    fn test_hysteresis_band() {
        let mut button = HysteresisButton::new(0.02, 0.01);

        // Inside the band from below: stays up
        assert!(!button.update(0.015).down);
        assert!(!button.update(0.02).down);
        // Crossing the press threshold
        let s = button.update(0.021);
        assert!(s.pressed && s.down);
        // Inside the band from above: stays down
        let s = button.update(0.015);
        assert!(s.down && !s.released);
        assert!(button.update(0.0101).down);
        // At the release threshold: released
        let s = button.update(0.01);
        assert!(s.released && !s.down);
        // Back into the band: still up
        assert!(!button.update(0.019).down);
    }

    #[test]
    fn test_hysteresis_chatter_suppressed() {
        let mut button = HysteresisButton::new(0.02, 0.01);
        button.update(0.05);

        // Noise around a single threshold would toggle; the band absorbs it
        let noisy = [0.019, 0.021, 0.018, 0.022, 0.012, 0.03];
        let transitions = noisy
            .iter()
            .map(|&f| button.update(f))
            .filter(|s| s.pressed || s.released)
            .count();
        assert_eq!(transitions, 0);
    }

    #[test]
    fn test_edges_never_both_set() {
        let mut digital = DigitalButton::new();
        let mut analog = HysteresisButton::new(0.02, 0.01);

        // Deterministic pseudo-random sequence
        let mut seed: u32 = 0x1234_5678;
        for _ in 0..2000 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let force = (seed % 400) as f32 / 10_000.0;
            let raw = seed % 3 == 0;

            let d = digital.update(raw);
            let a = analog.update(force);
            assert!(!(d.pressed && d.released));
            assert!(!(a.pressed && a.released));
        }
    }

    #[test]
    fn test_hysteresis_transitions_cross_thresholds() {
        let mut button = HysteresisButton::new(0.02, 0.01);
        let mut prev_force = 0.0f32;
        let mut seed: u32 = 42;

        for _ in 0..2000 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let force = ((seed >> 16) % 300) as f32 / 10_000.0;
            let s = button.update(force);
            if s.pressed {
                assert!(force > 0.02, "pressed at {force} (prev {prev_force})");
            }
            if s.released {
                assert!(force <= 0.01, "released at {force} (prev {prev_force})");
            }
            prev_force = force;
        }
    }
}
