//! Keyboard-driven stylus for terminal development
//!
//! Maps key presses to raw stylus channels so the whole rig can be exercised
//! without tracking hardware.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::error::DeviceError;
use crate::spatial::{Pose, Quat, Vec3};

use super::{DeviceLayer, RawStylusSample};

/// Middle force the pad ramps towards while held
const MIDDLE_HELD_FORCE: f32 = 0.05;

/// Simulated stylus
///
/// | key | effect |
/// |-----|--------|
/// | arrows | move tip left/right/up/down |
/// | PgUp / PgDn | move tip forward/back |
/// | i / k | pitch up/down |
/// | j / l | yaw left/right |
/// | m | hold/release the middle pad (force ramps over several ticks) |
/// | f / b | click front/back for one tick |
/// | d | toggle docked |
/// | x | toggle tracking |
#[derive(Debug, Clone)]
pub struct KeyboardStylus {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    middle_force: f32,
    middle_held: bool,
    front_pulse: bool,
    back_pulse: bool,
    docked: bool,
    active: bool,
    /// Meters per key press
    move_step: f32,
    /// Radians per key press
    turn_step: f32,
    /// Force change per tick while ramping
    ramp_step: f32,
}

impl Default for KeyboardStylus {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            middle_force: 0.0,
            middle_held: false,
            front_pulse: false,
            back_pulse: false,
            docked: false,
            active: true,
            move_step: 0.02,
            turn_step: 0.1,
            ramp_step: 0.012,
        }
    }
}

impl KeyboardStylus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at `position`, pointing along +Z
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Apply a key press. Returns false for keys the stylus does not use.
    pub fn process_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        let step = self.move_step;
        match key.code {
            KeyCode::Left => self.position.x -= step,
            KeyCode::Right => self.position.x += step,
            KeyCode::Up => self.position.y += step,
            KeyCode::Down => self.position.y -= step,
            KeyCode::PageUp => self.position.z += step,
            KeyCode::PageDown => self.position.z -= step,

            KeyCode::Char('i') => self.pitch -= self.turn_step,
            KeyCode::Char('k') => self.pitch += self.turn_step,
            KeyCode::Char('j') => self.yaw -= self.turn_step,
            KeyCode::Char('l') => self.yaw += self.turn_step,

            KeyCode::Char('m') => self.middle_held = !self.middle_held,
            KeyCode::Char('f') => self.front_pulse = true,
            KeyCode::Char('b') => self.back_pulse = true,
            KeyCode::Char('d') => self.docked = !self.docked,
            KeyCode::Char('x') => self.active = !self.active,
            _ => return false,
        }
        true
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, Quat::from_yaw_pitch(self.yaw, self.pitch))
    }

    pub fn is_middle_held(&self) -> bool {
        self.middle_held
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Return to the starting pose with everything released
    pub fn reset(&mut self) {
        self.position = Vec3::ZERO;
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.middle_force = 0.0;
        self.middle_held = false;
        self.front_pulse = false;
        self.back_pulse = false;
    }

    fn ramp_middle(&mut self) {
        let target = if self.middle_held { MIDDLE_HELD_FORCE } else { 0.0 };
        if self.middle_force < target {
            self.middle_force = (self.middle_force + self.ramp_step).min(target);
        } else {
            self.middle_force = (self.middle_force - self.ramp_step).max(target);
        }
    }
}

impl DeviceLayer for KeyboardStylus {
    fn sample(&mut self) -> Result<RawStylusSample, DeviceError> {
        self.ramp_middle();
        let front = std::mem::take(&mut self.front_pulse);
        let back = std::mem::take(&mut self.back_pulse);

        if !self.active {
            return Ok(RawStylusSample::inactive());
        }

        Ok(RawStylusSample {
            active: true,
            pose: Some(self.pose()),
            tip_force: Some(0.0),
            middle_force: Some(self.middle_force),
            front: Some(front),
            back: Some(back),
            docked: Some(self.docked),
        })
    }
}
