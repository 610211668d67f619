//! Per-tick stylus snapshot

use serde::Deserialize;

use crate::spatial::{Pose, Quat, Vec3};

/// Physical buttons on the stylus barrel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StylusButton {
    Front,
    /// Analog pressure pad, debounced with hysteresis
    Middle,
    Back,
}

/// Which transition of a button an action listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Pressed,
    Released,
}

/// Level and edge flags of one button for the current tick
///
/// `pressed` and `released` are never both set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub down: bool,
    pub pressed: bool,
    pub released: bool,
}

impl ButtonState {
    pub fn edge(&self, edge: Edge) -> bool {
        match edge {
            Edge::Pressed => self.pressed,
            Edge::Released => self.released,
        }
    }
}

/// Debounced stylus state, overwritten once per tick by the input driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StylusState {
    pub pose: Pose,
    /// Tip offset in the stylus' local frame
    pub tip_offset: Vec3,
    pub tip_force: f32,
    pub middle_force: f32,
    pub front: ButtonState,
    pub middle: ButtonState,
    pub back: ButtonState,
    /// One-tick double-click on the back button
    pub back_double_click: bool,
    pub docked: bool,
    /// False when the device layer reports no stylus this tick
    pub active: bool,
}

impl Default for StylusState {
    fn default() -> Self {
        Self {
            pose: Pose::IDENTITY,
            tip_offset: Vec3::ZERO,
            tip_force: 0.0,
            middle_force: 0.0,
            front: ButtonState::default(),
            middle: ButtonState::default(),
            back: ButtonState::default(),
            back_double_click: false,
            docked: false,
            active: false,
        }
    }
}

impl StylusState {
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    pub fn rotation(&self) -> Quat {
        self.pose.rotation
    }

    /// World-space tip position, the origin for rays, ink and grabs
    pub fn tip_position(&self) -> Vec3 {
        self.pose.transform_point(self.tip_offset)
    }

    /// Unit pointing direction of the tip
    pub fn tip_forward(&self) -> Vec3 {
        self.pose.forward()
    }

    pub fn button(&self, button: StylusButton) -> ButtonState {
        match button {
            StylusButton::Front => self.front,
            StylusButton::Middle => self.middle,
            StylusButton::Back => self.back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_tip_position_follows_rotation() {
        let state = StylusState {
            pose: Pose::new(
                Vec3::new(1.0, 0.0, 0.0),
                Quat::from_axis_angle(Vec3::UP, FRAC_PI_2),
            ),
            tip_offset: Vec3::new(0.0, 0.0, 0.1),
            ..StylusState::default()
        };
        assert!(state
            .tip_position()
            .approx_eq(Vec3::new(1.1, 0.0, 0.0), 1e-5));
        assert!(state.tip_forward().approx_eq(Vec3::RIGHT, 1e-5));
    }

    #[test]
    fn test_button_lookup() {
        let state = StylusState {
            back: ButtonState {
                down: true,
                pressed: true,
                released: false,
            },
            ..StylusState::default()
        };
        assert!(state.button(StylusButton::Back).edge(Edge::Pressed));
        assert!(!state.button(StylusButton::Front).down);
    }
}
