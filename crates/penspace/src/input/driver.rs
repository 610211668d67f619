//! Turns raw device samples into a debounced [`StylusState`]

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::InputConfig;
use crate::haptics::Haptics;
use crate::spatial::Pose;

use super::{
    DeviceLayer, DigitalButton, DoubleClickDetector, HysteresisButton, RawStylusSample,
    StylusState,
};

/// Last value seen on every channel
#[derive(Debug, Clone, Copy, Default)]
struct HeldChannels {
    pose: Pose,
    tip_force: f32,
    middle_force: f32,
    front: bool,
    back: bool,
    docked: bool,
}

impl HeldChannels {
    fn merge(&mut self, sample: &RawStylusSample) {
        if let Some(pose) = sample.pose {
            self.pose = pose;
        }
        if let Some(force) = sample.tip_force {
            self.tip_force = force.max(0.0);
        }
        if let Some(force) = sample.middle_force {
            self.middle_force = force.max(0.0);
        }
        if let Some(front) = sample.front {
            self.front = front;
        }
        if let Some(back) = sample.back {
            self.back = back;
        }
        if let Some(docked) = sample.docked {
            self.docked = docked;
        }
    }
}

/// Polls the device layer once per tick
///
/// Never fails: device errors and inactive ticks produce a state with every
/// button up and the pose held at its last known value.
#[derive(Debug)]
pub struct StylusInputDriver {
    state: StylusState,
    held: HeldChannels,
    front: DigitalButton,
    back: DigitalButton,
    middle: HysteresisButton,
    double_click: DoubleClickDetector,
    device_faulted: bool,
    channels_missing: bool,
}

impl StylusInputDriver {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            state: StylusState {
                tip_offset: config.tip_offset,
                ..StylusState::default()
            },
            held: HeldChannels::default(),
            front: DigitalButton::new(),
            back: DigitalButton::new(),
            middle: HysteresisButton::new(
                config.middle_press_threshold,
                config.middle_release_threshold,
            ),
            double_click: DoubleClickDetector::new(config.double_click_window()),
            device_faulted: false,
            channels_missing: false,
        }
    }

    /// Read one sample and overwrite the current state
    pub fn update(
        &mut self,
        device: &mut dyn DeviceLayer,
        now: Duration,
        haptics: &mut Haptics,
    ) -> &StylusState {
        let sample = match device.sample() {
            Ok(sample) => {
                if self.device_faulted {
                    info!("Stylus device recovered");
                    self.device_faulted = false;
                }
                sample
            }
            Err(e) => {
                if !self.device_faulted {
                    warn!("Stylus device fault, treating as inactive: {}", e);
                    self.device_faulted = true;
                }
                RawStylusSample::inactive()
            }
        };

        if sample.active {
            self.apply_active(&sample);
        } else {
            self.apply_inactive();
        }

        self.state.back_double_click = self.double_click.update(self.state.back.pressed, now);
        if self.state.back_double_click {
            debug!("Back button double-click");
            haptics.click();
        }

        &self.state
    }

    fn apply_active(&mut self, sample: &RawStylusSample) {
        if !self.state.active {
            info!("Stylus active");
        }

        let complete = sample.is_complete();
        if !complete && !self.channels_missing {
            warn!("Stylus sample missing channels, holding last known values");
        }
        self.channels_missing = !complete;
        self.held.merge(sample);

        let held = self.held;
        self.state.active = true;
        self.state.pose = held.pose;
        self.state.tip_force = held.tip_force;
        self.state.middle_force = held.middle_force;
        self.state.docked = held.docked;
        self.state.front = self.front.update(held.front);
        self.state.back = self.back.update(held.back);
        self.state.middle = self.middle.update(held.middle_force);
    }

    fn apply_inactive(&mut self) {
        if self.state.active {
            info!("Stylus inactive");
        }
        self.state.active = false;
        self.state.tip_force = 0.0;
        self.state.middle_force = 0.0;
        // Buttons read as up; a button held when tracking dropped reports its
        // release edge this tick.
        self.state.front = self.front.update(false);
        self.state.back = self.back.update(false);
        self.state.middle = self.middle.update(0.0);
        self.held.front = false;
        self.held.back = false;
        self.held.middle_force = 0.0;
    }

    pub fn state(&self) -> &StylusState {
        &self.state
    }

    pub fn is_device_faulted(&self) -> bool {
        self.device_faulted
    }
}
