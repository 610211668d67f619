//! Device layer contract

use crate::error::DeviceError;
use crate::spatial::Pose;

/// Raw channels read from the stylus for one tick
///
/// A `None` channel means the runtime did not report it this tick; the driver
/// holds its last known value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawStylusSample {
    /// Whether a stylus is present and tracked
    pub active: bool,
    pub pose: Option<Pose>,
    pub tip_force: Option<f32>,
    pub middle_force: Option<f32>,
    pub front: Option<bool>,
    pub back: Option<bool>,
    pub docked: Option<bool>,
}

impl RawStylusSample {
    /// A fully populated, active sample
    pub fn tracked(pose: Pose) -> Self {
        Self {
            active: true,
            pose: Some(pose),
            tip_force: Some(0.0),
            middle_force: Some(0.0),
            front: Some(false),
            back: Some(false),
            docked: Some(false),
        }
    }

    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn with_middle_force(mut self, force: f32) -> Self {
        self.middle_force = Some(force);
        self
    }

    pub fn with_tip_force(mut self, force: f32) -> Self {
        self.tip_force = Some(force);
        self
    }

    pub fn with_front(mut self, down: bool) -> Self {
        self.front = Some(down);
        self
    }

    pub fn with_back(mut self, down: bool) -> Self {
        self.back = Some(down);
        self
    }

    /// True when every channel was reported
    pub fn is_complete(&self) -> bool {
        self.pose.is_some()
            && self.tip_force.is_some()
            && self.middle_force.is_some()
            && self.front.is_some()
            && self.back.is_some()
            && self.docked.is_some()
    }
}

/// Source of raw stylus samples, polled once per tick
pub trait DeviceLayer {
    fn sample(&mut self) -> Result<RawStylusSample, DeviceError>;
}

impl<D: DeviceLayer + ?Sized> DeviceLayer for &mut D {
    fn sample(&mut self) -> Result<RawStylusSample, DeviceError> {
        (**self).sample()
    }
}

/// Device that replays a fixed list of samples, then reports disconnected
#[derive(Debug, Clone, Default)]
pub struct ScriptedDevice {
    samples: std::collections::VecDeque<Result<RawStylusSample, DeviceError>>,
}

impl ScriptedDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: RawStylusSample) -> &mut Self {
        self.samples.push_back(Ok(sample));
        self
    }

    pub fn push_error(&mut self, error: DeviceError) -> &mut Self {
        self.samples.push_back(Err(error));
        self
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl DeviceLayer for ScriptedDevice {
    fn sample(&mut self) -> Result<RawStylusSample, DeviceError> {
        self.samples
            .pop_front()
            .unwrap_or(Err(DeviceError::Disconnected))
    }
}
