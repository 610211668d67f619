//! Stylus configuration
//!
//! Every section carries `#[serde(default)]`, so a TOML file only needs the
//! values it changes:
//!
//! ```toml
//! [input]
//! middle_press_threshold = 0.03
//!
//! [grab]
//! search_radius = 0.1
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::haptics::HapticPulse;
use crate::input::{Edge, StylusButton};
use crate::scene::{Layer, LayerMask};
use crate::spatial::{Pose, Vec3};

/// Top-level configuration for a [`StylusRig`](crate::rig::StylusRig)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct StylusConfig {
    pub input: InputConfig,
    pub haptics: HapticsConfig,
    pub pointer: PointerConfig,
    pub drawing: DrawingConfig,
    pub anchor: AnchorConfig,
    pub grab: GrabConfig,
    pub bindings: GestureBindings,
}

/// Raw channel processing
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Middle force above which a released middle button becomes pressed
    pub middle_press_threshold: f32,
    /// Middle force at or below which a pressed middle button releases
    pub middle_release_threshold: f32,
    /// Maximum gap between two back presses that counts as a double-click
    pub double_click_window_ms: u64,
    /// Tip position in the stylus' local frame
    pub tip_offset: Vec3,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            middle_press_threshold: 0.02,
            middle_release_threshold: 0.01,
            double_click_window_ms: 350,
            tip_offset: Vec3::ZERO,
        }
    }
}

impl InputConfig {
    pub fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.double_click_window_ms)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HapticsConfig {
    pub click_amplitude: f32,
    pub click_duration_secs: f32,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self {
            click_amplitude: 1.0,
            click_duration_secs: 0.011,
        }
    }
}

impl HapticsConfig {
    /// The short pulse used for clicks, grabs and finalize confirmation
    pub fn click(&self) -> HapticPulse {
        HapticPulse::new(self.click_amplitude, self.click_duration_secs)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PointerConfig {
    /// Ray length in meters
    pub max_distance: f32,
    /// Layer bitmask the ray is cast against; `None` hits every layer
    pub collision_mask: Option<u32>,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            max_distance: 5.0,
            collision_mask: None,
        }
    }
}

impl PointerConfig {
    pub fn mask(&self) -> LayerMask {
        self.collision_mask.map(LayerMask).unwrap_or(LayerMask::ALL)
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DrawingConfig {
    /// Whether drawing starts enabled
    pub enabled_on_start: bool,
    /// Root position for new drawings
    pub root_position: Vec3,
}

impl DrawingConfig {
    pub fn root_pose(&self) -> Pose {
        Pose::from_position(self.root_position)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnchorConfig {
    /// Height of the anchor above the centre of the ink
    pub vertical_offset: f32,
    /// Radius of the anchor's selection sphere
    pub selection_radius: f32,
    /// Layer the selection sphere is placed on. When unset anchors go on the
    /// default layer and grab searches every layer.
    pub layer: Option<u8>,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            vertical_offset: 0.02,
            selection_radius: 0.03,
            layer: None,
        }
    }
}

impl AnchorConfig {
    pub fn layer(&self) -> Layer {
        self.layer.map(Layer).unwrap_or(Layer::DEFAULT)
    }

    /// Mask used by the grab search
    pub fn search_mask(&self) -> LayerMask {
        self.layer.map(|l| Layer(l).mask()).unwrap_or(LayerMask::ALL)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GrabConfig {
    /// Radius of the sphere query around the tip
    pub search_radius: f32,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            search_radius: 0.08,
        }
    }
}

/// A button plus the edge that fires an action
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct EdgeBinding {
    pub button: StylusButton,
    pub edge: Edge,
}

impl EdgeBinding {
    pub const fn new(button: StylusButton, edge: Edge) -> Self {
        Self { button, edge }
    }
}

/// Which physical buttons drive each gesture
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureBindings {
    /// Held to draw a stroke
    pub draw: StylusButton,
    /// Held to drag an anchored drawing
    pub grab: StylusButton,
    /// Finalizes the pending drawing while drawing is enabled
    pub finalize: EdgeBinding,
    /// Activates the hovered widget
    pub click: EdgeBinding,
}

impl Default for GestureBindings {
    fn default() -> Self {
        Self {
            draw: StylusButton::Middle,
            grab: StylusButton::Middle,
            finalize: EdgeBinding::new(StylusButton::Back, Edge::Pressed),
            click: EdgeBinding::new(StylusButton::Front, Edge::Released),
        }
    }
}

impl StylusConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: StylusConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded stylus config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Per-user config location, e.g. `~/.config/penspace/stylus.toml`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "penspace", "penspace")
            .map(|dirs| dirs.config_dir().join("stylus.toml"))
    }

    /// Load the per-user config when it exists, defaults otherwise
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.check_finite()?;

        let input = &self.input;
        if input.middle_release_threshold < 0.0 {
            return Err(ConfigError::Invalid(
                "input.middle_release_threshold must not be negative".to_string(),
            ));
        }
        if input.middle_press_threshold <= input.middle_release_threshold {
            return Err(ConfigError::Invalid(format!(
                "input.middle_press_threshold ({}) must be greater than input.middle_release_threshold ({})",
                input.middle_press_threshold, input.middle_release_threshold
            )));
        }
        if self.haptics.click_amplitude < 0.0 || self.haptics.click_duration_secs < 0.0 {
            return Err(ConfigError::Invalid(
                "haptics amplitude and duration must not be negative".to_string(),
            ));
        }
        if self.pointer.max_distance <= 0.0 {
            return Err(ConfigError::Invalid(
                "pointer.max_distance must be positive".to_string(),
            ));
        }
        if self.anchor.selection_radius <= 0.0 {
            return Err(ConfigError::Invalid(
                "anchor.selection_radius must be positive".to_string(),
            ));
        }
        if self.anchor.vertical_offset < 0.0 {
            return Err(ConfigError::Invalid(
                "anchor.vertical_offset must not be negative".to_string(),
            ));
        }
        if self.anchor.layer.is_some_and(|l| l >= 32) {
            return Err(ConfigError::Invalid(
                "anchor.layer must be below 32".to_string(),
            ));
        }
        if self.grab.search_radius <= 0.0 {
            return Err(ConfigError::Invalid(
                "grab.search_radius must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn check_finite(&self) -> Result<()> {
        let input = &self.input;
        let offset = input.tip_offset;
        let root = self.drawing.root_position;
        let fields = [
            ("input.middle_press_threshold", input.middle_press_threshold),
            ("input.middle_release_threshold", input.middle_release_threshold),
            ("input.tip_offset.x", offset.x),
            ("input.tip_offset.y", offset.y),
            ("input.tip_offset.z", offset.z),
            ("haptics.click_amplitude", self.haptics.click_amplitude),
            ("haptics.click_duration_secs", self.haptics.click_duration_secs),
            ("pointer.max_distance", self.pointer.max_distance),
            ("drawing.root_position.x", root.x),
            ("drawing.root_position.y", root.y),
            ("drawing.root_position.z", root.z),
            ("anchor.vertical_offset", self.anchor.vertical_offset),
            ("anchor.selection_radius", self.anchor.selection_radius),
            ("grab.search_radius", self.grab.search_radius),
        ];
        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(ConfigError::Invalid(format!(
                "{} must be a finite number, got {}",
                name, value
            ))),
            None => Ok(()),
        }
    }
}
