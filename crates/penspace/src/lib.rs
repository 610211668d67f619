//! penspace: input core for a tracked 6-DOF stylus
//!
//! This crate turns raw per-frame stylus samples into interaction:
//! - Debounced buttons with hysteresis on the analog middle pad
//! - A tip pointer ray with manual widget hit testing on world-space panels
//! - Freehand strokes grouped into word drawings
//! - Anchoring of finished drawings and proximity grab/drag
//! - Keyboard simulation of the device for terminal development
//!
//! [`StylusRig`] ties the pieces together and is advanced once per frame.

pub mod anchor;
pub mod config;
pub mod context;
pub mod error;
pub mod grab;
pub mod haptics;
pub mod input;
pub mod pointer;
pub mod rig;
pub mod scene;
pub mod spatial;
pub mod stroke;
pub mod tasks;

// Re-export commonly used types
pub use anchor::WordAnchorManager;
pub use config::StylusConfig;
pub use context::{FrameClock, ModeContext};
pub use error::{ConfigError, DeviceError};
pub use grab::{GrabController, GrabSession};
pub use haptics::{HapticPulse, HapticSink, Haptics};
pub use input::{DeviceLayer, KeyboardStylus, RawStylusSample, StylusInputDriver, StylusState};
pub use pointer::{HitResult, PointerRaycaster, PointerTargets, Widget, WidgetRef};
pub use rig::StylusRig;
pub use scene::{ColliderId, Layer, LayerMask, PhysicsWorld, SimpleWorld};
pub use spatial::{Pose, Quat, Vec2, Vec3};
pub use stroke::{DrawingId, StrokeCaptureEngine, WordDrawing};
pub use tasks::{TaskId, TaskQueue};
