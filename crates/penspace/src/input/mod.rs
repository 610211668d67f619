//! Stylus input
//!
//! Raw device channels come in through [`DeviceLayer`]; the
//! [`StylusInputDriver`] debounces them into one [`StylusState`] per tick:
//! - Digital edges for the front and back buttons
//! - Two-threshold hysteresis for the analog middle pad
//! - Back-button double-click
//! - Keyboard simulation for terminal development

mod button;
mod device;
mod double_click;
mod driver;
mod simulator;
mod state;

pub use button::{DigitalButton, HysteresisButton};
pub use device::{DeviceLayer, RawStylusSample, ScriptedDevice};
pub use double_click::DoubleClickDetector;
pub use driver::StylusInputDriver;
pub use simulator::KeyboardStylus;
pub use state::{ButtonState, Edge, StylusButton, StylusState};
