//! Freehand ink capture

mod capture;
mod drawing;

pub use capture::{CaptureState, StrokeCaptureEngine};
pub use drawing::{Anchor, DrawingId, Stroke, WordDrawing};
