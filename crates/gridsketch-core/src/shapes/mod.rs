//! Drawable units: grid-unit segments and the strokes built from them.

mod segment;
mod stroke;

pub use segment::{Segment, SegmentKind};
pub use stroke::Stroke;
