//! Grid-unit line segment.

use crate::geometry::{rotate, to_radians};
use kurbo::{Line as KurboLine, Point};

/// Kind of drawable a segment represents.
///
/// Only straight lines exist today; `scale` on [`Segment`] is reserved for
/// kinds that are not unit-length lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SegmentKind {
    #[default]
    Line,
}

/// One unit-length line placed on the canvas.
///
/// The length is not stored: it is always the editor's unit size in world
/// space, whatever the zoom was when the segment was placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    /// World-space center.
    pub center: Point,
    /// Orientation about the center, in degrees. Measured with the Y axis
    /// pointing up, from the center towards the start point.
    pub rotation_degrees: f64,
    /// Rendering multiplier.
    pub scale: f64,
}

impl Segment {
    /// Create a line segment.
    pub fn line(center: Point, rotation_degrees: f64) -> Self {
        Self {
            kind: SegmentKind::Line,
            center,
            rotation_degrees,
            scale: 1.0,
        }
    }

    /// Endpoints of the segment for a given unit length.
    ///
    /// `p0` is the start (where the pencil anchor was when the segment was
    /// placed), `p1` the end in the direction of travel.
    pub fn endpoints(&self, unit_size: f64) -> KurboLine {
        let half = rotate(unit_size * self.scale / 2.0, to_radians(self.rotation_degrees));
        KurboLine::new(self.center + half, self.center - half)
    }

    /// Start point of the segment.
    pub fn start(&self, unit_size: f64) -> Point {
        self.endpoints(unit_size).p0
    }

    /// End point in the direction of travel.
    pub fn end(&self, unit_size: f64) -> Point {
        self.endpoints(unit_size).p1
    }
}
