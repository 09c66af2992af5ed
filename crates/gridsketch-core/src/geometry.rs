//! Small geometry helpers shared by the stroke builder and renderers.

use kurbo::{Point, Vec2};

/// Convert degrees to radians.
pub fn to_radians(degrees: f64) -> f64 {
    degrees * (std::f64::consts::PI / 180.0)
}

/// Convert radians to degrees.
pub fn to_degrees(radians: f64) -> f64 {
    radians * (180.0 / std::f64::consts::PI)
}

/// Component-wise `a - b`.
pub fn subtract(a: Point, b: Point) -> Vec2 {
    Vec2::new(a.x - b.x, a.y - b.y)
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Angle of the vector `to - from`, in radians, as returned by `atan2`.
pub fn bearing(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Offset of length `dist` along `angle` with the Y axis flipped.
///
/// Screen Y grows downwards, so a positive angle points up on screen.
/// Both segment placement and segment rendering go through this.
pub fn rotate(dist: f64, angle: f64) -> Vec2 {
    Vec2::new(dist * angle.cos(), -dist * angle.sin())
}
