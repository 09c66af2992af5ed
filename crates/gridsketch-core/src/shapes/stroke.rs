//! Stroke: the run of segments produced by one pencil gesture.

use super::Segment;

/// An ordered run of segments. Insertion order is drawing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    segments: Vec<Segment>,
}

impl Stroke {
    /// Create a new empty stroke.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from existing segments.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Append a segment.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Remove every segment.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Get the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the stroke has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments in drawing order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Iterate over segments in drawing order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

impl<'a> IntoIterator for &'a Stroke {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_stroke_creation() {
        let stroke = Stroke::new();
        assert!(stroke.is_empty());
    }

    #[test]
    fn test_push_and_clear() {
        let mut stroke = Stroke::new();
        stroke.push(Segment::line(Point::new(15.0, 0.0), 0.0));
        stroke.push(Segment::line(Point::new(45.0, 0.0), 0.0));
        assert_eq!(stroke.len(), 2);
        stroke.clear();
        assert!(stroke.is_empty());
    }
}
