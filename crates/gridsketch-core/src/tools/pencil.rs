//! Pencil tool: turns a drag into a run of unit-length segments.

use super::Tool;
use crate::geometry::{bearing, distance, rotate, to_degrees};
use crate::shapes::{Segment, Stroke};
use kurbo::Point;

/// State of a pencil interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum PencilState {
    /// Waiting for a gesture to start.
    #[default]
    Idle,
    /// A gesture is in progress.
    Drawing {
        /// Where the next segment starts, in world coordinates.
        anchor: Point,
    },
}

/// The stroke builder behind the pencil tool.
///
/// The drag path is re-sampled at a fixed arc length of one grid unit, so
/// every segment is exactly one unit long and the end of each segment is
/// the start of the next, however far the pointer jumps between samples.
#[derive(Debug, Clone)]
pub struct PencilTool {
    unit_size: f64,
    state: PencilState,
    /// Segments placed during the current gesture.
    stroke: Stroke,
}

impl PencilTool {
    /// Create a pencil placing segments of `unit_size` world units.
    pub fn new(unit_size: f64) -> Self {
        Self {
            unit_size,
            state: PencilState::Idle,
            stroke: Stroke::new(),
        }
    }

    /// Current anchor, if drawing.
    pub fn anchor(&self) -> Option<Point> {
        match self.state {
            PencilState::Drawing { anchor } => Some(anchor),
            PencilState::Idle => None,
        }
    }

    /// Place as many whole units as fit between the anchor and `current`.
    ///
    /// Returns the number of segments placed.
    fn place_segments(&mut self, anchor: &mut Point, current: Point) -> usize {
        let unit = self.unit_size;
        let mut placed = 0;

        // `while`, not `if`: a fast drag may cover several units in one sample.
        while distance(*anchor, current) >= unit {
            let angle = -bearing(current, *anchor);
            let mid = rotate(-unit / 2.0, angle);
            let far = rotate(-unit, angle);

            self.stroke.push(Segment::line(*anchor + mid, to_degrees(angle)));
            *anchor += far;
            placed += 1;
        }

        placed
    }
}

impl Tool for PencilTool {
    fn on_start(&mut self, point: Point) {
        self.stroke.clear();
        self.state = PencilState::Drawing { anchor: point };
        log::debug!("pencil gesture started at ({:.1}, {:.1})", point.x, point.y);
    }

    fn on_move(&mut self, point: Point) -> usize {
        let PencilState::Drawing { mut anchor } = self.state else {
            return 0;
        };
        let placed = self.place_segments(&mut anchor, point);
        self.state = PencilState::Drawing { anchor };
        placed
    }

    fn on_end(&mut self) -> Option<Stroke> {
        if self.state == PencilState::Idle {
            return None;
        }
        self.state = PencilState::Idle;

        let stroke = std::mem::take(&mut self.stroke);
        if stroke.is_empty() {
            log::debug!("pencil gesture ended without segments");
            None
        } else {
            log::debug!("pencil gesture ended with {} segments", stroke.len());
            Some(stroke)
        }
    }

    fn cancel(&mut self) {
        self.state = PencilState::Idle;
        self.stroke.clear();
    }

    fn suspend(&mut self) {
        self.state = PencilState::Idle;
    }

    fn is_active(&self) -> bool {
        matches!(self.state, PencilState::Drawing { .. })
    }

    fn in_progress(&self) -> &Stroke {
        &self.stroke
    }

    fn discard_in_progress(&mut self) -> bool {
        if self.stroke.is_empty() {
            return false;
        }
        self.stroke.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: f64 = 30.0;
    const EPS: f64 = 1e-9;

    fn drag(points: &[Point]) -> PencilTool {
        let mut pencil = PencilTool::new(UNIT);
        pencil.on_start(points[0]);
        for &p in &points[1..] {
            pencil.on_move(p);
        }
        pencil
    }

    #[test]
    fn test_idle_ignores_moves() {
        let mut pencil = PencilTool::new(UNIT);
        assert_eq!(pencil.on_move(Point::new(500.0, 0.0)), 0);
        assert!(pencil.in_progress().is_empty());
        assert!(pencil.on_end().is_none());
    }

    #[test]
    fn test_fast_motion_leaves_no_gap() {
        let mut pencil = PencilTool::new(UNIT);
        pencil.on_start(Point::new(0.0, 0.0));
        let placed = pencil.on_move(Point::new(0.0, 300.0));
        assert_eq!(placed, 10);
        assert_eq!(pencil.in_progress().len(), 10);
    }

    #[test]
    fn test_partial_unit_carries_over() {
        let mut pencil = PencilTool::new(UNIT);
        pencil.on_start(Point::ZERO);
        assert_eq!(pencil.on_move(Point::new(100.0, 0.0)), 3);
        let anchor = pencil.anchor().unwrap();
        assert!((anchor.x - 90.0).abs() < EPS);
        assert!(anchor.y.abs() < EPS);

        // 10 units left over + 25 more reaches the next unit.
        assert_eq!(pencil.on_move(Point::new(115.0, 0.0)), 0);
        assert_eq!(pencil.on_move(Point::new(125.0, 0.0)), 1);
    }

    #[test]
    fn test_segment_length_invariant() {
        let pencil = drag(&[
            Point::new(10.0, 10.0),
            Point::new(80.0, 45.0),
            Point::new(200.0, -13.0),
            Point::new(-50.0, 170.0),
            Point::new(-51.0, 171.0),
        ]);
        assert!(!pencil.in_progress().is_empty());
        for segment in pencil.in_progress() {
            let line = segment.endpoints(UNIT);
            let len = ((line.p1.x - line.p0.x).powi(2) + (line.p1.y - line.p0.y).powi(2)).sqrt();
            assert!((len - UNIT).abs() < EPS);
        }
    }

    #[test]
    fn test_stroke_continuity() {
        let start = Point::new(5.0, 5.0);
        let pencil = drag(&[
            start,
            Point::new(95.0, 40.0),
            Point::new(160.0, 160.0),
            Point::new(20.0, 240.0),
        ]);
        let segments = pencil.in_progress().segments();
        assert!(segments.len() > 3);

        let first = segments[0].start(UNIT);
        assert!((first.x - start.x).abs() < EPS);
        assert!((first.y - start.y).abs() < EPS);

        for pair in segments.windows(2) {
            let end = pair[0].end(UNIT);
            let next_start = pair[1].start(UNIT);
            assert!((end.x - next_start.x).abs() < EPS);
            assert!((end.y - next_start.y).abs() < EPS);
        }
    }

    #[test]
    fn test_segments_follow_direction_of_travel() {
        let pencil = drag(&[Point::ZERO, Point::new(0.0, 65.0)]);
        let segments = pencil.in_progress().segments();
        assert_eq!(segments.len(), 2);
        assert!((segments[0].center.y - 15.0).abs() < EPS);
        assert!((segments[1].center.y - 45.0).abs() < EPS);
        assert!(segments[1].end(UNIT).y > segments[1].start(UNIT).y);
    }

    #[test]
    fn test_empty_gesture_is_discarded() {
        let mut pencil = drag(&[Point::ZERO, Point::new(10.0, 10.0), Point::new(-5.0, 20.0)]);
        assert!(pencil.on_end().is_none());
        assert!(!pencil.is_active());
    }

    #[test]
    fn test_end_returns_stroke_and_resets() {
        let mut pencil = drag(&[Point::ZERO, Point::new(61.0, 0.0)]);
        let stroke = pencil.on_end().unwrap();
        assert_eq!(stroke.len(), 2);
        assert!(pencil.in_progress().is_empty());
        assert!(pencil.anchor().is_none());
    }

    #[test]
    fn test_start_clears_previous_stroke() {
        let mut pencil = drag(&[Point::ZERO, Point::new(61.0, 0.0)]);
        pencil.suspend();
        assert_eq!(pencil.in_progress().len(), 2);
        pencil.on_start(Point::new(300.0, 300.0));
        assert!(pencil.in_progress().is_empty());
    }

    #[test]
    fn test_discard_keeps_gesture_alive() {
        let mut pencil = drag(&[Point::ZERO, Point::new(61.0, 0.0)]);
        assert!(pencil.discard_in_progress());
        assert!(pencil.is_active());
        assert!(!pencil.discard_in_progress());

        pencil.on_move(Point::new(100.0, 0.0));
        assert_eq!(pencil.in_progress().len(), 1);
    }
}
