//! Camera module for pan/zoom transforms.

use crate::config::EditorConfig;
use kurbo::{Affine, Point, Size, Vec2};

/// Camera manages the view transform for the canvas.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between screen coordinates and world coordinates, and keeps
/// the fixed-size grid from sliding out of view.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Current zoom level (1.0 = one world unit per pixel).
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level, if any.
    pub max_zoom: Option<f64>,
    /// Wheel delta that changes zoom by 1.0.
    zoom_divisor: f64,
    /// Size of the whole grid in world units.
    grid_extent: Size,
    /// Allowed drift of the grid past the viewport edge, in pixels.
    margin: f64,
    /// Viewport size in pixels.
    viewport: Size,
    /// Offset restored by [`Camera::reset`].
    home: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera for the given editor configuration.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            offset: config.initial_offset,
            zoom: 1.0,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_divisor: config.zoom_divisor,
            grid_extent: Size::new(
                config.unit_size * f64::from(config.grid_width),
                config.unit_size * f64::from(config.grid_height),
            ),
            margin: config.camera_margin,
            viewport: Size::new(800.0, 600.0),
            home: config.initial_offset,
        }
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Current viewport size in pixels.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Update the viewport size and re-clamp the offset.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.clamp_to_grid();
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
        self.clamp_to_grid();
    }

    /// Adjust zoom by a raw wheel delta.
    ///
    /// Zoom is not anchored at the pointer; the grid scales about the
    /// camera offset.
    pub fn apply_zoom_delta(&mut self, delta: f64) {
        let mut zoom = self.zoom + delta / self.zoom_divisor;
        if let Some(max) = self.max_zoom {
            zoom = zoom.min(max);
        }
        self.zoom = zoom.max(self.min_zoom);
        self.clamp_to_grid();
    }

    /// Keep the grid from sliding entirely off the viewport.
    ///
    /// The near edge may not move further than `margin` pixels into the
    /// viewport; the far edge may not move further than `margin` pixels
    /// inside the opposite viewport edge. When both rules conflict (grid
    /// smaller than the viewport) the far-edge rule wins.
    pub fn clamp_to_grid(&mut self) {
        let scaled = Size::new(self.grid_extent.width * self.zoom, self.grid_extent.height * self.zoom);

        if self.offset.x > self.margin {
            self.offset.x = self.margin;
        }
        if self.offset.y > self.margin {
            self.offset.y = self.margin;
        }

        let min_x = -scaled.width + self.viewport.width - self.margin;
        let min_y = -scaled.height + self.viewport.height - self.margin;
        if self.offset.x < min_x {
            self.offset.x = min_x;
        }
        if self.offset.y < min_y {
            self.offset.y = min_y;
        }
    }

    /// Reset camera to its initial position and zoom.
    pub fn reset(&mut self) {
        self.offset = self.home;
        self.zoom = 1.0;
        self.clamp_to_grid();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(offset: Vec2, zoom: f64) -> Camera {
        let mut camera = Camera::new();
        camera.offset = offset;
        camera.zoom = zoom;
        camera
    }

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::new(100.0, 100.0));
        assert!((camera.zoom - 1.0).abs() < f64::EPSILON);
        assert!((camera.min_zoom - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_offset() {
        let camera = camera_at(Vec2::new(50.0, 100.0), 1.0);
        let world = camera.screen_to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_zoom() {
        let camera = camera_at(Vec2::new(100.0, 100.0), 2.0);
        let world = camera.screen_to_world(Point::new(300.0, 500.0));
        assert!((world.x - 100.0).abs() < 1e-12);
        assert!((world.y - 200.0).abs() < 1e-12);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let camera = camera_at(Vec2::new(30.0, -20.0), 1.5);

        for original in [Point::new(123.0, 456.0), Point::new(-7.5, 0.25), Point::ZERO] {
            let world = camera.screen_to_world(original);
            let back = camera.world_to_screen(world);
            assert!((back.x - original.x).abs() < 1e-10);
            assert!((back.y - original.y).abs() < 1e-10);
        }
    }

    #[test]
    fn test_zoom_floor() {
        let mut camera = Camera::new();
        for _ in 0..50 {
            camera.apply_zoom_delta(-120.0);
            assert!(camera.zoom >= 0.4);
        }
        assert!((camera.zoom - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_delta_scale() {
        let mut camera = Camera::new();
        camera.apply_zoom_delta(150.0);
        assert!((camera.zoom - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_unbounded_by_default() {
        let mut camera = Camera::new();
        for _ in 0..10 {
            camera.apply_zoom_delta(300.0);
        }
        assert!((camera.zoom - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_ceiling_when_configured() {
        let config = EditorConfig::default().with_max_zoom(Some(3.0));
        let mut camera = Camera::from_config(&config);
        for _ in 0..10 {
            camera.apply_zoom_delta(300.0);
        }
        assert!((camera.zoom - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan_clamps_near_edge() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        assert!((camera.offset.x - 110.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 120.0).abs() < f64::EPSILON);

        camera.pan(Vec2::new(500.0, 500.0));
        assert!((camera.offset.x - 200.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan_clamps_far_edge() {
        let mut camera = Camera::new();
        camera.set_viewport(Size::new(800.0, 600.0));
        camera.pan(Vec2::new(-100_000.0, -100_000.0));
        // 85 cells * 30 units = 2550
        assert!((camera.offset.x - (-2550.0 + 800.0 - 200.0)).abs() < 1e-9);
        assert!((camera.offset.y - (-2550.0 + 600.0 - 200.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_reclamps() {
        let mut camera = Camera::new();
        camera.set_viewport(Size::new(800.0, 600.0));
        camera.pan(Vec2::new(-100_000.0, 0.0));
        camera.apply_zoom_delta(-180.0);
        let min_x = -(30.0 * camera.zoom * 85.0) + 800.0 - 200.0;
        assert!(camera.offset.x >= min_x - 1e-9);
    }

    #[test]
    fn test_reset() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(-300.0, -300.0));
        camera.apply_zoom_delta(90.0);
        camera.reset();
        assert_eq!(camera.offset, Vec2::new(100.0, 100.0));
        assert!((camera.zoom - 1.0).abs() < f64::EPSILON);
    }
}
