//! Vello-based renderer implementation.

use crate::renderer::DrawSurface;
use kurbo::{Affine, Line, Size, Stroke};
use peniko::Color;
use vello::Scene;

/// Vello-based draw surface for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Background of the current frame, applied as the render base color.
    background: Color,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new renderer with an empty scene.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            background: Color::from_rgba8(255, 255, 255, 255),
        }
    }

    /// Get the built scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take the built scene, leaving an empty one.
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Background color of the last frame.
    pub fn background(&self) -> Color {
        self.background
    }
}

impl DrawSurface for VelloRenderer {
    fn clear(&mut self, _viewport: Size, background: Color) {
        self.scene.reset();
        self.background = background;
    }

    fn line(&mut self, line: Line, color: Color, width: f64) {
        let stroke = Stroke::new(width);
        self.scene.stroke(&stroke, Affine::IDENTITY, color, None, &line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{RenderContext, Renderer};
    use gridsketch_core::canvas::Canvas;

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_records_frame() {
        let mut renderer = VelloRenderer::new();
        let canvas = Canvas::new();
        let background = Color::from_rgba8(20, 30, 40, 255);
        let ctx = RenderContext::new(&canvas, Size::new(800.0, 600.0)).with_background(background);

        renderer.build_scene(&ctx);
        assert!(!renderer.scene().encoding().is_empty());
        assert_eq!(renderer.background(), background);

        let _ = renderer.take_scene();
        assert!(renderer.scene().encoding().is_empty());
    }
}
