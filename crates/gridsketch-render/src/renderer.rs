//! Renderer trait abstraction and the per-frame pipeline.

use gridsketch_core::camera::Camera;
use gridsketch_core::canvas::Canvas;
use gridsketch_core::shapes::Stroke;
use kurbo::{Line, Point, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// No grid.
    None,
    /// Full grid lines.
    #[default]
    Lines,
}

impl GridStyle {
    /// Cycle to the next grid style.
    pub fn next(self) -> Self {
        match self {
            GridStyle::None => GridStyle::Lines,
            GridStyle::Lines => GridStyle::None,
        }
    }

    /// Get display name for this grid style.
    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "None",
            GridStyle::Lines => "Lines",
        }
    }
}

/// Immediate-mode 2D drawing backend.
///
/// Coordinates are in screen pixels; the pipeline applies the camera.
pub trait DrawSurface {
    /// Start a new frame, discarding everything drawn before.
    fn clear(&mut self, viewport: Size, background: Color);

    /// Stroke a straight line.
    fn line(&mut self, line: Line, color: Color, width: f64);
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Background color.
    pub background_color: Color,
    /// Grid display style.
    pub grid_style: GridStyle,
    /// Grid line color.
    pub grid_color: Color,
    /// Color used for every segment.
    pub stroke_color: Color,
    /// Segment line width in pixels.
    pub stroke_width: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas, viewport_size: Size) -> Self {
        Self {
            canvas,
            viewport_size,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            grid_style: GridStyle::Lines,
            grid_color: Color::from_rgba8(0x74, 0x74, 0x74, 255),
            stroke_color: Color::from_rgba8(0, 0, 0, 255),
            stroke_width: 1.0,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    /// Set the grid line color.
    pub fn with_grid_color(mut self, color: Color) -> Self {
        self.grid_color = color;
        self
    }

    /// Set the segment color.
    pub fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the draw commands for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);
}

impl<S: DrawSurface> Renderer for S {
    fn build_scene(&mut self, ctx: &RenderContext) {
        render_frame(self, ctx);
    }
}

/// Draw one frame: grid, inactive layers, current layer, stroke in progress.
pub fn render_frame<S: DrawSurface + ?Sized>(surface: &mut S, ctx: &RenderContext) {
    let canvas = ctx.canvas;
    let camera = &canvas.camera;
    let config = canvas.config();
    let unit_size = config.unit_size;

    surface.clear(ctx.viewport_size, ctx.background_color);

    if ctx.grid_style == GridStyle::Lines {
        render_grid(
            surface,
            camera,
            unit_size,
            (config.grid_width, config.grid_height),
            ctx.grid_color,
        );
    }

    let current = canvas.document.current_layer_index();
    let inactive = config.inactive_layer_opacity as f32;
    log::trace!(
        "frame: {} layers, {} strokes, zoom {:.2}",
        canvas.document.layers().len(),
        canvas.document.stroke_count(),
        camera.zoom
    );

    for (index, layer) in canvas.document.layers().iter().enumerate() {
        if index == current {
            continue;
        }
        for stroke in layer.strokes() {
            render_stroke(surface, stroke, camera, unit_size, ctx, inactive);
        }
    }

    for stroke in canvas.document.current_layer().strokes() {
        render_stroke(surface, stroke, camera, unit_size, ctx, 1.0);
    }

    if let Some(preview) = canvas.preview_stroke() {
        render_stroke(surface, preview, camera, unit_size, ctx, 1.0);
    }
}

/// Draw the fixed grid of `cells.0 × cells.1` unit squares at the camera's scale.
pub fn render_grid<S: DrawSurface + ?Sized>(
    surface: &mut S,
    camera: &Camera,
    unit_size: f64,
    cells: (u32, u32),
    color: Color,
) {
    let step = unit_size * camera.zoom;
    let origin = Point::new(camera.offset.x, camera.offset.y);
    let width = step * f64::from(cells.0);
    let height = step * f64::from(cells.1);

    // Horizontal lines
    for i in 0..=cells.1 {
        let y = origin.y + step * f64::from(i);
        surface.line(Line::new((origin.x, y), (origin.x + width, y)), color, 1.0);
    }

    // Vertical lines
    for i in 0..=cells.0 {
        let x = origin.x + step * f64::from(i);
        surface.line(Line::new((x, origin.y), (x, origin.y + height)), color, 1.0);
    }
}

/// Screen-space line for every segment of a stroke.
pub fn stroke_screen_lines<'s>(
    stroke: &'s Stroke,
    camera: &'s Camera,
    unit_size: f64,
) -> impl Iterator<Item = Line> + 's {
    let transform = camera.transform();
    stroke
        .iter()
        .map(move |segment| transform * segment.endpoints(unit_size))
}

fn render_stroke<S: DrawSurface + ?Sized>(
    surface: &mut S,
    stroke: &Stroke,
    camera: &Camera,
    unit_size: f64,
    ctx: &RenderContext,
    opacity: f32,
) {
    let color = ctx.stroke_color.multiply_alpha(opacity);
    for line in stroke_screen_lines(stroke, camera, unit_size) {
        surface.line(line, color, ctx.stroke_width);
    }
}
