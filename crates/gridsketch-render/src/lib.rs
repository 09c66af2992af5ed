//! GridSketch Render Library
//!
//! Renderer abstraction and implementations for GridSketch.
//! The default implementation uses Vello for GPU-accelerated rendering.

mod recording;
mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::{
    DrawSurface, GridStyle, RenderContext, RenderResult, Renderer, RendererError, render_frame,
    render_grid, stroke_screen_lines,
};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
