//! Draw surface that records commands instead of drawing them.
//!
//! Useful for headless runs and for checking what a frame would draw.

use crate::renderer::DrawSurface;
use kurbo::{Line, Size};
use peniko::Color;

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { viewport: Size, background: Color },
    Line { line: Line, color: Color, width: f64 },
}

/// Records the commands of the most recent frame.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Lines recorded since the last clear, with their colors.
    pub fn lines(&self) -> impl Iterator<Item = (Line, Color)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Line { line, color, .. } => Some((*line, *color)),
            DrawCommand::Clear { .. } => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, viewport: Size, background: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { viewport, background });
    }

    fn line(&mut self, line: Line, color: Color, width: f64) {
        self.commands.push(DrawCommand::Line { line, color, width });
    }
}
