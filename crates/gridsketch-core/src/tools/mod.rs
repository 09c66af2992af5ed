//! Tool system for the grid editor.

mod pencil;

pub use pencil::PencilTool;

use crate::shapes::Stroke;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Pencil,
}

impl ToolKind {
    /// Identifier used by tool-select commands.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pencil => "pencil",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown tool identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown tool: {0:?}")]
pub struct ParseToolError(pub String);

impl FromStr for ToolKind {
    type Err = ParseToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pencil" => Ok(ToolKind::Pencil),
            other => Err(ParseToolError(other.to_string())),
        }
    }
}

/// Capabilities every tool provides to the canvas.
///
/// Points are in world coordinates.
pub trait Tool {
    /// Begin a gesture.
    fn on_start(&mut self, point: Point);

    /// Feed a pointer sample. Returns the number of segments placed.
    fn on_move(&mut self, point: Point) -> usize;

    /// Finish the gesture, returning the stroke to commit if it is non-empty.
    fn on_end(&mut self) -> Option<Stroke>;

    /// Abort the gesture and drop anything placed.
    fn cancel(&mut self);

    /// Stop reacting to motion but keep placed segments visible.
    fn suspend(&mut self);

    /// Whether a gesture is in progress.
    fn is_active(&self) -> bool;

    /// Segments placed so far in the current (or suspended) gesture.
    fn in_progress(&self) -> &Stroke;

    /// Drop placed segments without ending the gesture.
    /// Returns `false` if there was nothing to drop.
    fn discard_in_progress(&mut self) -> bool;
}

/// Manages the current tool and its state.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool, if any.
    current_tool: Option<ToolKind>,
    pencil: PencilTool,
}

impl ToolManager {
    /// Create a new tool manager with no tool selected.
    pub fn new(unit_size: f64) -> Self {
        Self {
            current_tool: None,
            pencil: PencilTool::new(unit_size),
        }
    }

    /// Currently selected tool.
    pub fn current_tool(&self) -> Option<ToolKind> {
        self.current_tool
    }

    /// Toggle a tool: selecting the active tool deselects it.
    ///
    /// Any gesture in progress is cancelled.
    pub fn toggle(&mut self, tool: ToolKind) -> Option<ToolKind> {
        self.cancel();
        self.current_tool = if self.current_tool == Some(tool) {
            None
        } else {
            Some(tool)
        };
        self.current_tool
    }

    /// The selected tool's behaviour.
    pub fn active_mut(&mut self) -> Option<&mut dyn Tool> {
        match self.current_tool? {
            ToolKind::Pencil => Some(&mut self.pencil),
        }
    }

    /// The selected tool's behaviour.
    pub fn active(&self) -> Option<&dyn Tool> {
        match self.current_tool? {
            ToolKind::Pencil => Some(&self.pencil),
        }
    }

    /// Begin a tool interaction.
    pub fn begin(&mut self, point: Point) -> bool {
        match self.active_mut() {
            Some(tool) => {
                tool.on_start(point);
                true
            }
            None => false,
        }
    }

    /// Update the current interaction.
    pub fn update(&mut self, point: Point) -> usize {
        self.active_mut().map_or(0, |tool| tool.on_move(point))
    }

    /// End the current interaction and return any stroke to commit.
    pub fn end(&mut self) -> Option<Stroke> {
        self.active_mut().and_then(|tool| tool.on_end())
    }

    /// Cancel the current interaction.
    pub fn cancel(&mut self) {
        if let Some(tool) = self.active_mut() {
            tool.cancel();
        }
    }

    /// Check if a tool interaction is active.
    pub fn is_active(&self) -> bool {
        self.active().is_some_and(|tool| tool.is_active())
    }

    /// Stroke being drawn, if any segments have been placed.
    pub fn preview_stroke(&self) -> Option<&Stroke> {
        self.active()
            .map(|tool| tool.in_progress())
            .filter(|stroke| !stroke.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_parsing() {
        assert_eq!("pencil".parse::<ToolKind>(), Ok(ToolKind::Pencil));
        assert_eq!(
            "eraser".parse::<ToolKind>(),
            Err(ParseToolError("eraser".to_string()))
        );
        assert_eq!(ToolKind::Pencil.to_string(), "pencil");
    }

    #[test]
    fn test_tool_toggle() {
        let mut tm = ToolManager::new(30.0);
        assert_eq!(tm.current_tool(), None);

        assert_eq!(tm.toggle(ToolKind::Pencil), Some(ToolKind::Pencil));
        assert_eq!(tm.toggle(ToolKind::Pencil), None);
    }

    #[test]
    fn test_no_tool_is_noop() {
        let mut tm = ToolManager::new(30.0);
        assert!(!tm.begin(Point::ZERO));
        assert_eq!(tm.update(Point::new(300.0, 0.0)), 0);
        assert!(tm.end().is_none());
        assert!(tm.preview_stroke().is_none());
    }

    #[test]
    fn test_tool_interaction() {
        let mut tm = ToolManager::new(30.0);
        tm.toggle(ToolKind::Pencil);

        assert!(!tm.is_active());
        assert!(tm.begin(Point::ZERO));
        assert!(tm.is_active());

        assert_eq!(tm.update(Point::new(90.0, 0.0)), 3);
        assert_eq!(tm.preview_stroke().map(Stroke::len), Some(3));

        let stroke = tm.end();
        assert_eq!(stroke.map(|s| s.len()), Some(3));
        assert!(!tm.is_active());
    }

    #[test]
    fn test_toggle_cancels_gesture() {
        let mut tm = ToolManager::new(30.0);
        tm.toggle(ToolKind::Pencil);
        tm.begin(Point::ZERO);
        tm.update(Point::new(90.0, 0.0));

        tm.toggle(ToolKind::Pencil);
        tm.toggle(ToolKind::Pencil);
        assert!(!tm.is_active());
        assert!(tm.preview_stroke().is_none());
    }
}
