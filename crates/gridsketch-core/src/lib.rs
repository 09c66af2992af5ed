//! GridSketch Core Library
//!
//! Platform-agnostic data structures and logic for the GridSketch grid
//! editor: the camera transform, the pencil stroke builder and the layered
//! document.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod geometry;
pub mod input;
pub mod shapes;
pub mod tools;

pub use camera::Camera;
pub use canvas::{Canvas, CanvasDocument, CanvasEvent, Layer};
pub use config::{ConfigError, EditorConfig, LeavePolicy};
pub use input::{InputState, MouseButton, PointerEvent};
pub use shapes::{Segment, SegmentKind, Stroke};
pub use tools::{ParseToolError, Tool, ToolKind, ToolManager};
