//! Translation of window events into canvas operations.

use crate::shortcuts::{Command, ShortcutRegistry};
use gridsketch_core::canvas::Canvas;
use gridsketch_core::input::{MouseButton, PointerEvent};
use gridsketch_render::GridStyle;
use kurbo::{Point, Vec2};
use winit::event::{ElementState, MouseButton as WinitButton, MouseScrollDelta};
use winit::keyboard::{Key, NamedKey};

/// Pixels per wheel line, matching browser `deltaY` for line-based wheels.
const LINE_HEIGHT_PX: f64 = 100.0;

/// Turns winit pointer events into core pointer events.
///
/// winit reports absolute cursor positions only, so relative motion is
/// derived from the previous position.
#[derive(Debug, Default)]
pub struct EventHandler {
    last_cursor: Option<Point>,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position.
    pub fn cursor(&self) -> Point {
        self.last_cursor.unwrap_or(Point::ZERO)
    }

    /// Cursor moved to `position`.
    pub fn cursor_moved(&mut self, position: Point) -> PointerEvent {
        let previous = self.last_cursor.replace(position).unwrap_or(position);
        PointerEvent::Move {
            position,
            delta: Vec2::new(position.x - previous.x, position.y - previous.y),
        }
    }

    /// Cursor left the window.
    pub fn cursor_left(&mut self) -> PointerEvent {
        self.last_cursor = None;
        PointerEvent::Leave
    }

    /// Button pressed or released at the last cursor position.
    pub fn mouse_input(&self, state: ElementState, button: WinitButton) -> Option<PointerEvent> {
        let button = match button {
            WinitButton::Left => MouseButton::Left,
            WinitButton::Middle => MouseButton::Middle,
            WinitButton::Right => MouseButton::Right,
            _ => return None,
        };
        let position = self.cursor();
        Some(match state {
            ElementState::Pressed => PointerEvent::Down { position, button },
            ElementState::Released => PointerEvent::Up { position, button },
        })
    }

    /// Wheel motion, converted to browser-style deltas (positive = scroll down).
    pub fn mouse_wheel(&self, delta: MouseScrollDelta) -> PointerEvent {
        let delta = match delta {
            MouseScrollDelta::LineDelta(x, y) => {
                Vec2::new(-f64::from(x) * LINE_HEIGHT_PX, -f64::from(y) * LINE_HEIGHT_PX)
            }
            MouseScrollDelta::PixelDelta(pos) => Vec2::new(-pos.x, -pos.y),
        };
        PointerEvent::Scroll { delta }
    }
}

/// Name used to look a key up in the shortcut registry.
pub fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(c) => Some(c.to_string()),
        Key::Named(NamedKey::Home) => Some("Home".to_string()),
        _ => None,
    }
}

/// Find the command bound to a key press.
pub fn command_for_key(key: &Key, ctrl: bool) -> Option<Command> {
    key_name(key).and_then(|name| ShortcutRegistry::lookup(&name, ctrl))
}

/// Apply a command to the canvas.
pub fn apply_command(canvas: &mut Canvas, grid_style: &mut GridStyle, command: Command) {
    match command {
        Command::ToggleTool(tool) => canvas.toggle_tool(tool),
        Command::SelectLayer(delta) => {
            canvas.select_layer(delta);
        }
        Command::Undo => {
            canvas.undo();
        }
        Command::ResetView => canvas.reset_view(),
        Command::CycleGrid => {
            *grid_style = grid_style.next();
            log::info!("grid: {}", grid_style.name());
        }
    }
}
