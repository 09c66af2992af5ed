//! Input state management for pointer events.

use kurbo::{Point, Vec2};
use std::collections::HashSet;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
        /// Relative motion since the previous event.
        delta: Vec2,
    },
    /// The pointer left the tracked surface.
    Leave,
    Scroll {
        delta: Vec2,
    },
}

/// Tracks which buttons are held and where the pointer is.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position in screen coordinates.
    pub pointer_position: Point,
    /// Currently pressed mouse buttons.
    pressed_buttons: HashSet<MouseButton>,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::Down { position, button } => {
                self.pointer_position = position;
                self.pressed_buttons.insert(button);
            }
            PointerEvent::Up { position, button } => {
                self.pointer_position = position;
                self.pressed_buttons.remove(&button);
            }
            PointerEvent::Move { position, .. } => {
                self.pointer_position = position;
            }
            PointerEvent::Leave => self.release_all(),
            PointerEvent::Scroll { .. } => {}
        }
    }

    /// Force every button to released.
    pub fn release_all(&mut self) {
        self.pressed_buttons.clear();
    }

    /// Check if a button is currently pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }
}
