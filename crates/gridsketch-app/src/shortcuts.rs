//! Keyboard shortcut registry and documentation.

use gridsketch_core::tools::ToolKind;

/// Editor command bound to a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleTool(ToolKind),
    SelectLayer(i64),
    Undo,
    ResetView,
    CycleGrid,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        command: Command,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        if self.ctrl {
            format!("Ctrl+{}", self.key)
        } else {
            self.key.to_string()
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("P", false, Command::ToggleTool(ToolKind::Pencil), "Toggle pencil"),
            Shortcut::new("[", false, Command::SelectLayer(-1), "Previous layer"),
            Shortcut::new("]", false, Command::SelectLayer(1), "Next layer"),
            Shortcut::new("Z", true, Command::Undo, "Undo"),
            Shortcut::new("Home", false, Command::ResetView, "Reset view"),
            Shortcut::new("G", false, Command::CycleGrid, "Toggle grid"),
        ]
    }

    /// Find the command for a key name (case-insensitive) and Ctrl state.
    pub fn lookup(key: &str, ctrl: bool) -> Option<Command> {
        Self::all()
            .into_iter()
            .find(|s| s.ctrl == ctrl && s.key.eq_ignore_ascii_case(key))
            .map(|s| s.command)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!("  {:20} {}", "Middle drag", "Pan");
        println!("  {:20} {}", "Wheel", "Zoom");
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(
            ShortcutRegistry::lookup("p", false),
            Some(Command::ToggleTool(ToolKind::Pencil))
        );
        assert_eq!(ShortcutRegistry::lookup("Z", true), Some(Command::Undo));
        assert_eq!(ShortcutRegistry::lookup("z", false), None);
        assert_eq!(ShortcutRegistry::lookup("]", false), Some(Command::SelectLayer(1)));
        assert_eq!(ShortcutRegistry::lookup("q", false), None);
    }

    #[test]
    fn test_format() {
        let undo = ShortcutRegistry::all()
            .into_iter()
            .find(|s| s.command == Command::Undo)
            .unwrap();
        assert_eq!(undo.format(), "Ctrl+Z");
    }
}
