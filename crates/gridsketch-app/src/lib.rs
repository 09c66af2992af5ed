//! GridSketch Application
//!
//! The application shell providing windowing, input handling,
//! and presentation of the grid editor.

mod app;
pub mod config;
mod event_handler;
mod shortcuts;

pub use app::{App, AppError};
pub use config::{AppConfig, AppConfigError};
pub use event_handler::EventHandler;
pub use shortcuts::{Command, Shortcut, ShortcutRegistry};
