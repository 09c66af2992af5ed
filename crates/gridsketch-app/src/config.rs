//! Application configuration and the optional JSON config file.

use gridsketch_core::config::EditorConfig;
use gridsketch_render::GridStyle;
use peniko::Color;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "GRIDSKETCH_CONFIG";

/// Errors raised while loading the config file.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid color {0:?}, expected #rrggbb")]
    Color(String),
    #[error(transparent)]
    Editor(#[from] gridsketch_core::config::ConfigError),
}

/// Parse a hex color string like "#rrggbb".
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::from_rgba8(r, g, b, 255))
}

fn color_field(value: Option<String>, fallback: Color) -> Result<Color, AppConfigError> {
    match value {
        Some(s) => parse_color(&s).ok_or(AppConfigError::Color(s)),
        None => Ok(fallback),
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub grid_style: GridStyle,
    pub background_color: Color,
    pub grid_color: Color,
    pub stroke_color: Color,
    pub editor: EditorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "GridSketch".to_string(),
            width: 1280,
            height: 800,
            grid_style: GridStyle::Lines,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            grid_color: Color::from_rgba8(0x74, 0x74, 0x74, 255),
            stroke_color: Color::from_rgba8(0, 0, 0, 255),
            editor: EditorConfig::default(),
        }
    }
}

/// On-disk form of [`AppConfig`]; every field is optional.
///
/// Editor tunables live in a nested `editor` table with the same field
/// names as [`EditorConfig`].
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    title: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    show_grid: Option<bool>,
    background_color: Option<String>,
    grid_color: Option<String>,
    stroke_color: Option<String>,
    editor: EditorConfig,
}

impl AppConfig {
    /// Parse a JSON config, overriding defaults with the fields present.
    pub fn from_json(json: &str) -> Result<Self, AppConfigError> {
        let file: ConfigFile = serde_json::from_str(json)?;
        file.editor.validate()?;
        let defaults = Self::default();

        Ok(Self {
            title: file.title.unwrap_or(defaults.title),
            width: file.width.unwrap_or(defaults.width),
            height: file.height.unwrap_or(defaults.height),
            grid_style: match file.show_grid {
                Some(false) => GridStyle::None,
                Some(true) => GridStyle::Lines,
                None => defaults.grid_style,
            },
            background_color: color_field(file.background_color, defaults.background_color)?,
            grid_color: color_field(file.grid_color, defaults.grid_color)?,
            stroke_color: color_field(file.stroke_color, defaults.stroke_color)?,
            editor: file.editor,
        })
    }

    /// Load a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, AppConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| AppConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load the file named by `GRIDSKETCH_CONFIG`, or the defaults when unset.
    pub fn load_from_env() -> Result<Self, AppConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                log::info!("Loading config from {}", Path::new(&path).display());
                Self::from_file(Path::new(&path))
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsketch_core::config::LeavePolicy;
    use tempfile::tempdir;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#747474"), Some(Color::from_rgba8(0x74, 0x74, 0x74, 255)));
        assert_eq!(parse_color(" #ff0000 "), Some(Color::from_rgba8(255, 0, 0, 255)));
        assert_eq!(parse_color("747474"), None);
        assert_eq!(parse_color("#74747"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config.title, "GridSketch");
        assert_eq!(config.editor.grid_width, 85);
        assert_eq!(config.grid_style, GridStyle::Lines);
    }

    #[test]
    fn test_json_overrides() {
        let config = AppConfig::from_json(
            r##"{
                "title": "Sketch",
                "show_grid": false,
                "grid_color": "#000000",
                "editor": {
                    "unit_size": 20.0,
                    "max_zoom": 4.0,
                    "leave_policy": "discard",
                    "inactive_layer_opacity": 0.8,
                    "camera_margin": 150.0,
                    "initial_offset": { "x": 40.0, "y": 60.0 }
                }
            }"##,
        )
        .unwrap();
        assert_eq!(config.title, "Sketch");
        assert_eq!(config.grid_style, GridStyle::None);
        assert_eq!(config.grid_color, Color::from_rgba8(0, 0, 0, 255));
        assert_eq!(config.editor.unit_size, 20.0);
        assert_eq!(config.editor.max_zoom, Some(4.0));
        assert_eq!(config.editor.leave_policy, LeavePolicy::Discard);
        assert_eq!(config.editor.inactive_layer_opacity, 0.8);
        assert_eq!(config.editor.camera_margin, 150.0);
        assert_eq!(config.editor.initial_offset, kurbo::Vec2::new(40.0, 60.0));
        // Untouched editor fields keep their defaults.
        assert_eq!(config.editor.grid_width, 85);
        assert_eq!(config.editor.zoom_divisor, 300.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            AppConfig::from_json(r#"{"grid_color": "grey"}"#),
            Err(AppConfigError::Color(_))
        ));
        assert!(matches!(
            AppConfig::from_json(r#"{"editor": {"unit_size": 0.0}}"#),
            Err(AppConfigError::Editor(_))
        ));
        assert!(matches!(
            AppConfig::from_json(r##"{"colour": "#000000"}"##),
            Err(AppConfigError::Parse(_))
        ));
        assert!(matches!(
            AppConfig::from_json(r#"{"editor": {"unit": 20.0}}"#),
            Err(AppConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gridsketch.json");
        std::fs::write(&path, r#"{"width": 640, "height": 480}"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!((config.width, config.height), (640, 480));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_file(Path::new("/nonexistent/gridsketch.json")).unwrap_err();
        assert!(matches!(err, AppConfigError::Read { .. }));
    }
}
