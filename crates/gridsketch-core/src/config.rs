//! Editor configuration.

use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default upper bound on the number of layers.
pub const DEFAULT_MAX_LAYERS: usize = 1024;

/// Configuration validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unit size must be positive and finite, got {0}")]
    InvalidUnitSize(f64),
    #[error("grid must be at least 1x1 cells, got {width}x{height}")]
    InvalidGridSize { width: u32, height: u32 },
    #[error("minimum zoom must be positive, got {0}")]
    InvalidMinZoom(f64),
    #[error("maximum zoom {max} is below minimum zoom {min}")]
    InvalidZoomRange { min: f64, max: f64 },
    #[error("zoom divisor must be non-zero")]
    InvalidZoomDivisor,
    #[error("layer opacity must be within 0..=1, got {0}")]
    InvalidOpacity(f64),
    #[error("at least one layer must be allowed")]
    InvalidMaxLayers,
}

/// What happens to an in-progress stroke when the pointer leaves the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeavePolicy {
    /// Commit the placed segments as if the button had been released.
    #[default]
    Commit,
    /// Drop the placed segments.
    Discard,
    /// Leave the segments visible until the next gesture starts.
    Keep,
}

/// Tunables for the grid editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Length of one grid unit (and of every segment) in world space.
    pub unit_size: f64,
    /// Number of grid cells horizontally.
    pub grid_width: u32,
    /// Number of grid cells vertically.
    pub grid_height: u32,
    /// Lower zoom bound.
    pub min_zoom: f64,
    /// Upper zoom bound. `None` leaves zoom-in unbounded.
    pub max_zoom: Option<f64>,
    /// Wheel delta that changes zoom by 1.0.
    pub zoom_divisor: f64,
    /// How far (in screen pixels) the grid may drift past the viewport edge.
    pub camera_margin: f64,
    /// Camera offset at startup and after a view reset.
    pub initial_offset: Vec2,
    /// Opacity of layers other than the current one.
    pub inactive_layer_opacity: f64,
    /// Handling of an in-progress stroke on pointer leave.
    pub leave_policy: LeavePolicy,
    /// Layer navigation past this count is ignored.
    pub max_layers: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            unit_size: 30.0,
            grid_width: 85,
            grid_height: 85,
            min_zoom: 0.4,
            max_zoom: None,
            zoom_divisor: 300.0,
            camera_margin: 200.0,
            initial_offset: Vec2::new(100.0, 100.0),
            inactive_layer_opacity: 0.5,
            leave_policy: LeavePolicy::Commit,
            max_layers: DEFAULT_MAX_LAYERS,
        }
    }
}

impl EditorConfig {
    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.unit_size.is_finite() && self.unit_size > 0.0) {
            return Err(ConfigError::InvalidUnitSize(self.unit_size));
        }
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::InvalidGridSize {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            return Err(ConfigError::InvalidMinZoom(self.min_zoom));
        }
        if let Some(max) = self.max_zoom {
            if !(max >= self.min_zoom) {
                return Err(ConfigError::InvalidZoomRange { min: self.min_zoom, max });
            }
        }
        if self.zoom_divisor == 0.0 || !self.zoom_divisor.is_finite() {
            return Err(ConfigError::InvalidZoomDivisor);
        }
        if !(0.0..=1.0).contains(&self.inactive_layer_opacity) {
            return Err(ConfigError::InvalidOpacity(self.inactive_layer_opacity));
        }
        if self.max_layers == 0 {
            return Err(ConfigError::InvalidMaxLayers);
        }
        Ok(())
    }

    /// Set the upper zoom bound.
    pub fn with_max_zoom(mut self, max_zoom: Option<f64>) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    /// Set the pointer-leave policy.
    pub fn with_leave_policy(mut self, policy: LeavePolicy) -> Self {
        self.leave_policy = policy;
        self
    }

    /// Set the grid unit size.
    pub fn with_unit_size(mut self, unit_size: f64) -> Self {
        self.unit_size = unit_size;
        self
    }
}
