//! Canvas document and editor session state.

use crate::camera::Camera;
use crate::config::{ConfigError, DEFAULT_MAX_LAYERS, EditorConfig, LeavePolicy};
use crate::input::{InputState, MouseButton, PointerEvent};
use crate::shapes::Stroke;
use crate::tools::{ParseToolError, ToolKind, ToolManager};
use kurbo::{Point, Size, Vec2};

/// One drawing plane: committed strokes in drawing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    strokes: Vec<Stroke>,
}

impl Layer {
    /// Committed strokes, oldest first.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Check if the layer has no strokes.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Get the number of strokes.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }
}

/// The layered document: always at least one layer, never more than
/// `max_layers`.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasDocument {
    layers: Vec<Layer>,
    current_layer: usize,
    max_layers: usize,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasDocument {
    /// Create a document with a single empty layer.
    pub fn new() -> Self {
        Self::with_max_layers(DEFAULT_MAX_LAYERS)
    }

    /// Create a document that never grows past `max_layers` layers.
    pub fn with_max_layers(max_layers: usize) -> Self {
        Self {
            layers: vec![Layer::default()],
            current_layer: 0,
            max_layers: max_layers.max(1),
        }
    }

    /// Upper bound on the number of layers.
    pub fn max_layers(&self) -> usize {
        self.max_layers
    }

    /// All layers in index order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Index of the layer that receives new strokes.
    pub fn current_layer_index(&self) -> usize {
        self.current_layer
    }

    /// The layer that receives new strokes.
    pub fn current_layer(&self) -> &Layer {
        &self.layers[self.current_layer]
    }

    /// Move the current layer by `delta`, creating layers as needed.
    ///
    /// A move below index 0 or past the layer bound is ignored. Returns
    /// `true` if the index changed.
    pub fn select_layer(&mut self, delta: i64) -> bool {
        let Some(index) = i64::try_from(self.current_layer)
            .ok()
            .and_then(|current| current.checked_add(delta))
            .and_then(|i| usize::try_from(i).ok())
            .filter(|&i| i < self.max_layers)
        else {
            return false;
        };

        self.ensure_layer(index);
        let changed = index != self.current_layer;
        self.current_layer = index;
        changed
    }

    /// Grow the document so that `index` is a valid layer.
    fn ensure_layer(&mut self, index: usize) {
        if self.layers.len() <= index {
            self.layers.resize_with(index + 1, Layer::default);
        }
    }

    /// Append a stroke to the current layer. Empty strokes are dropped.
    pub fn commit_stroke(&mut self, stroke: Stroke) -> bool {
        if stroke.is_empty() {
            return false;
        }
        self.ensure_layer(self.current_layer);
        self.layers[self.current_layer].strokes.push(stroke);
        true
    }

    /// Remove the most recent stroke of the current layer.
    pub fn undo_last(&mut self) -> Option<Stroke> {
        self.layers.get_mut(self.current_layer)?.strokes.pop()
    }

    /// Total number of committed strokes across all layers.
    pub fn stroke_count(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }
}

/// Notifications for the shell, drained once per tick.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// The current layer changed; carries the new index.
    LayerChanged { index: usize },
    /// The selected tool changed.
    ToolChanged { tool: Option<ToolKind> },
}

/// Runtime editor session.
///
/// All mutation goes through this value; every handler runs to completion
/// and marks the canvas dirty when the visible state changed.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    /// Camera for view transform.
    pub camera: Camera,
    /// Tool manager.
    pub tool_manager: ToolManager,
    /// Pointer button state.
    pub input: InputState,
    config: EditorConfig,
    needs_redraw: bool,
    events: Vec<CanvasEvent>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with the default configuration.
    pub fn new() -> Self {
        Self::build(EditorConfig::default())
    }

    /// Create a canvas with a validated configuration.
    pub fn with_config(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.max_zoom.is_none() {
            log::warn!("no maximum zoom configured; zoom-in is unbounded");
        }
        Ok(Self::build(config))
    }

    fn build(config: EditorConfig) -> Self {
        Self {
            document: CanvasDocument::with_max_layers(config.max_layers),
            camera: Camera::from_config(&config),
            tool_manager: ToolManager::new(config.unit_size),
            input: InputState::new(),
            config,
            needs_redraw: true,
            events: Vec::new(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.camera.set_viewport(Size::new(width, height));
        self.mark_dirty();
    }

    /// Whether a redraw is pending.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Consume the pending redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Take all pending notifications.
    pub fn drain_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current layer index as shown by the layer readout.
    pub fn layer_label(&self) -> String {
        self.document.current_layer_index().to_string()
    }

    /// Segments placed by the gesture in progress, if any.
    pub fn preview_stroke(&self) -> Option<&Stroke> {
        self.tool_manager.preview_stroke()
    }

    /// Dispatch a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        self.input.handle_pointer_event(&event);

        match event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button),
            PointerEvent::Up { button, .. } => self.pointer_up(button),
            PointerEvent::Move { position, delta } => self.pointer_move(position, delta),
            PointerEvent::Leave => self.pointer_leave(),
            PointerEvent::Scroll { delta } => self.zoom_by(delta.y),
        }
    }

    fn pointer_down(&mut self, position: Point, button: MouseButton) {
        if button != MouseButton::Left {
            return;
        }
        let world = self.camera.screen_to_world(position);
        if self.tool_manager.begin(world) {
            self.mark_dirty();
        }
    }

    fn pointer_up(&mut self, button: MouseButton) {
        if button == MouseButton::Left && self.tool_manager.is_active() {
            self.finish_gesture();
        }
    }

    fn pointer_move(&mut self, position: Point, delta: Vec2) {
        if self.input.is_button_pressed(MouseButton::Middle) {
            self.camera.pan(delta);
            self.mark_dirty();
        }

        if self.input.is_button_pressed(MouseButton::Left) {
            let world = self.camera.screen_to_world(position);
            if self.tool_manager.update(world) > 0 {
                self.mark_dirty();
            }
        }
    }

    fn pointer_leave(&mut self) {
        if !self.tool_manager.is_active() {
            return;
        }
        match self.config.leave_policy {
            LeavePolicy::Commit => self.finish_gesture(),
            LeavePolicy::Discard => {
                self.tool_manager.cancel();
                self.mark_dirty();
            }
            LeavePolicy::Keep => {
                if let Some(tool) = self.tool_manager.active_mut() {
                    tool.suspend();
                }
            }
        }
    }

    fn finish_gesture(&mut self) {
        if let Some(stroke) = self.tool_manager.end() {
            let segments = stroke.len();
            if self.document.commit_stroke(stroke) {
                log::debug!(
                    "committed stroke of {} segments to layer {}",
                    segments,
                    self.document.current_layer_index()
                );
            }
        }
        self.mark_dirty();
    }

    /// Apply a wheel delta to the zoom.
    pub fn zoom_by(&mut self, delta: f64) {
        self.camera.apply_zoom_delta(delta);
        self.mark_dirty();
    }

    /// Pan the view by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.camera.pan(delta);
        self.mark_dirty();
    }

    /// Restore the initial camera position and zoom.
    pub fn reset_view(&mut self) {
        self.camera.reset();
        self.mark_dirty();
    }

    /// Toggle a tool (selecting the active tool deselects it).
    pub fn toggle_tool(&mut self, tool: ToolKind) {
        let current = self.tool_manager.toggle(tool);
        log::info!("tool: {}", current.map_or("none", ToolKind::name));
        self.events.push(CanvasEvent::ToolChanged { tool: current });
        self.mark_dirty();
    }

    /// Toggle a tool by identifier. Unknown identifiers change nothing.
    pub fn select_tool_by_name(&mut self, name: &str) -> Result<Option<ToolKind>, ParseToolError> {
        let tool: ToolKind = name.parse()?;
        self.toggle_tool(tool);
        Ok(self.tool_manager.current_tool())
    }

    /// Move to another layer. Returns `true` if the current layer changed.
    pub fn select_layer(&mut self, delta: i64) -> bool {
        if !self.document.select_layer(delta) {
            return false;
        }
        let index = self.document.current_layer_index();
        log::debug!("layer {} of {}", index, self.document.layers().len());
        self.events.push(CanvasEvent::LayerChanged { index });
        self.mark_dirty();
        true
    }

    /// Undo one unit of work.
    ///
    /// Placed segments of the gesture in progress are dropped first; only
    /// when there are none is the last committed stroke of the current layer
    /// removed.
    pub fn undo(&mut self) -> bool {
        if let Some(tool) = self.tool_manager.active_mut() {
            if tool.discard_in_progress() {
                log::debug!("undo: discarded stroke in progress");
                self.mark_dirty();
                return true;
            }
        }

        if self.document.undo_last().is_some() {
            log::debug!("undo: removed stroke from layer {}", self.document.current_layer_index());
            self.mark_dirty();
            return true;
        }
        false
    }
}
