//! Core application state and lifecycle.

use gridsketch_core::canvas::{Canvas, CanvasEvent};
use gridsketch_render::{RenderContext, RenderResult, Renderer, RendererError, VelloRenderer};
use kurbo::{Point, Size};
use std::sync::Arc;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::ModifiersState;
use winit::window::{Window, WindowId};

use crate::config::{AppConfig, AppConfigError};
use crate::event_handler::{EventHandler, apply_command, command_for_key};
use crate::shortcuts::ShortcutRegistry;

/// Fatal application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error(transparent)]
    Config(#[from] AppConfigError),
}

struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    shape_renderer: VelloRenderer,
    /// Copies the Rgba8Unorm render target onto the surface format.
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // State
    canvas: Canvas,
    modifiers: ModifiersState,
    event_handler: EventHandler,
    grid_style: gridsketch_render::GridStyle,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// First fatal error raised inside the event loop.
    error: Option<AppError>,
}

impl App {
    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            error: None,
        }
    }

    /// Run the application until the window closes.
    pub fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::with_config(config);
        event_loop.run_app(&mut app)?;
        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        log::error!("{err}");
        self.error.get_or_insert(err);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<AppState, AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        let render_cx = self.render_cx.get_or_insert_with(vello::util::RenderContext::new);
        let surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::Surface(e.to_string()))?;

        let device = &render_cx.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let mut canvas = Canvas::with_config(self.config.editor.clone())
            .map_err(|e| AppError::Config(e.into()))?;
        canvas.set_viewport_size(f64::from(width), f64::from(height));

        log::info!("GridSketch initialized - {}x{}", width, height);
        ShortcutRegistry::print_all();

        let state = AppState {
            window,
            surface,
            vello_renderer,
            shape_renderer: VelloRenderer::new(),
            texture_blitter,
            canvas,
            modifiers: ModifiersState::empty(),
            event_handler: EventHandler::new(),
            grid_style: self.config.grid_style,
        };
        state.window.set_title(&window_title(&self.config.title, &state.canvas));
        Ok(state)
    }
}

/// Window title carrying the layer readout and the selected tool.
fn window_title(base: &str, canvas: &Canvas) -> String {
    let tool = canvas
        .tool_manager
        .current_tool()
        .map_or("no tool", |tool| tool.name());
    format!("{base} - layer {} - {tool}", canvas.layer_label())
}

impl AppState {
    fn render(
        &mut self,
        render_cx: &vello::util::RenderContext,
        config: &AppConfig,
    ) -> RenderResult<()> {
        let width = self.surface.config.width;
        let height = self.surface.config.height;

        let render_ctx =
            RenderContext::new(&self.canvas, Size::new(f64::from(width), f64::from(height)))
                .with_background(config.background_color)
                .with_grid(self.grid_style)
                .with_grid_color(config.grid_color)
                .with_stroke_color(config.stroke_color);
        self.shape_renderer.build_scene(&render_ctx);
        let scene = self.shape_renderer.take_scene();

        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = self
            .surface
            .surface
            .get_current_texture()
            .map_err(|e| RendererError::Surface(e.to_string()))?;

        let params = RenderParams {
            base_color: self.shape_renderer.background(),
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello writes through a storage binding, which requires Rgba8Unorm.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        self.vello_renderer
            .render_to_texture(device, queue, &scene, &render_texture_view, &params)
            .map_err(|e| RendererError::RenderFailed(e.to_string()))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
            label: Some("blit encoder"),
        });
        self.texture_blitter
            .copy(device, &mut encoder, &render_texture_view, &surface_view);
        queue.submit(std::iter::once(encoder.finish()));

        surface_texture.present();
        Ok(())
    }

    fn sync_window_title(&mut self, base: &str) {
        let events = self.canvas.drain_events();
        if events.is_empty() {
            return;
        }
        for event in &events {
            match event {
                CanvasEvent::LayerChanged { index } => log::debug!("layer -> {index}"),
                CanvasEvent::ToolChanged { tool } => log::debug!("tool -> {tool:?}"),
            }
        }
        self.window.set_title(&window_title(base, &self.canvas));
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");
        match self.init(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                state
                    .canvas
                    .set_viewport_size(f64::from(size.width), f64::from(size.height));
                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };
                match state.render(render_cx, &self.config) {
                    Ok(()) => {}
                    // Lost or outdated surfaces recover on the next frame.
                    Err(e @ RendererError::Surface(_)) => log::warn!("Frame skipped: {e}"),
                    Err(e) => log::error!("Failed to render: {e}"),
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = state
                    .event_handler
                    .cursor_moved(Point::new(position.x, position.y));
                state.canvas.handle_pointer_event(event);
            }

            WindowEvent::CursorLeft { .. } => {
                let event = state.event_handler.cursor_left();
                state.canvas.handle_pointer_event(event);
            }

            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => {
                if let Some(event) = state.event_handler.mouse_input(button_state, button) {
                    state.canvas.handle_pointer_event(event);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let event = state.event_handler.mouse_wheel(delta);
                state.canvas.handle_pointer_event(event);
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                state.modifiers = modifiers.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let ctrl = state.modifiers.control_key() || state.modifiers.super_key();
                if let Some(command) = command_for_key(&event.logical_key, ctrl) {
                    apply_command(&mut state.canvas, &mut state.grid_style, command);
                    // Grid changes do not go through the canvas.
                    state.window.request_redraw();
                }
            }

            _ => {}
        }

        state.sync_window_title(&self.config.title);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            if state.canvas.take_redraw() {
                state.window.request_redraw();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsketch_core::tools::ToolKind;

    #[test]
    fn test_window_title() {
        let mut canvas = Canvas::new();
        assert_eq!(window_title("GridSketch", &canvas), "GridSketch - layer 0 - no tool");

        canvas.toggle_tool(ToolKind::Pencil);
        canvas.select_layer(2);
        assert_eq!(window_title("GridSketch", &canvas), "GridSketch - layer 2 - pencil");
    }
}
