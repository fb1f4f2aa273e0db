//! noisetex - procedural noise texture generator and viewer
//!
//! Builds a white, Perlin, simplex or wood noise texture, then either
//! writes it to PNG or shows it on a quad under an orbit camera.

use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::Parser;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use noisetex::camera::{ButtonAction, Camera, MouseButton, OrbitCamera};
use noisetex::cli::Args;
use noisetex::export;
use noisetex::field::{build_field, NoiseTexture};
use noisetex::params::{FieldSpec, RenderConfig};
use noisetex::rendering::RenderSystem;
use noisetex::scene::NoiseScene;
use noisetex::upload::MemoryUploader;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    scene: NoiseScene,
    camera: OrbitCamera,
    cursor: (f64, f64),

    render_config: RenderConfig,

    /// First fatal error raised inside the event loop
    failure: Option<anyhow::Error>,
}

impl App {
    fn new(scene: NoiseScene, camera: OrbitCamera) -> Self {
        Self {
            window: None,
            render_system: None,
            scene,
            camera,
            cursor: (0.0, 0.0),
            render_config: RenderConfig::default(),
            failure: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("noisetex")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let mut render_system =
            pollster::block_on(RenderSystem::new(Arc::clone(&window), &self.render_config))?;

        let size = window.inner_size();
        self.camera.resize(size.width, size.height);
        self.cursor = (size.width as f64 / 2.0, size.height as f64 / 2.0);
        self.camera.set_initial_mouse_pos(self.cursor.0, self.cursor.1);

        self.scene.init(&mut render_system)?;
        if self.scene.texture().dimension() != 2 {
            warn!("only 2D textures can be displayed, use --export for 1D and 3D");
        }

        info!("noisetex is running (drag left to rotate, right to zoom, ESC to quit)");

        self.window = Some(window);
        self.render_system = Some(render_system);
        Ok(())
    }

    /// Render a single frame
    fn render_frame(&mut self) {
        let Some(ref mut render_system) = self.render_system else {
            return;
        };

        self.camera.update();
        if !self
            .scene
            .prepare_frame(render_system, self.camera.view_matrix(), self.camera.proj_matrix())
        {
            return;
        }

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    render_system.resize(size.width, size.height);
                }
            }
            Err(e) => error!("render error: {:?}", e),
        }
    }
}

fn to_camera_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Other(3),
        winit::event::MouseButton::Forward => MouseButton::Other(4),
        winit::event::MouseButton::Other(code) => MouseButton::Other(code),
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init_graphics(event_loop) {
            self.failure = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                self.camera.resize(size.width, size.height);
                self.camera.mark_dirty();
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
                self.camera.handle_mouse_move(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let action = match state {
                    ElementState::Pressed => ButtonAction::Press,
                    ElementState::Released => ButtonAction::Release,
                };
                let (x, y) = self.cursor;
                self.camera
                    .handle_mouse_button(x, y, to_camera_button(button), action);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(render_system) = &mut self.render_system {
            self.scene.teardown(render_system);
        }
    }
}

/// Generate the field in memory and write it to `path`
fn export_field(spec: &FieldSpec, path: &std::path::Path) -> anyhow::Result<()> {
    let mut field = build_field(spec)?;
    let mut uploader = MemoryUploader::new();
    field.generate(&mut uploader)?;

    let texels = field
        .texture()
        .and_then(|handle| uploader.texels(handle))
        .ok_or_else(|| anyhow!("generated texture has no texel data"))?;
    export::write_png(
        path,
        texels,
        field.dimension(),
        field.resolution(),
        field.bounds(),
    )?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let spec = args.field_spec()?;

    if let Some(path) = &args.export {
        return export_field(&spec, path)
            .with_context(|| format!("failed to export {}", path.display()));
    }

    // Validate everything before opening a window
    let scene = NoiseScene::new(build_field(&spec)?);
    let camera = OrbitCamera::new(&args.orbit_params()?);

    let mut app = App::new(scene, camera);
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;

    match app.failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
