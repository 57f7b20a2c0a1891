//! Terrain Editor
//!
//! Flies a camera over a heightmap terrain under a skysphere.
//!
//! Run with: `cargo run --bin terrain_editor [config.json]`
//!
//! Controls:
//! - W/S: Walk forward/back
//! - A/D: Strafe left/right
//! - Shift: Coarse steps (1.0 instead of 0.1)
//! - Left mouse drag: Look around
//! - F: Toggle wireframe
//! - T: Toggle tessellation
//! - Escape: Quit

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use terrain_editor_engine::camera::Camera;
use terrain_editor_engine::config::EditorConfig;
use terrain_editor_engine::error::Result;
use terrain_editor_engine::input::{
    self, EditorCommand, InputState, apply_held_movement, camera_status,
};
use terrain_editor_engine::render::{
    FrameOutcome, GpuContextConfig, Renderer, SkyPass, TerrainPass,
};
use terrain_editor_engine::world::World;

// ============================================================================
// WINIT TRANSLATION
// ============================================================================

fn map_key(key: KeyCode) -> input::KeyCode {
    match key {
        KeyCode::KeyW => input::KeyCode::W,
        KeyCode::KeyA => input::KeyCode::A,
        KeyCode::KeyS => input::KeyCode::S,
        KeyCode::KeyD => input::KeyCode::D,
        KeyCode::KeyF => input::KeyCode::F,
        KeyCode::KeyT => input::KeyCode::T,
        KeyCode::ShiftLeft => input::KeyCode::ShiftLeft,
        KeyCode::ShiftRight => input::KeyCode::ShiftRight,
        KeyCode::Escape => input::KeyCode::Escape,
        _ => input::KeyCode::Unknown,
    }
}

fn map_button(button: MouseButton) -> input::MouseButton {
    match button {
        MouseButton::Left => input::MouseButton::Left,
        MouseButton::Middle => input::MouseButton::Middle,
        MouseButton::Right => input::MouseButton::Right,
        MouseButton::Back => input::MouseButton::Other(3),
        MouseButton::Forward => input::MouseButton::Other(4),
        MouseButton::Other(id) => input::MouseButton::Other(id),
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

struct TerrainEditorApp {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    config: EditorConfig,
    world: World,
    camera: Camera,
    input: InputState,

    // Timing
    last_update: Instant,
    last_title_update: Instant,
    title_dirty: bool,
}

impl TerrainEditorApp {
    fn new(config: EditorConfig, world: World) -> Self {
        let aspect = config.window.width as f32 / config.window.height.max(1) as f32;
        let camera = config.camera.build_camera(aspect);
        let now = Instant::now();
        Self {
            window: None,
            renderer: None,
            config,
            world,
            camera,
            input: InputState::new(),
            last_update: now,
            last_title_update: now,
            title_dirty: true,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let gpu_config = GpuContextConfig {
            vsync: self.config.window.vsync,
            msaa: self.config.window.msaa,
            high_performance: true,
        };
        let mut renderer = Renderer::new(window.clone(), gpu_config, self.config.clear_color)?;
        renderer.add_pass(Box::new(SkyPass::new(self.config.sky)))?;
        renderer.add_pass(Box::new(TerrainPass::new()))?;

        let (width, height) = renderer.dimensions();
        if height > 0 {
            self.camera.set_aspect_ratio(width as f32 / height as f32);
        }

        self.renderer = Some(renderer);
        self.window = Some(window);
        self.last_update = Instant::now();
        Ok(())
    }

    /// Run a key-bound command. Returns `false` when the editor should exit.
    fn execute(&mut self, command: EditorCommand) -> bool {
        match command {
            EditorCommand::Walk(_) | EditorCommand::Strafe(_) => {
                if command.apply_to_camera(&mut self.camera) {
                    self.title_dirty = true;
                }
            }
            EditorCommand::ToggleWireframe => {
                self.world.toggle_wireframe();
            }
            EditorCommand::ToggleTessellation => {
                if let Err(e) = self.world.toggle_tessellation() {
                    log::error!("Failed to rebuild terrain: {}", e);
                }
            }
            EditorCommand::Quit => return false,
        }
        true
    }

    fn update_title(&mut self, now: Instant) {
        let Some(window) = &self.window else {
            return;
        };
        let fps = self.renderer.as_ref().map_or(0.0, |r| r.stats().fps());
        let status = camera_status(&self.camera, fps);
        window.set_title(&format!("{} - {}", self.config.window.title, status));
        self.last_title_update = now;
        self.title_dirty = false;
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let delta_time = now.duration_since(self.last_update).as_secs_f32();
        self.last_update = now;

        if apply_held_movement(&mut self.camera, &self.input.keyboard, delta_time) {
            self.title_dirty = true;
        }
        self.world.update(&self.camera);

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        match renderer.render_frame(&self.camera, &self.world) {
            Ok(FrameOutcome::Presented) => {}
            Ok(FrameOutcome::Skipped) => log::debug!("Frame skipped"),
            Err(e) => {
                log::error!("Render failed: {}", e);
                event_loop.exit();
                return;
            }
        }

        if self.title_dirty || now.duration_since(self.last_title_update).as_secs_f32() >= 1.0 {
            self.update_title(now);
        }
    }
}

// ============================================================================
// APPLICATION HANDLER
// ============================================================================

impl ApplicationHandler for TerrainEditorApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.initialize(event_loop) {
            log::error!("Failed to initialize editor: {}", e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(new_size.width, new_size.height);
                }
                if new_size.height > 0 {
                    self.camera
                        .set_aspect_ratio(new_size.width as f32 / new_size.height as f32);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                let pressed = event.state == ElementState::Pressed;
                let command = self.input.handle_key(map_key(key), pressed);

                // Repeats are covered by held movement
                if let Some(command) = command.filter(|_| !event.repeat) {
                    if !self.execute(command) {
                        event_loop.exit();
                    }
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                self.input.mouse.set_button(map_button(button), pressed);

                if button == MouseButton::Left && !pressed {
                    log::debug!(
                        "View matrix {:?}, position {:?}",
                        self.camera.view_matrix(),
                        self.camera.position()
                    );
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(delta) = self.input.mouse.set_position(position.x, position.y) {
                    if self.camera.apply_mouse_drag(delta.x, delta.y) {
                        self.title_dirty = true;
                    }
                }
            }

            WindowEvent::CursorLeft { .. } => self.input.mouse.leave_window(),

            WindowEvent::Focused(false) => self.input.reset(),

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn run() -> Result<()> {
    let config = EditorConfig::from_args()?;
    let heightmap = config.terrain.load_heightmap()?;
    let world = World::new(heightmap, config.terrain.mesh)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = TerrainEditorApp::new(config, world);
    event_loop.run_app(&mut app)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Terrain Editor");
    log::info!("  W/S: walk, A/D: strafe, Shift: coarse step");
    log::info!("  Left mouse drag: look around");
    log::info!("  F: wireframe, T: tessellation, Escape: quit");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
