use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    window::WindowId,
};

use axis_viewer::camera::CameraController;
use axis_viewer::cli::Cli;
use axis_viewer::config::ViewerConfig;
use axis_viewer::core::{DisplayContext, WinitController};
use axis_viewer::frame::{FpsCounter, FrameClock};
use axis_viewer::input;
use axis_viewer::projection::ProjectionParams;
use axis_viewer::renderer::AxisRenderer;
use axis_viewer::window::Window;

// === Application ===

struct App {
    config: ViewerConfig,
    window: Option<Window>,
    renderer: Option<AxisRenderer>,
    camera: CameraController,
    controller: WinitController,
    projection: ProjectionParams,
    frames: FrameClock,
    fps: FpsCounter,
    quiet: bool,
}

impl App {
    fn new(config: ViewerConfig, quiet: bool) -> Self {
        let camera = CameraController::from_config(&config.camera);
        let projection =
            ProjectionParams::from_config(&config.camera, config.window.width, config.window.height);

        Self {
            config,
            window: None,
            renderer: None,
            camera,
            controller: WinitController::new(),
            projection,
            frames: FrameClock::new(),
            fps: FpsCounter::default(),
            quiet,
        }
    }

    fn resize(&mut self, size: DisplayContext) {
        log::debug!("Resize to {}x{}", size.width, size.height);

        if let Some(renderer) = &mut self.renderer {
            renderer.resize(size);
        }
        self.projection.set_viewport(size.width, size.height);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame = self.frames.tick();

        if let Some(fps) = self.fps.record(frame.delta) {
            if !self.quiet {
                log::info!("FPS: {:.1}", fps);
            }
        }

        input::apply_held_input(&self.controller, &mut self.camera);
        log::trace!("Frame {}: {:?}", frame.number, self.camera.state());

        let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer) else {
            return;
        };

        match window.draw(renderer, &self.camera, &self.projection) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = window.dimensions();
                if !renderer.resize(size) {
                    renderer.reconfigure();
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Render error: out of GPU memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = winit::window::Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(attributes) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(AxisRenderer::new(window.clone())) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        // The platform may not honour the requested size
        let size = renderer.size();
        self.projection.set_viewport(size.width, size.height);

        self.window = Some(Window::new(window));
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.controller.process_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { .. } if input::quit_requested(&self.controller) => {
                event_loop.exit()
            }
            WindowEvent::Resized(size) => self.resize(size.into()),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    log::debug!("Configuration: {:?}", config);
    log::info!(
        "Camera at {:?} looking at {:?}, fov {}°, clip {}..{}",
        config.camera.position,
        config.camera.focus,
        config.camera.fov_degrees,
        config.camera.near_clip,
        config.camera.far_clip
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, cli.quiet);

    log::info!("Axis Viewer - Controls: arrows orbit, +/- zoom, R reset, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
