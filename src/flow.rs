//! Window event loop.
//!
//! [`run`] opens the viewer window and drives one frame per redraw: input is
//! fed to the camera controller as events arrive, then each redraw applies
//! held keys for the elapsed time, uploads uniforms and draws the scene.

use std::sync::Arc;

use anyhow::Context as _;
use instant::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{config::ViewerConfig, context::Context};

pub struct AppState {
    pub(crate) ctx: Context,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &ViewerConfig) -> anyhow::Result<Self> {
        let ctx = Context::new(window, config)
            .await
            .context("cannot create the main context")?;
        Ok(Self {
            ctx,
            is_surface_configured: true,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.is_surface_configured = self.ctx.resize(width, height);
    }

    fn render(&mut self, dt: instant::Duration) -> Result<(), wgpu::SurfaceError> {
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let camera = &mut self.ctx.camera;
        camera
            .controller
            .update(&mut camera.camera, &mut self.ctx.projection, dt);
        self.ctx.update();
        self.ctx.render()
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: ViewerConfig,
    state: Option<AppState>,
    // Initialization failure, handed back to `run` once the loop exits.
    error: Option<anyhow::Error>,
    last_time: Instant,
}

impl App {
    fn new(config: ViewerConfig) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new().context("failed to start the async runtime")?;
        Ok(Self {
            async_runtime,
            config,
            state: None,
            error: None,
            last_time: Instant::now(),
        })
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<AppState> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create the window")?,
        );
        self.async_runtime
            .block_on(AppState::new(window, &self.config))
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(state) => {
                state.ctx.window.request_redraw();
                self.last_time = Instant::now();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Initialization failed: {e:#}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        let camera = &mut state.ctx.camera;
        camera
            .controller
            .handle_window_events(&mut camera.camera, &event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                match state.render(dt) {
                    Ok(()) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }

                if state.ctx.camera.controller.close_requested() {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            state.ctx.scene.release();
        }
    }
}

/// Opens the viewer window and runs until it is closed.
///
/// Any failure while creating the window or GPU context ends the loop and is returned.
pub fn run(config: ViewerConfig) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
