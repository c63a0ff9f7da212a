use std::sync::Arc;

use ferrous_font::OutlineProvider;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::builder::AppConfig;
use crate::graphics::GraphicsState;

struct Runner {
    config: AppConfig,
    provider: Box<dyn OutlineProvider>,
    window: Option<Arc<Window>>,
    graphics: Option<GraphicsState>,
    /// First fatal error; reported by `run_internal` once the loop exits.
    error: Option<anyhow::Error>,
}

impl Runner {
    fn new(config: AppConfig, provider: Box<dyn OutlineProvider>) -> Self {
        Self {
            config,
            provider,
            window: None,
            graphics: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error.get_or_insert(err);
        event_loop.exit();
    }

    fn redraw(&mut self) -> anyhow::Result<()> {
        let Some(gfx) = &mut self.graphics else {
            return Ok(());
        };

        let frame = match gfx.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost; reconfiguring");
                gfx.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout; skipping frame");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let stats = pollster::block_on(gfx.renderer.render(
            &view,
            self.provider.as_ref(),
            &self.config.text,
        ))?;
        frame.present();

        log::trace!("frame: {:?}", stats);
        Ok(())
    }
}

impl ApplicationHandler for Runner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };

        match pollster::block_on(GraphicsState::new(window.clone(), &self.config)) {
            Ok(gfx) => self.graphics = Some(gfx),
            Err(err) => return self.fail(event_loop, err),
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                let Some(window) = &self.window else {
                    return;
                };
                if let Some(gfx) = &mut self.graphics {
                    gfx.resize(size.width, size.height, window.scale_factor());
                }
                window.request_redraw();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                // A `Resized` with the new physical size follows.
                if let Some(gfx) = &mut self.graphics {
                    let (width, height) = (gfx.config.width, gfx.config.height);
                    gfx.resize(width, height, scale_factor);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }
}

pub(crate) fn run_internal(
    config: AppConfig,
    provider: Box<dyn OutlineProvider>,
) -> anyhow::Result<()> {
    let mut runner = Runner::new(config, provider);
    let event_loop = EventLoop::new()?;
    // The text is static; draw only when the window asks for it.
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut runner)?;

    match runner.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
