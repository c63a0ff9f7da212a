use std::sync::Arc;

use anyhow::Context as _;
use ferrous_core::context::EngineContext;
use ferrous_renderer::{SamplerConfig, SurfaceInfo, TextRenderer, TextStyle};
use winit::window::Window;

use crate::builder::AppConfig;

pub struct GraphicsState {
    pub surface: wgpu::Surface<'static>,
    pub config: wgpu::SurfaceConfiguration,
    pub renderer: TextRenderer,
}

impl GraphicsState {
    pub async fn new(window: Arc<Window>, app: &AppConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let scale_factor = window.scale_factor();

        let instance = ferrous_core::instance();
        let surface = instance
            .create_surface(window)
            .context("cannot create window surface")?;
        let context = EngineContext::for_surface(&instance, Some(&surface)).await?;

        let caps = surface.get_capabilities(&context.adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .context("surface reports no supported formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let present_mode = if app.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 1,
        };
        surface.configure(&context.device, &config);

        let info = SurfaceInfo::new(config.width, config.height, scale_factor);
        let mut renderer =
            TextRenderer::new(context, info, config.format, SamplerConfig::default()).await?;
        renderer.set_style(TextStyle {
            text_color: app.text_color,
            background: app.background,
        });

        Ok(Self {
            surface,
            config,
            renderer,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32, scale_factor: f64) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.reconfigure();
        }
        self.renderer
            .resize(SurfaceInfo::new(width, height, scale_factor));
    }

    /// Re-applies the current configuration after the surface was lost or
    /// outdated.
    pub fn reconfigure(&mut self) {
        self.surface
            .configure(&self.renderer.context.device, &self.config);
    }
}
