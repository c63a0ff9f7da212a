/// `ferrous_renderer`: jittered-coverage text rendering on wgpu.
///
/// # Module layout
///
/// | Module          | Responsibility                                        |
/// |-----------------|-------------------------------------------------------|
/// | `context`       | Re-exports `EngineContext`; headless constructor      |
/// | `resources`     | Buffer helpers, dynamic per-pass uniform buffer       |
/// | `geometry`      | Vertex types, fan triangulator                        |
/// | `jitter`        | Jitter pattern table and per-pass transforms          |
/// | `pipeline`      | Bind-group layouts + coverage / composite pipelines   |
/// | `render_target` | Off-screen float accumulation target                  |
/// | `graph`         | `RenderPass` trait + `FramePacket`                    |
/// | `passes`        | Built-in passes: `AccumulatePass`, `CompositePass`    |
pub mod context;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod jitter;
pub mod passes;
pub mod pipeline;
pub mod render_target;
pub mod resources;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use ferrous_core::Color;
pub use ferrous_font::{InstructionStream, OutlineProvider};
pub use glam;

pub use context::EngineContext;
pub use error::RenderError;
pub use geometry::{GlyphVertex, Triangle, TriangleKind};
pub use graph::{FramePacket, RenderPass, TextStyle};
pub use jitter::{Channel, JitterSample, JitterSampler, SamplerConfig, SurfaceInfo, JITTER_PATTERN};
pub use render_target::AccumulationTarget;

// ── Internal imports ──────────────────────────────────────────────────────────

use std::sync::Arc;

use ferrous_font::OutlineCompiler;

use graph::{FrameTargets, TriangleBatch};
use passes::{AccumulatePass, CompositePass};
use pipeline::{CompositePipeline, CoveragePipeline, PipelineLayouts};
use resources::buffer;

/// Counters describing one render request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub glyphs: usize,
    pub instructions: usize,
    pub triangles: usize,
    pub passes: usize,
}

/// CPU half of a render request: the laid-out outline, triangulated.
#[derive(Debug, Clone, PartialEq)]
pub struct TextGeometry {
    pub glyphs: usize,
    pub instructions: usize,
    pub triangles: Vec<Triangle>,
}

/// Compiles `text` through `provider` and triangulates the resulting stream.
///
/// Either every glyph makes it into the result or the call fails.
pub fn tessellate<P: OutlineProvider + ?Sized>(
    provider: &P,
    text: &str,
) -> Result<TextGeometry, RenderError> {
    let compiler = OutlineCompiler::new(provider.units_per_em())?;
    let (glyphs, stream) = compiler.compile_text(provider, text)?;
    let triangles = geometry::triangulate(&stream)?;
    Ok(TextGeometry {
        glyphs,
        instructions: stream.len(),
        triangles,
    })
}

// ── TextRenderer ──────────────────────────────────────────────────────────────

/// Top-level renderer.
///
/// Owns the accumulation target and executes its [`RenderPass`] stages each
/// request using the two-phase **prepare → execute** pattern: the jittered
/// accumulation pass first, then the composite pass onto the caller's view.
pub struct TextRenderer {
    pub context: EngineContext,
    pub target: AccumulationTarget,
    /// Ordered list of passes executed every request.
    passes: Vec<Box<dyn RenderPass>>,
    sampler: JitterSampler,
    surface: SurfaceInfo,
    style: TextStyle,
}

impl TextRenderer {
    /// Builds both pipelines for `format` and an accumulation target sized to
    /// `surface`.
    ///
    /// Shader and pipeline validation errors are captured and returned as
    /// [`RenderError::DeviceFailure`].
    pub async fn new(
        context: EngineContext,
        surface: SurfaceInfo,
        format: wgpu::TextureFormat,
        config: SamplerConfig,
    ) -> Result<Self, RenderError> {
        if surface.is_empty() {
            log::warn!(
                "text renderer created for a {}x{} surface; drawing at 1x1 until resized",
                surface.width,
                surface.height
            );
        }

        let sampler = JitterSampler::new(config);
        let device = context.device.clone();

        let scope = ErrorScope::push(&device);

        let target = AccumulationTarget::new(&device, surface.width, surface.height);
        let layouts = PipelineLayouts::new(&device);
        let coverage = CoveragePipeline::new(&device, &layouts);
        let composite = CompositePipeline::new(&device, format, &layouts);

        let accumulate_pass =
            AccumulatePass::new(&device, coverage, layouts.pass.clone(), sampler.pass_count());
        let composite_pass =
            CompositePass::new(&device, composite, layouts.composite.clone(), &target);

        scope.pop().await?;

        log::debug!(
            "text renderer ready: {}x{} @ {}x, {} jitter passes, surface format {:?}",
            surface.width,
            surface.height,
            surface.scale_factor,
            sampler.pass_count(),
            format
        );

        let passes: Vec<Box<dyn RenderPass>> =
            vec![Box::new(accumulate_pass), Box::new(composite_pass)];

        Ok(Self {
            context,
            target,
            passes,
            sampler,
            surface,
            style: TextStyle::default(),
        })
    }

    // ── Frame API ─────────────────────────────────────────────────────────────

    /// Renders `text` and composites it onto `view`, then submits the work.
    ///
    /// All CPU work (outline compilation, triangulation) runs before any GPU
    /// resource is touched.  Validation and out-of-memory errors raised while
    /// uploading, recording or submitting are returned as
    /// [`RenderError::DeviceFailure`].
    pub async fn render<P: OutlineProvider + ?Sized>(
        &mut self,
        view: &wgpu::TextureView,
        provider: &P,
        text: &str,
    ) -> Result<FrameStats, RenderError> {
        let tessellation = tessellate(provider, text)?;
        if tessellation.triangles.is_empty() {
            log::warn!("{:?} produced no triangles; drawing background only", text);
        }

        let device = self.context.device.clone();
        let scope = ErrorScope::push(&device);

        let vertices = geometry::pack_vertices(&tessellation.triangles);
        let triangles = (!vertices.is_empty()).then(|| TriangleBatch {
            vertex_buffer: buffer::create_vertex(&device, "Glyph Triangles", &vertices),
            vertex_count: vertices.len() as u32,
        });

        let packet = FramePacket {
            triangles,
            passes: self.sampler.plan(self.surface),
            style: self.style,
        };

        let targets = FrameTargets {
            accumulation: &self.target.view,
            surface: view,
        };

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Text Frame Encoder"),
        });
        for pass in &mut self.passes {
            pass.prepare(&device, &self.context.queue, &packet);
            pass.execute(&mut encoder, &targets, &packet);
        }
        self.context.queue.submit(Some(encoder.finish()));

        scope.pop().await?;

        let stats = FrameStats {
            glyphs: tessellation.glyphs,
            instructions: tessellation.instructions,
            triangles: tessellation.triangles.len(),
            passes: packet.passes.len(),
        };
        log::debug!("rendered {:?}: {:?}", text, stats);
        Ok(stats)
    }

    // ── Resize / style ────────────────────────────────────────────────────────

    /// Follows a surface size or pixel-ratio change.  The accumulation
    /// target is only recreated when the physical size differs.
    pub fn resize(&mut self, surface: SurfaceInfo) {
        if surface.is_empty() {
            log::warn!("ignoring resize to {}x{}", surface.width, surface.height);
            return;
        }
        self.surface = surface;
        if self
            .target
            .resize(&self.context.device, surface.width, surface.height)
        {
            for pass in &mut self.passes {
                pass.on_resize(&self.context.device, &self.target);
            }
        }
    }

    pub fn surface(&self) -> SurfaceInfo {
        self.surface
    }

    pub fn set_style(&mut self, style: TextStyle) {
        self.style = style;
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    pub fn sampler(&self) -> &JitterSampler {
        &self.sampler
    }
}

/// Validation and out-of-memory error scopes around a block of GPU work.
struct ErrorScope {
    device: Arc<wgpu::Device>,
}

impl ErrorScope {
    fn push(device: &Arc<wgpu::Device>) -> Self {
        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        Self {
            device: device.clone(),
        }
    }

    async fn pop(self) -> Result<(), RenderError> {
        let validation = self.device.pop_error_scope().await;
        let out_of_memory = self.device.pop_error_scope().await;
        match validation.or(out_of_memory) {
            Some(err) => Err(RenderError::DeviceFailure(err.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrous_font::{Glyph, GlyphCommand, GlyphTable};

    fn table() -> GlyphTable {
        let mut table = GlyphTable::new(1000.0);
        // Right triangle: three edges, one solid triangle.
        table.insert(Glyph::new(
            'v',
            vec![
                GlyphCommand::MoveTo(0.0, 0.0),
                GlyphCommand::LineTo(0.5, 0.0),
                GlyphCommand::LineTo(0.0, 0.5),
                GlyphCommand::Close,
            ],
            600.0,
        ));
        // A bowl: one line and one curve.
        table.insert(Glyph::new(
            'o',
            vec![
                GlyphCommand::MoveTo(0.0, 0.0),
                GlyphCommand::LineTo(0.5, 0.0),
                GlyphCommand::QuadTo {
                    ctrl_x: 0.5,
                    ctrl_y: 0.5,
                    to_x: 0.0,
                    to_y: 0.5,
                },
                GlyphCommand::Close,
            ],
            500.0,
        ));
        table.insert(Glyph::new(
            's',
            vec![
                GlyphCommand::MoveTo(0.0, 0.0),
                GlyphCommand::CubicTo {
                    ctrl0_x: 0.1,
                    ctrl0_y: 0.2,
                    ctrl1_x: 0.3,
                    ctrl1_y: 0.4,
                    to_x: 0.5,
                    to_y: 0.0,
                },
            ],
            500.0,
        ));
        table
    }

    #[test]
    fn tessellate_counts_glyphs_and_triangles() {
        let geometry = tessellate(&table(), "vo").unwrap();
        assert_eq!(geometry.glyphs, 2);
        assert_eq!(geometry.instructions, 8);
        // 'v': one solid.  'o': one solid + one curve.
        assert_eq!(geometry.triangles.len(), 3);
        assert_eq!(geometry.triangles[2].kind, TriangleKind::QuadraticCurve);
    }

    #[test]
    fn tessellate_lays_out_second_glyph() {
        let geometry = tessellate(&table(), "vv").unwrap();
        let second = &geometry.triangles[1];
        assert_eq!(second.positions[0], glam::Vec2::new(0.6, 0.0));
    }

    #[test]
    fn tessellate_rejects_cubic_glyph() {
        let err = tessellate(&table(), "vs").unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnsupportedCommand {
                ch: 's',
                command: "C",
            }
        ));
    }

    #[test]
    fn tessellate_reports_missing_glyph() {
        let err = tessellate(&table(), "x").unwrap_err();
        assert!(matches!(err, RenderError::Outline(_)));
    }

    #[test]
    fn empty_text_is_empty_geometry() {
        let geometry = tessellate(&table(), "").unwrap();
        assert_eq!(geometry.glyphs, 0);
        assert!(geometry.triangles.is_empty());
    }

    #[test]
    fn tessellate_rejects_zero_units_per_em() {
        let table = GlyphTable::new(0.0).with_fallback(ferrous_font::tofu_outline(), 500.0);
        let err = tessellate(&table, "a").unwrap_err();
        assert!(matches!(
            err,
            RenderError::Outline(ferrous_font::OutlineError::InvalidUnitsPerEm(_))
        ));
    }

    // ── GPU tests ─────────────────────────────────────────────────────────────

    const SIZE: u32 = 64;
    const OUTPUT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// A right triangle of two em with its hypotenuse bowed outward by a
    /// quadratic: one solid fan triangle and one curve triangle.
    fn bowl_table() -> GlyphTable {
        let mut table = GlyphTable::new(1000.0);
        table.insert(Glyph::new(
            'd',
            vec![
                GlyphCommand::MoveTo(0.0, 0.0),
                GlyphCommand::LineTo(2.0, 0.0),
                GlyphCommand::QuadTo {
                    ctrl_x: 2.0,
                    ctrl_y: 2.0,
                    to_x: 0.0,
                    to_y: 2.0,
                },
                GlyphCommand::Close,
            ],
            0.0,
        ));
        table
    }

    async fn renderer(size: u32) -> TextRenderer {
        let context = context::headless().await.unwrap();
        let surface = SurfaceInfo::new(size, size, 1.0);
        TextRenderer::new(context, surface, OUTPUT_FORMAT, SamplerConfig::default())
            .await
            .unwrap()
    }

    fn output_texture(renderer: &TextRenderer, usage: wgpu::TextureUsages) -> wgpu::Texture {
        let device = &renderer.context.device;
        device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Test Output"),
            size: wgpu::Extent3d {
                width: SIZE,
                height: SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OUTPUT_FORMAT,
            usage,
            view_formats: &[],
        })
    }

    /// Copies a `SIZE`x`SIZE` texture into CPU memory, row by row.  Rows of
    /// 4- and 8-byte texels are already 256-byte aligned at this width.
    fn read_back(renderer: &TextRenderer, texture: &wgpu::Texture, texel_size: u32) -> Vec<u8> {
        let device = &renderer.context.device;
        let bytes_per_row = SIZE * texel_size;
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Readback Buffer"),
            size: (bytes_per_row * SIZE) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Readback Encoder"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: None,
                },
            },
            texture.size(),
        );
        renderer.context.queue.submit(Some(encoder.finish()));

        let slice = buffer.slice(..);
        slice.map_async(wgpu::MapMode::Read, |_| {});
        device.poll(wgpu::Maintain::Wait);
        let data = slice.get_mapped_range().to_vec();
        buffer.unmap();
        data
    }

    /// Accumulated RGB of the texel at `(col, row)`.
    fn accumulated(texels: &[u8], col: u32, row: u32) -> [f32; 3] {
        let start = ((row * SIZE + col) * 8) as usize;
        std::array::from_fn(|c| {
            let bits = u16::from_le_bytes([texels[start + 2 * c], texels[start + 2 * c + 1]]);
            half::f16::from_bits(bits).to_f32()
        })
    }

    #[test]
    #[ignore = "requires a GPU adapter"]
    fn renders_offscreen() {
        pollster::block_on(async {
            let mut renderer = renderer(SIZE).await;
            let output = output_texture(
                &renderer,
                wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            );
            let view = output.create_view(&wgpu::TextureViewDescriptor::default());

            let stats = renderer.render(&view, &bowl_table(), "d").await.unwrap();
            assert_eq!(stats.passes, 6);
            assert_eq!(stats.triangles, 2);

            // Clip (x, y) maps to texel (floor((x + 1) * 32), floor((1 - y) * 32));
            // em coordinates are scaled by 0.4 on the way to clip space.
            let acc = read_back(&renderer, &renderer.target.texture, 8);
            let fan_interior = accumulated(&acc, 38, 25); // em (0.51, 0.51)
            let curve_bulge = accumulated(&acc, 48, 15); // em (1.29, 1.29)
            let past_curve = accumulated(&acc, 56, 7); // em (1.91, 1.91)
            let outside = accumulated(&acc, 16, 48); // em (-1.2, -1.2)

            for channel in fan_interior.iter().chain(&curve_bulge) {
                assert!((channel.abs() - 2.0).abs() < 1e-3, "{channel}");
            }
            for channel in past_curve.iter().chain(&outside) {
                assert_eq!(*channel, 0.0);
            }

            // Black text on white.
            let out = read_back(&renderer, &output, 4);
            let texel = |col: u32, row: u32| out[((row * SIZE + col) * 4) as usize];
            assert_eq!(texel(38, 25), 0);
            assert_eq!(texel(48, 15), 0);
            assert_eq!(texel(56, 7), 255);
            assert_eq!(texel(16, 48), 255);

            renderer.resize(SurfaceInfo::new(128, 64, 2.0));
            assert_eq!(renderer.target.size(), (128, 64));
        });
    }

    #[test]
    #[ignore = "requires a GPU adapter"]
    fn invalid_view_is_a_device_failure() {
        pollster::block_on(async {
            let mut renderer = renderer(SIZE).await;
            // Not a render attachment.
            let output = output_texture(&renderer, wgpu::TextureUsages::TEXTURE_BINDING);
            let view = output.create_view(&wgpu::TextureViewDescriptor::default());

            let err = renderer.render(&view, &bowl_table(), "d").await.unwrap_err();
            assert!(matches!(err, RenderError::DeviceFailure(_)));
        });
    }

    #[test]
    #[ignore = "requires a GPU adapter"]
    fn empty_surface_still_renders() {
        pollster::block_on(async {
            let mut renderer = renderer(0).await;
            assert_eq!(renderer.target.size(), (0, 0));
            let output = output_texture(&renderer, wgpu::TextureUsages::RENDER_ATTACHMENT);
            let view = output.create_view(&wgpu::TextureViewDescriptor::default());
            assert!(renderer.render(&view, &bowl_table(), "d").await.is_ok());
        });
    }
}
