/// Composite pass. Resolves the accumulation target onto the surface with
/// a single 4-vertex triangle-strip draw.
///
/// The bind group references the accumulation texture, so it is rebuilt in
/// `on_resize` whenever the target is recreated.
use std::sync::Arc;

use wgpu::{
    CommandEncoder, Device, LoadOp, Operations, Queue, RenderPassColorAttachment,
    RenderPassDescriptor, StoreOp,
};

use crate::geometry::COMPOSITE_QUAD;
use crate::graph::{FramePacket, FrameTargets, RenderPass, TextStyle};
use crate::pipeline::CompositePipeline;
use crate::render_target::AccumulationTarget;
use crate::resources::buffer;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct CompositeUniform {
    text_color: [f32; 4],
    background: [f32; 4],
}

impl From<&TextStyle> for CompositeUniform {
    fn from(style: &TextStyle) -> Self {
        Self {
            text_color: style.text_color.to_array(),
            background: style.background.to_array(),
        }
    }
}

pub struct CompositePass {
    pipeline: CompositePipeline,
    layout: Arc<wgpu::BindGroupLayout>,
    quad: Arc<wgpu::Buffer>,
    style_buffer: Arc<wgpu::Buffer>,
    bind_group: wgpu::BindGroup,
    clear_color: wgpu::Color,
}

impl CompositePass {
    pub fn new(
        device: &Device,
        pipeline: CompositePipeline,
        layout: Arc<wgpu::BindGroupLayout>,
        target: &AccumulationTarget,
    ) -> Self {
        let quad = buffer::create_vertex(device, "Composite Quad", &COMPOSITE_QUAD);
        let style = TextStyle::default();
        let style_buffer =
            buffer::create_uniform(device, "Composite Style", &CompositeUniform::from(&style));
        let bind_group = Self::create_bind_group(device, &layout, target, &style_buffer);

        Self {
            pipeline,
            layout,
            quad,
            style_buffer,
            bind_group,
            clear_color: style.background.to_wgpu(),
        }
    }

    fn create_bind_group(
        device: &Device,
        layout: &wgpu::BindGroupLayout,
        target: &AccumulationTarget,
        style_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Composite Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&target.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&target.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: style_buffer.as_entire_binding(),
                },
            ],
        })
    }
}

impl RenderPass for CompositePass {
    fn name(&self) -> &str {
        "Composite Pass"
    }

    fn on_resize(&mut self, device: &Device, target: &AccumulationTarget) {
        self.bind_group =
            Self::create_bind_group(device, &self.layout, target, &self.style_buffer);
    }

    fn prepare(&mut self, _device: &Device, queue: &Queue, packet: &FramePacket) {
        let uniform = CompositeUniform::from(&packet.style);
        buffer::update_uniform(queue, &self.style_buffer, &uniform);
        self.clear_color = packet.style.background.to_wgpu();
    }

    fn execute(
        &mut self,
        encoder: &mut CommandEncoder,
        targets: &FrameTargets<'_>,
        _packet: &FramePacket,
    ) {
        let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some(self.name()),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: targets.surface,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(self.clear_color),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        rpass.set_pipeline(&self.pipeline.inner);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad.slice(..));
        rpass.draw(0..COMPOSITE_QUAD.len() as u32, 0..1);
    }
}
