/// Jittered accumulation pass.
///
/// Clears the accumulation target, then draws the whole triangle batch once
/// per planned jitter pass.  Each draw selects its own slot of the pass
/// uniform buffer (transform + channel) through a dynamic offset; additive
/// blending sums the draws.
use std::sync::Arc;

use wgpu::{
    Color, CommandEncoder, Device, LoadOp, Operations, Queue, RenderPassColorAttachment,
    RenderPassDescriptor, StoreOp,
};

use crate::graph::{FramePacket, FrameTargets, RenderPass};
use crate::pipeline::CoveragePipeline;
use crate::resources::PassUniformBuffer;

pub struct AccumulatePass {
    pipeline: CoveragePipeline,
    pass_layout: Arc<wgpu::BindGroupLayout>,
    uniforms: PassUniformBuffer,
}

impl AccumulatePass {
    pub fn new(
        device: &Device,
        pipeline: CoveragePipeline,
        pass_layout: Arc<wgpu::BindGroupLayout>,
        pass_count: usize,
    ) -> Self {
        let uniforms = PassUniformBuffer::new(device, &pass_layout, pass_count);
        Self {
            pipeline,
            pass_layout,
            uniforms,
        }
    }
}

impl RenderPass for AccumulatePass {
    fn name(&self) -> &str {
        "Jitter Accumulate Pass"
    }

    fn prepare(&mut self, device: &Device, queue: &Queue, packet: &FramePacket) {
        self.uniforms
            .ensure_capacity(device, &self.pass_layout, packet.passes.len());
        for pass in &packet.passes {
            self.uniforms.write(queue, pass.index, &pass.uniform());
        }
    }

    fn execute(
        &mut self,
        encoder: &mut CommandEncoder,
        targets: &FrameTargets<'_>,
        packet: &FramePacket,
    ) {
        let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some(self.name()),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: targets.accumulation,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(Color::TRANSPARENT),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        let Some(batch) = &packet.triangles else {
            return;
        };

        rpass.set_pipeline(&self.pipeline.inner);
        rpass.set_vertex_buffer(0, batch.vertex_buffer.slice(..));

        for pass in &packet.passes {
            let offset = self.uniforms.offset(pass.index);
            rpass.set_bind_group(0, &*self.uniforms.bind_group, &[offset]);
            rpass.draw(0..batch.vertex_count, 0..1);
        }
    }
}
