/// The `RenderPass` trait: every stage of a text render implements this.
///
/// ## Two-phase design
/// `prepare` → `execute` lets passes upload GPU data **before** recording,
/// since buffer writes must be queued before the encoder that reads them is
/// submitted.
use wgpu::{CommandEncoder, Device, Queue};

use crate::graph::{FramePacket, FrameTargets};
use crate::render_target::AccumulationTarget;

pub trait RenderPass: Send + Sync + 'static {
    /// Short human-readable label used as the wgpu debug label.
    fn name(&self) -> &str;

    /// Called whenever the accumulation target is recreated.  Passes that
    /// bind it as a texture rebuild their bind groups here.
    #[allow(unused_variables)]
    fn on_resize(&mut self, device: &Device, target: &AccumulationTarget) {}

    /// Upload GPU data.  Called **before** `execute` each request.
    fn prepare(&mut self, device: &Device, queue: &Queue, packet: &FramePacket);

    /// Record draw commands into `encoder`.  Implementations open their own
    /// `wgpu::RenderPass` scope.
    fn execute(
        &mut self,
        encoder: &mut CommandEncoder,
        targets: &FrameTargets<'_>,
        packet: &FramePacket,
    );
}
