/// Data bundle assembled once per render request and passed immutably to
/// every `RenderPass`.
///
/// Building the packet on the CPU side keeps the outline and triangulation
/// work out of the passes: they only see GPU handles and the jitter plan.
use std::sync::Arc;

use ferrous_core::Color;

use crate::jitter::PassConfig;

/// The triangle buffer of one render request, already uploaded.
pub struct TriangleBatch {
    pub vertex_buffer: Arc<wgpu::Buffer>,
    /// Number of vertices (three per triangle).
    pub vertex_count: u32,
}

/// Colours the compositor resolves coverage into.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub text_color: Color,
    pub background: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            text_color: Color::BLACK,
            background: Color::WHITE,
        }
    }
}

/// All data a `RenderPass` may need for one render request.
pub struct FramePacket {
    /// `None` when the text produced no triangles; the target is still
    /// cleared and composited.
    pub triangles: Option<TriangleBatch>,
    pub passes: Vec<PassConfig>,
    pub style: TextStyle,
}

/// Views a pass may render into.
pub struct FrameTargets<'a> {
    pub accumulation: &'a wgpu::TextureView,
    pub surface: &'a wgpu::TextureView,
}
