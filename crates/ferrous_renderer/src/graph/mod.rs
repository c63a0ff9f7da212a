pub mod frame_packet;
pub mod pass_trait;

pub use frame_packet::{FramePacket, FrameTargets, TextStyle, TriangleBatch};
pub use pass_trait::RenderPass;
