pub mod buffer;
pub mod pass_uniforms;

pub use pass_uniforms::PassUniformBuffer;
