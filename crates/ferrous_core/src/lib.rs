//! Shared GPU context and basic value types for FerrousEngine.

pub mod color;
pub mod context;

pub use color::Color;
pub use context::{instance, ContextError, EngineContext};
pub use glam;
