//! Glyph outlines for FerrousEngine's vector text renderer.
//!
//! Providers turn characters into [`Glyph`]s (path commands in em units plus
//! an advance width); [`OutlineCompiler`] lays a string of glyphs out into
//! one [`InstructionStream`] that the renderer triangulates.

pub mod compiler;
pub mod error;
#[cfg(feature = "skrifa")]
pub mod font;
pub mod path;
pub mod provider;

pub use compiler::{OutlineCompiler, DEFAULT_UNITS_PER_EM};
pub use error::OutlineError;
#[cfg(feature = "skrifa")]
pub use font::FontOutlines;
pub use path::{Glyph, GlyphCommand, GlyphOutline, Instruction, InstructionStream};
pub use provider::{tofu_outline, GlyphTable, OutlineProvider};
