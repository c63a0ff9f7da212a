//! Linearizes per-glyph outlines into one positioned instruction stream.
//!
//! Glyph outlines arrive in em units relative to their own origin.  The
//! compiler lays them out left to right: every X coordinate of a glyph is
//! shifted by the running advance (font units) divided by units-per-em, then
//! the advance grows by that glyph's advance width.

use glam::Vec2;

use crate::error::OutlineError;
use crate::path::{Glyph, GlyphCommand, Instruction, InstructionStream};
use crate::provider::OutlineProvider;

/// Units-per-em used when the caller has no font header to ask.
pub const DEFAULT_UNITS_PER_EM: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineCompiler {
    units_per_em: f32,
}

impl Default for OutlineCompiler {
    fn default() -> Self {
        Self {
            units_per_em: DEFAULT_UNITS_PER_EM,
        }
    }
}

impl OutlineCompiler {
    /// Fails unless `units_per_em` is finite and positive; every advance is
    /// divided by it.
    pub fn new(units_per_em: f32) -> Result<Self, OutlineError> {
        if !units_per_em.is_finite() || units_per_em <= 0.0 {
            return Err(OutlineError::InvalidUnitsPerEm(units_per_em));
        }
        Ok(Self { units_per_em })
    }

    pub fn units_per_em(&self) -> f32 {
        self.units_per_em
    }

    /// Compiles `glyphs` in order into a single stream.
    ///
    /// The whole call fails on the first unsupported command; no partial
    /// stream is returned.
    pub fn compile(&self, glyphs: &[Glyph]) -> Result<InstructionStream, OutlineError> {
        let mut stream = Vec::with_capacity(glyphs.iter().map(|g| g.outline.len()).sum());
        let mut current_advance = 0.0f32;

        for glyph in glyphs {
            let dx = current_advance / self.units_per_em;
            for cmd in &glyph.outline {
                stream.push(translate(glyph.ch, cmd, dx)?);
            }
            current_advance += glyph.advance_width;
        }

        Ok(stream)
    }

    /// Looks up every `char` of `text` through `provider` and compiles the
    /// result.  Returns the glyph count alongside the stream.
    pub fn compile_text<P: OutlineProvider + ?Sized>(
        &self,
        provider: &P,
        text: &str,
    ) -> Result<(usize, InstructionStream), OutlineError> {
        let glyphs = text
            .chars()
            .map(|ch| provider.glyph(ch))
            .collect::<Result<Vec<_>, _>>()?;
        let stream = self.compile(&glyphs)?;
        log::debug!(
            "compiled {:?}: {} glyphs -> {} instructions",
            text,
            glyphs.len(),
            stream.len()
        );
        Ok((glyphs.len(), stream))
    }
}

fn translate(ch: char, cmd: &GlyphCommand, dx: f32) -> Result<Instruction, OutlineError> {
    let at = |x: f32, y: f32| Vec2::new(x + dx, y);
    match *cmd {
        GlyphCommand::MoveTo(x, y) => Ok(Instruction::MoveTo(at(x, y))),
        GlyphCommand::LineTo(x, y) => Ok(Instruction::LineTo(at(x, y))),
        GlyphCommand::QuadTo {
            ctrl_x,
            ctrl_y,
            to_x,
            to_y,
        } => Ok(Instruction::QuadTo {
            ctrl: at(ctrl_x, ctrl_y),
            to: at(to_x, to_y),
        }),
        GlyphCommand::Close => Ok(Instruction::Close),
        GlyphCommand::CubicTo { .. } => Err(OutlineError::UnsupportedCommand {
            ch,
            command: cmd.tag(),
        }),
    }
}
