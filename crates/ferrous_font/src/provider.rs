use std::collections::HashMap;

use crate::compiler::DEFAULT_UNITS_PER_EM;
use crate::error::OutlineError;
use crate::path::{Glyph, GlyphCommand, GlyphOutline};

/// Supplies glyph outlines and advance widths for characters.
///
/// Outlines are in em units (y up); advance widths are in font design units
/// so the compiler can normalize them with [`OutlineProvider::units_per_em`].
pub trait OutlineProvider {
    fn glyph(&self, ch: char) -> Result<Glyph, OutlineError>;

    fn units_per_em(&self) -> f32;
}

/// Hand-built glyph set held in memory.
///
/// Characters without an entry resolve to the fallback glyph when one is
/// configured, otherwise to [`OutlineError::MissingGlyph`].
#[derive(Debug, Clone)]
pub struct GlyphTable {
    glyphs: HashMap<char, Glyph>,
    fallback: Option<(GlyphOutline, f32)>,
    units_per_em: f32,
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self::new(DEFAULT_UNITS_PER_EM)
    }
}

impl GlyphTable {
    pub fn new(units_per_em: f32) -> Self {
        Self {
            glyphs: HashMap::new(),
            fallback: None,
            units_per_em,
        }
    }

    /// Uses `outline` / `advance_width` for every character not in the table.
    pub fn with_fallback(mut self, outline: GlyphOutline, advance_width: f32) -> Self {
        self.fallback = Some((outline, advance_width));
        self
    }

    pub fn insert(&mut self, glyph: Glyph) {
        self.glyphs.insert(glyph.ch, glyph);
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl OutlineProvider for GlyphTable {
    fn glyph(&self, ch: char) -> Result<Glyph, OutlineError> {
        if let Some(glyph) = self.glyphs.get(&ch) {
            return Ok(glyph.clone());
        }
        match &self.fallback {
            Some((outline, advance)) => Ok(Glyph::new(ch, outline.clone(), *advance)),
            None => Err(OutlineError::MissingGlyph(ch)),
        }
    }

    fn units_per_em(&self) -> f32 {
        self.units_per_em
    }
}

/// A hollow box with one rounded corner, in em units.  Used as the
/// "missing glyph" shape when no font is available.
///
/// The outer contour runs counter-clockwise and the inner one clockwise so
/// the hole cancels out.
pub fn tofu_outline() -> GlyphOutline {
    vec![
        GlyphCommand::MoveTo(0.1, 0.0),
        GlyphCommand::LineTo(0.8, 0.0),
        GlyphCommand::QuadTo {
            ctrl_x: 0.9,
            ctrl_y: 0.0,
            to_x: 0.9,
            to_y: 0.1,
        },
        GlyphCommand::LineTo(0.9, 0.8),
        GlyphCommand::LineTo(0.1, 0.8),
        GlyphCommand::Close,
        GlyphCommand::MoveTo(0.2, 0.1),
        GlyphCommand::LineTo(0.2, 0.7),
        GlyphCommand::LineTo(0.8, 0.7),
        GlyphCommand::LineTo(0.8, 0.1),
        GlyphCommand::Close,
    ]
}
