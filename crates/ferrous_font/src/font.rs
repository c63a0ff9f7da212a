//! Font-file backed [`OutlineProvider`] built on `skrifa`.

use std::path::Path;

use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::{FontRef, GlyphId, MetadataProvider};

use crate::error::OutlineError;
use crate::path::{Glyph, GlyphCommand, GlyphOutline};
use crate::provider::OutlineProvider;

/// Owns the bytes of a TrueType / OpenType font and extracts unhinted
/// outlines from it on demand.
pub struct FontOutlines {
    data: Vec<u8>,
    units_per_em: f32,
}

impl FontOutlines {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, OutlineError> {
        let units_per_em = parse(&data)?
            .metrics(Size::unscaled(), LocationRef::default())
            .units_per_em;
        if units_per_em == 0 {
            return Err(OutlineError::InvalidFont(
                "font header declares 0 units per em".to_string(),
            ));
        }
        Ok(Self {
            data,
            units_per_em: units_per_em as f32,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, OutlineError> {
        let path = path.as_ref();
        let display = path.display();
        let data = std::fs::read(path)
            .map_err(|e| OutlineError::InvalidFont(format!("{display}: {e}")))?;
        log::debug!("loaded font {display} ({} bytes)", data.len());
        Self::from_bytes(data)
    }

    fn font(&self) -> Result<FontRef<'_>, OutlineError> {
        parse(&self.data)
    }
}

fn parse(data: &[u8]) -> Result<FontRef<'_>, OutlineError> {
    FontRef::new(data).map_err(|e| OutlineError::InvalidFont(e.to_string()))
}

impl OutlineProvider for FontOutlines {
    fn glyph(&self, ch: char) -> Result<Glyph, OutlineError> {
        let font = self.font()?;
        let glyph_id = font.charmap().map(ch).unwrap_or_else(|| {
            log::warn!("font has no glyph for {:?}, using .notdef", ch);
            GlyphId::NOTDEF
        });

        let mut pen = CommandPen::default();
        if let Some(outline) = font.outline_glyphs().get(glyph_id) {
            // One pixel per em: the pen receives coordinates in em units.
            let settings = DrawSettings::unhinted(Size::new(1.0), LocationRef::default());
            outline.draw(settings, &mut pen).map_err(|e| OutlineError::Draw {
                ch,
                reason: e.to_string(),
            })?;
        }

        let advance_width = font
            .glyph_metrics(Size::unscaled(), LocationRef::default())
            .advance_width(glyph_id)
            .unwrap_or(0.0);

        Ok(Glyph::new(ch, pen.finish(), advance_width))
    }

    fn units_per_em(&self) -> f32 {
        self.units_per_em
    }
}

/// Records skrifa pen callbacks as [`GlyphCommand`]s.  Cubic segments are
/// kept as-is so the compiler can reject them.
#[derive(Debug, Default)]
struct CommandPen {
    commands: GlyphOutline,
}

impl CommandPen {
    fn finish(self) -> GlyphOutline {
        self.commands
    }
}

impl OutlinePen for CommandPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(GlyphCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(GlyphCommand::LineTo(x, y));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.commands.push(GlyphCommand::QuadTo {
            ctrl_x: cx0,
            ctrl_y: cy0,
            to_x: x,
            to_y: y,
        });
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.commands.push(GlyphCommand::CubicTo {
            ctrl0_x: cx0,
            ctrl0_y: cy0,
            ctrl1_x: cx1,
            ctrl1_y: cy1,
            to_x: x,
            to_y: y,
        });
    }

    fn close(&mut self) {
        self.commands.push(GlyphCommand::Close);
    }
}
