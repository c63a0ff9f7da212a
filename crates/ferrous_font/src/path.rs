//! Outline primitives shared by the providers, the compiler and the
//! renderer's triangulator.

use glam::Vec2;

/// A drawing command as reported by an outline provider.  Coordinates are in
/// em units (divide font units by units-per-em) and y increases upward.
///
/// `CubicTo` exists so providers can report CFF-style outlines faithfully;
/// the compiler rejects it.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum GlyphCommand {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    QuadTo {
        ctrl_x: f32,
        ctrl_y: f32,
        to_x: f32,
        to_y: f32,
    },
    CubicTo {
        ctrl0_x: f32,
        ctrl0_y: f32,
        ctrl1_x: f32,
        ctrl1_y: f32,
        to_x: f32,
        to_y: f32,
    },
    Close,
}

impl GlyphCommand {
    /// Short SVG-style tag, used in error messages.
    pub fn tag(&self) -> &'static str {
        match self {
            GlyphCommand::MoveTo(..) => "M",
            GlyphCommand::LineTo(..) => "L",
            GlyphCommand::QuadTo { .. } => "Q",
            GlyphCommand::CubicTo { .. } => "C",
            GlyphCommand::Close => "Z",
        }
    }
}

/// A glyph outline is just a sequence of path commands.
pub type GlyphOutline = Vec<GlyphCommand>;

/// One glyph as handed over by an [`crate::OutlineProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Character this glyph was looked up for.
    pub ch: char,
    pub outline: GlyphOutline,
    /// Horizontal advance in font design units.
    pub advance_width: f32,
}

impl Glyph {
    pub fn new(ch: char, outline: GlyphOutline, advance_width: f32) -> Self {
        Self {
            ch,
            outline,
            advance_width,
        }
    }
}

/// A positioned instruction in the compiled stream.  Only the four commands
/// the triangulator understands can be represented here.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Instruction {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
    Close,
}

impl Instruction {
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::MoveTo(_) => "move",
            Instruction::LineTo(_) => "line",
            Instruction::QuadTo { .. } => "quad",
            Instruction::Close => "close",
        }
    }
}

/// The flat instruction stream covering a whole rendered string.
pub type InstructionStream = Vec<Instruction>;
