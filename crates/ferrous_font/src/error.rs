use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OutlineError {
    /// The outline contains a command the triangulator cannot express
    /// (cubic curves).
    #[error("unsupported outline command \"{command}\" in glyph {ch:?}")]
    UnsupportedCommand { ch: char, command: &'static str },
    /// Zero, negative or non-finite units-per-em would turn every laid-out
    /// coordinate into NaN or infinity.
    #[error("units per em must be finite and positive, got {0}")]
    InvalidUnitsPerEm(f32),
    #[error("no glyph for {0:?}")]
    MissingGlyph(char),
    #[error("could not read font data: {0}")]
    InvalidFont(String),
    #[error("could not draw outline of {ch:?}: {reason}")]
    Draw { ch: char, reason: String },
}
