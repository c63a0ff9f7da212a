use ferrous_font::OutlineError;
use thiserror::Error;

/// Every way a render request can fail.  None of them is recoverable for the
/// request that raised it; nothing is drawn.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unsupported outline command \"{command}\" in glyph {ch:?}")]
    UnsupportedCommand { ch: char, command: &'static str },
    #[error("{instruction} instruction at index {index} has no active contour")]
    MalformedStream {
        index: usize,
        instruction: &'static str,
    },
    /// Any other failure of the outline provider.
    #[error(transparent)]
    Outline(OutlineError),
    /// Adapter, device, shader or pipeline failure reported by wgpu.
    #[error("device failure: {0}")]
    DeviceFailure(String),
}

impl From<OutlineError> for RenderError {
    fn from(err: OutlineError) -> Self {
        match err {
            OutlineError::UnsupportedCommand { ch, command } => {
                RenderError::UnsupportedCommand { ch, command }
            }
            other => RenderError::Outline(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_command_keeps_its_identity() {
        let err: RenderError = OutlineError::UnsupportedCommand {
            ch: 'g',
            command: "C",
        }
        .into();
        assert!(matches!(
            err,
            RenderError::UnsupportedCommand {
                ch: 'g',
                command: "C",
            }
        ));
    }

    #[test]
    fn other_outline_errors_are_wrapped() {
        let err: RenderError = OutlineError::MissingGlyph('q').into();
        assert!(matches!(
            err,
            RenderError::Outline(OutlineError::MissingGlyph('q'))
        ));
        assert_eq!(err.to_string(), "no glyph for 'q'");
    }
}
