//! Error type shared by the normal map stages.

/// Reasons why building, encoding or comparing a normal map may fail.
#[derive(Clone, Debug, PartialEq)]
pub enum NormalMapError {
    /// None of the four directional inputs was supplied.
    MissingInput,
    /// Inputs that must share one pixel grid differ; shapes are `(height, width)`.
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// The image adapter only encodes one (gray) or three (color) planes.
    InvalidShape { channels: usize },
    /// A plane is too large for an 8-bit raster; shape is `(height, width)`.
    TooLarge { shape: (usize, usize) },
    /// Depth must be a finite value in (0, 1].
    InvalidDepth { depth: f64 },
    /// The operation exists in the API but has no implementation.
    Unimplemented { operation: &'static str },
    /// Reading or writing a file failed; carries the formatted cause.
    Io(String),
}

impl std::fmt::Display for NormalMapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalMapError::MissingInput => {
                write!(f, "no directional image supplied (need top, bottom, left or right)")
            }
            NormalMapError::ShapeMismatch { expected, found } => write!(
                f,
                "image shape mismatch: expected {}x{}, found {}x{}",
                expected.1, expected.0, found.1, found.0
            ),
            NormalMapError::InvalidShape { channels } => {
                write!(f, "cannot build an image from {channels} planes (need 1 or 3)")
            }
            NormalMapError::TooLarge { shape } => write!(
                f,
                "{}x{} plane exceeds the image size limit of {} pixels per side",
                shape.1,
                shape.0,
                u32::MAX
            ),
            NormalMapError::InvalidDepth { depth } => {
                write!(f, "depth {depth} outside of (0, 1]")
            }
            NormalMapError::Unimplemented { operation } => {
                write!(f, "{operation} is not implemented")
            }
            NormalMapError::Io(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for NormalMapError {}

pub type Result<T> = std::result::Result<T, NormalMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_reports_width_by_height() {
        let err = NormalMapError::ShapeMismatch {
            expected: (2, 3),
            found: (4, 5),
        };
        assert_eq!(
            err.to_string(),
            "image shape mismatch: expected 3x2, found 5x4"
        );
    }
}
