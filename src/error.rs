use std::{error, fmt};

/// Errors raised while mapping, merging or extracting Adam7 passes.
///
/// All of them are structural: a call that returns one of these has not written any pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterlaceError {
    /// The pass index is not in `0..7`.
    OutOfRange(u8),
    /// A sub-matrix or scanline does not have the size the pass geometry asks for.
    DimensionMismatch {
        pass: u8,
        expected: (u32, u32),
        found: (u32, u32),
    },
    /// The pixel count of a `width x height` matrix can not be represented, or the supplied
    /// pixel buffer does not hold exactly `width * height` pixels.
    InvalidDimensions { width: u32, height: u32, len: usize },
    /// A scanline index past the last line of its pass.
    LineOutOfRange { pass: u8, line: u32, lines: u32 },
    /// A pass-local coordinate whose image coordinate does not fit in a `u32`.
    CoordinateOverflow { pass: u8, x: u32, y: u32 },
    /// A scanline arrived out of stream order: skipped ahead, repeated, or after its pass
    /// was already complete.
    UnexpectedLine { pass: u8, line: u32, expected: u32 },
}

impl error::Error for InterlaceError {}

impl fmt::Display for InterlaceError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::OutOfRange(pass) => {
                write!(fmt, "Adam7 pass index {} is not in the range 0..7", pass)
            }
            Self::DimensionMismatch {
                pass,
                expected,
                found,
            } => write!(
                fmt,
                "Pass {} expects {}x{} pixels, found {}x{}",
                pass, expected.0, expected.1, found.0, found.1
            ),
            Self::InvalidDimensions { width, height, len } => write!(
                fmt,
                "Invalid dimensions {}x{} for a buffer of {} pixels",
                width, height, len
            ),
            Self::LineOutOfRange { pass, line, lines } => write!(
                fmt,
                "Line {} of pass {} is out of range, the pass has {} lines",
                line, pass, lines
            ),
            Self::CoordinateOverflow { pass, x, y } => write!(
                fmt,
                "Coordinate ({}, {}) of pass {} overflows the image coordinate space",
                x, y, pass
            ),
            Self::UnexpectedLine {
                pass,
                line,
                expected,
            } => write!(
                fmt,
                "Expected line {} of pass {}, found line {}",
                expected, pass, line
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_values() {
        let err = InterlaceError::DimensionMismatch {
            pass: 3,
            expected: (2, 2),
            found: (1, 1),
        };
        assert_eq!(err.to_string(), "Pass 3 expects 2x2 pixels, found 1x1");
        assert_eq!(
            InterlaceError::OutOfRange(7).to_string(),
            "Adam7 pass index 7 is not in the range 0..7"
        );
    }
}
