//! Geometry of [the Adam7 algorithm](https://en.wikipedia.org/wiki/Adam7_algorithm).
//!
//! Passes are numbered `0..7`. Pass `p` holds the pixels at `x = x_offset + i * x_multiplier`,
//! `y = y_offset + j * y_multiplier`; the seven strided subsets partition the image.

use crate::error::InterlaceError;

/// Number of Adam7 passes.
pub const PASS_COUNT: u8 = 7;

/// Constant offset/stride pair that maps a pass-local coordinate into the full image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PassTransform {
    pub x_offset: u32,
    pub y_offset: u32,
    pub x_multiplier: u32,
    pub y_multiplier: u32,
}

const fn transform(
    x_offset: u32,
    x_multiplier: u32,
    y_offset: u32,
    y_multiplier: u32,
) -> PassTransform {
    PassTransform {
        x_offset,
        y_offset,
        x_multiplier,
        y_multiplier,
    }
}

pub(crate) static ADAM7: [PassTransform; PASS_COUNT as usize] = [
    transform(0, 8, 0, 8),
    transform(4, 8, 0, 8),
    transform(0, 4, 4, 8),
    transform(2, 4, 0, 4),
    transform(0, 2, 2, 4),
    transform(1, 2, 0, 2),
    transform(0, 1, 1, 2),
];

/// The pass (0-based) owning each position of an 8x8 tile.
/// The pattern is:
///     05353535
///     66666666
///     45454545
///     66666666
///     25352535
///     66666666
///     45454545
///     66666666
const PATTERN: [[u8; 8]; 8] = [
    [0, 5, 3, 5, 1, 5, 3, 5],
    [6, 6, 6, 6, 6, 6, 6, 6],
    [4, 5, 4, 5, 4, 5, 4, 5],
    [6, 6, 6, 6, 6, 6, 6, 6],
    [2, 5, 3, 5, 2, 5, 3, 5],
    [6, 6, 6, 6, 6, 6, 6, 6],
    [4, 5, 4, 5, 4, 5, 4, 5],
    [6, 6, 6, 6, 6, 6, 6, 6],
];

/// Length of a pass along one axis: `ceil((dimension - offset) / multiplier)`, or 0 when the
/// pass starts past the end of the image.
#[inline]
fn axis_len(dimension: u32, offset: u32, multiplier: u32) -> u32 {
    if dimension <= offset {
        0
    } else {
        (dimension - offset).div_ceil(multiplier)
    }
}

impl PassTransform {
    /// `(sub_width, sub_height)` of this pass for a `width x height` image.
    #[inline]
    pub fn sub_size(&self, width: u32, height: u32) -> (u32, u32) {
        (
            axis_len(width, self.x_offset, self.x_multiplier),
            axis_len(height, self.y_offset, self.y_multiplier),
        )
    }

    /// Image coordinate of a pass-local coordinate, or `None` if it does not fit in a `u32`.
    #[inline]
    pub fn to_full(&self, sub_x: u32, sub_y: u32) -> Option<(u32, u32)> {
        let x = sub_x
            .checked_mul(self.x_multiplier)?
            .checked_add(self.x_offset)?;
        let y = sub_y
            .checked_mul(self.y_multiplier)?
            .checked_add(self.y_offset)?;
        Some((x, y))
    }

    /// Whether row `y` of the full image carries pixels of this pass.
    #[cfg(feature = "rayon")]
    #[inline]
    pub(crate) fn covers_row(&self, y: u32) -> bool {
        y >= self.y_offset && (y - self.y_offset) % self.y_multiplier == 0
    }
}

/// Offset and multiplier of both axes for `pass`.
///
/// ```
/// let t = adam7::multiplier_offset(3).unwrap();
/// assert_eq!((t.x_offset, t.y_offset, t.x_multiplier, t.y_multiplier), (2, 0, 4, 4));
/// assert!(adam7::multiplier_offset(7).is_err());
/// ```
pub fn multiplier_offset(pass: u8) -> Result<PassTransform, InterlaceError> {
    ADAM7
        .get(usize::from(pass))
        .copied()
        .ok_or(InterlaceError::OutOfRange(pass))
}

/// `(sub_width, sub_height)` of a single pass.
pub fn pass_size(pass: u8, width: u32, height: u32) -> Result<(u32, u32), InterlaceError> {
    Ok(multiplier_offset(pass)?.sub_size(width, height))
}

/// `(sub_width, sub_height)` of all seven passes, in pass order.
///
/// The pixel counts of the passes always add up to `width * height`.
pub fn pass_sizes(width: u32, height: u32) -> [(u32, u32); PASS_COUNT as usize] {
    ADAM7.map(|t| t.sub_size(width, height))
}

/// Maps `(sub_x, sub_y)` of `pass` to its coordinate in the full image.
pub fn to_full_coordinate(pass: u8, sub_x: u32, sub_y: u32) -> Result<(u32, u32), InterlaceError> {
    multiplier_offset(pass)?
        .to_full(sub_x, sub_y)
        .ok_or(InterlaceError::CoordinateOverflow {
            pass,
            x: sub_x,
            y: sub_y,
        })
}

/// The inverse of [`to_full_coordinate`]: the pass owning an image coordinate and the
/// position of that pixel inside the pass.
pub fn to_pass_coordinate(full_x: u32, full_y: u32) -> (u8, u32, u32) {
    let pass = PATTERN[(full_y % 8) as usize][(full_x % 8) as usize];
    let t = ADAM7[usize::from(pass)];
    (
        pass,
        (full_x - t.x_offset) / t.x_multiplier,
        (full_y - t.y_offset) / t.y_multiplier,
    )
}

/// Describes one interlaced scanline: the row `line` of pass `pass`, `width` pixels wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowInfo {
    pub pass: u8,
    pub line: u32,
    pub width: u32,
}

/// Iterates over the scanlines of an interlaced image in the order they are stored in the
/// data stream: pass by pass, top to bottom. Passes that are empty in either direction have
/// no scanlines at all.
#[derive(Clone, Debug)]
pub struct PassRows {
    line: u32,
    lines: u32,
    line_width: u32,
    current_pass: u8,
    width: u32,
    height: u32,
}

impl PassRows {
    pub fn new(width: u32, height: u32) -> PassRows {
        let mut this = PassRows {
            line: 0,
            lines: 0,
            line_width: 0,
            current_pass: 0,
            width,
            height,
        };
        this.init_pass();
        this
    }

    /// Calculates the bounds of the current pass
    fn init_pass(&mut self) {
        let (line_width, lines) =
            ADAM7[usize::from(self.current_pass)].sub_size(self.width, self.height);
        self.line_width = line_width;
        self.lines = lines;
        self.line = 0;
    }
}

impl Iterator for PassRows {
    type Item = RowInfo;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.line < self.lines && self.line_width > 0 {
                let this_line = self.line;
                self.line += 1;
                return Some(RowInfo {
                    pass: self.current_pass,
                    line: this_line,
                    width: self.line_width,
                });
            } else if self.current_pass + 1 < PASS_COUNT {
                self.current_pass += 1;
                self.init_pass();
            } else {
                return None;
            }
        }
    }
}
