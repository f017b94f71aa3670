//! Moving pixels between the full image and the seven pass sub-images.
//!
//! Decoding merges each pass (or each interlaced scanline) into the full image, encoding
//! extracts the passes back out of it. Both directions are driven by the constant
//! [`PassTransform`] of a pass, so the functions here are free of state; [`Deinterlacer`]
//! only adds bookkeeping of which passes have arrived.

use bitflags::bitflags;
use log::{debug, trace};

use crate::adam7::{multiplier_offset, PassTransform, RowInfo, ADAM7, PASS_COUNT};
use crate::error::InterlaceError;
use crate::matrix::PixelMatrix;

bitflags! {
    /// A set of Adam7 passes.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Passes: u8 {
        const PASS_0 = 1 << 0;
        const PASS_1 = 1 << 1;
        const PASS_2 = 1 << 2;
        const PASS_3 = 1 << 3;
        const PASS_4 = 1 << 4;
        const PASS_5 = 1 << 5;
        const PASS_6 = 1 << 6;
    }
}

impl Passes {
    /// The set containing only `pass`.
    pub fn from_pass(pass: u8) -> Result<Self, InterlaceError> {
        multiplier_offset(pass)?;
        Ok(Passes::from_bits_truncate(1 << pass))
    }

    /// The passes that hold no pixel at all for a `width x height` image.
    pub fn empty_for(width: u32, height: u32) -> Self {
        (0..PASS_COUNT)
            .zip(ADAM7.iter())
            .filter(|(_, t)| {
                let (w, h) = t.sub_size(width, height);
                w == 0 || h == 0
            })
            .fold(Passes::empty(), |set, (pass, _)| {
                set | Passes::from_bits_truncate(1 << pass)
            })
    }
}

/// Copies `line` into the pixels of `full_row` that belong to the pass of `t`.
#[inline]
fn write_row<P: Copy>(full_row: &mut [P], t: &PassTransform, line: &[P]) {
    let slots = full_row
        .iter_mut()
        .skip(t.x_offset as usize)
        .step_by(t.x_multiplier as usize);
    for (dst, &px) in slots.zip(line) {
        *dst = px;
    }
}

/// Gathers the pixels of `full_row` that belong to the pass of `t`.
#[inline]
fn read_row<'a, P: Copy>(full_row: &'a [P], t: &PassTransform) -> impl Iterator<Item = P> + 'a {
    full_row
        .iter()
        .skip(t.x_offset as usize)
        .step_by(t.x_multiplier as usize)
        .copied()
}

/// Checks `sub` against the geometry of `pass` in `full` and returns the pass transform.
fn check_pass<P>(
    pass: u8,
    full: &PixelMatrix<P>,
    sub: &PixelMatrix<P>,
) -> Result<PassTransform, InterlaceError> {
    let t = multiplier_offset(pass)?;
    let expected = t.sub_size(full.width(), full.height());
    if sub.dimensions() != expected {
        return Err(InterlaceError::DimensionMismatch {
            pass,
            expected,
            found: sub.dimensions(),
        });
    }
    Ok(t)
}

/// Merges a sub-image whose size was already checked.
fn merge_checked<P: Copy>(t: &PassTransform, full: &mut PixelMatrix<P>, sub: &PixelMatrix<P>) {
    if sub.is_empty() {
        return;
    }
    for (line, src) in (0u32..).zip(sub.rows()) {
        let y = t.y_offset + line * t.y_multiplier;
        if let Some(full_row) = full.row_mut(y) {
            write_row(full_row, t, src);
        }
    }
}

/// Extracts the sub-image of the pass described by `t`.
fn extract_checked<P: Copy>(t: &PassTransform, full: &PixelMatrix<P>) -> PixelMatrix<P> {
    let (width, height) = t.sub_size(full.width(), full.height());
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for full_row in full
        .rows()
        .skip(t.y_offset as usize)
        .step_by(t.y_multiplier as usize)
    {
        pixels.extend(read_row(full_row, t));
    }
    PixelMatrix::from_raw(width, height, pixels)
}

/// Writes the pixels of `sub` into `full` at the positions owned by `pass`.
///
/// `sub` must have exactly the size [`pass_size`](crate::pass_size) computes for `pass` and the
/// dimensions of `full`; otherwise this fails with [`InterlaceError::DimensionMismatch`] and
/// `full` is left untouched.
///
/// ```
/// use adam7::{merge_pass, PixelMatrix};
/// let mut img = PixelMatrix::new(8, 8, 0u8).unwrap();
/// let pass = PixelMatrix::from_pixels(4, 2, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
/// merge_pass(4, &mut img, &pass).unwrap();
/// assert_eq!(img.row(2).unwrap(), &[1, 0, 2, 0, 3, 0, 4, 0]);
/// assert_eq!(img.row(6).unwrap(), &[5, 0, 6, 0, 7, 0, 8, 0]);
/// ```
pub fn merge_pass<P: Copy>(
    pass: u8,
    full: &mut PixelMatrix<P>,
    sub: &PixelMatrix<P>,
) -> Result<(), InterlaceError> {
    let t = check_pass(pass, full, sub).map_err(|err| {
        debug!("rejecting merge of pass {}: {}", pass, err);
        err
    })?;
    trace!(
        "merging pass {} ({}x{}) into {}x{}",
        pass,
        sub.width(),
        sub.height(),
        full.width(),
        full.height()
    );
    merge_checked(&t, full, sub);
    Ok(())
}

/// Builds the sub-image of `pass` out of `full`.
///
/// Zero-sized images simply produce zero-sized passes.
pub fn extract_pass<P: Copy>(
    pass: u8,
    full: &PixelMatrix<P>,
) -> Result<PixelMatrix<P>, InterlaceError> {
    let t = multiplier_offset(pass)?;
    let sub = extract_checked(&t, full);
    trace!(
        "extracted pass {} ({}x{}) from {}x{}",
        pass,
        sub.width(),
        sub.height(),
        full.width(),
        full.height()
    );
    Ok(sub)
}

/// Copies one interlaced scanline into the right location in `full`.
///
/// `info` typically comes from [`PassRows`](crate::PassRows) while the decoder walks the
/// image data, but this is not required. The row must hold exactly `info.width` pixels and
/// `info.width` must be the width of the pass in `full`.
///
/// ```
/// use adam7::{merge_row, PixelMatrix, RowInfo};
/// let info = RowInfo { pass: 4, line: 0, width: 4 }; // 1st line of pass 4 has 4 pixels.
/// let mut img = PixelMatrix::new(8, 8, 0u8).unwrap();
/// merge_row(&mut img, &info, &[1, 2, 3, 4]).unwrap();
/// assert_eq!(img.pixels(), &[
///     0, 0, 0, 0, 0, 0, 0, 0,
///     0, 0, 0, 0, 0, 0, 0, 0,
///     1, 0, 2, 0, 3, 0, 4, 0,  // <= this is where the 1st line of pass 4 lands
///     0, 0, 0, 0, 0, 0, 0, 0,
///     0, 0, 0, 0, 0, 0, 0, 0,
///     0, 0, 0, 0, 0, 0, 0, 0,
///     0, 0, 0, 0, 0, 0, 0, 0,
///     0, 0, 0, 0, 0, 0, 0, 0,
/// ]);
/// ```
pub fn merge_row<P: Copy>(
    full: &mut PixelMatrix<P>,
    info: &RowInfo,
    row: &[P],
) -> Result<(), InterlaceError> {
    let t = multiplier_offset(info.pass)?;
    let (width, lines) = t.sub_size(full.width(), full.height());
    let found = match u32::try_from(row.len()) {
        Ok(len) if info.width == width => len,
        Ok(_) => info.width,
        Err(_) => u32::MAX,
    };
    if found != width {
        let err = InterlaceError::DimensionMismatch {
            pass: info.pass,
            expected: (width, 1),
            found: (found, 1),
        };
        debug!("rejecting scanline {}: {}", info.line, err);
        return Err(err);
    }
    if info.line >= lines {
        let err = InterlaceError::LineOutOfRange {
            pass: info.pass,
            line: info.line,
            lines,
        };
        debug!("rejecting scanline: {}", err);
        return Err(err);
    }

    trace!("merging line {} of pass {}", info.line, info.pass);
    let y = t.y_offset + info.line * t.y_multiplier;
    if let Some(full_row) = full.row_mut(y) {
        write_row(full_row, &t, row);
    }
    Ok(())
}

fn check_all<P>(
    full: &PixelMatrix<P>,
    subs: &[PixelMatrix<P>; PASS_COUNT as usize],
) -> Result<(), InterlaceError> {
    for (pass, sub) in (0..PASS_COUNT).zip(subs.iter()) {
        check_pass(pass, full, sub).map_err(|err| {
            debug!("rejecting merge of all passes: {}", err);
            err
        })?;
    }
    Ok(())
}

/// Merges all seven passes, in pass order.
///
/// Every sub-image is checked before the first pixel is written, so on error `full` is left
/// untouched. On success every pixel of `full` has been written exactly once.
pub fn merge_passes<P: Copy>(
    full: &mut PixelMatrix<P>,
    subs: &[PixelMatrix<P>; PASS_COUNT as usize],
) -> Result<(), InterlaceError> {
    check_all(full, subs)?;
    for (t, sub) in ADAM7.iter().zip(subs.iter()) {
        merge_checked(t, full, sub);
    }
    trace!("merged all passes into {}x{}", full.width(), full.height());
    Ok(())
}

/// Splits `full` into its seven passes, in pass order.
pub fn extract_passes<P: Copy>(full: &PixelMatrix<P>) -> [PixelMatrix<P>; PASS_COUNT as usize] {
    std::array::from_fn(|pass| extract_checked(&ADAM7[pass], full))
}

/// [`extract_passes`] on the rayon thread pool.
///
/// `full` is only read, so the passes are extracted concurrently without synchronization.
#[cfg(feature = "rayon")]
pub fn extract_passes_par<P: Copy + Send + Sync>(
    full: &PixelMatrix<P>,
) -> [PixelMatrix<P>; PASS_COUNT as usize] {
    use rayon::prelude::*;

    let passes: Vec<_> = ADAM7[..]
        .par_iter()
        .map(|t| extract_checked(t, full))
        .collect();
    match passes.try_into() {
        Ok(passes) => passes,
        Err(_) => unreachable!("one sub-image per pass transform"),
    }
}

/// [`merge_passes`] on the rayon thread pool.
///
/// Work is split by rows of `full`: each worker owns one full-image row and copies in the
/// scanline of every pass that lands on it, so no two workers write the same pixel.
#[cfg(feature = "rayon")]
pub fn merge_passes_par<P: Copy + Send + Sync>(
    full: &mut PixelMatrix<P>,
    subs: &[PixelMatrix<P>; PASS_COUNT as usize],
) -> Result<(), InterlaceError> {
    use rayon::prelude::*;

    check_all(full, subs)?;
    let width = full.width() as usize;
    if width == 0 {
        return Ok(());
    }
    full.pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, full_row)| {
            let y = y as u32;
            for (t, sub) in ADAM7.iter().zip(subs.iter()) {
                if !t.covers_row(y) {
                    continue;
                }
                if let Some(line) = sub.row((y - t.y_offset) / t.y_multiplier) {
                    write_row(full_row, t, line);
                }
            }
        });
    Ok(())
}

/// Progressive assembly of an interlaced image.
///
/// Owns the full image and remembers which passes have been merged, so a viewer can
/// render after every pass and a decoder can tell when the image is done. Passes that hold
/// no pixels for the image size count as merged from the start.
#[derive(Debug, Clone)]
pub struct Deinterlacer<P> {
    image: PixelMatrix<P>,
    merged: Passes,
    /// Next scanline expected by [`Deinterlacer::merge_row`], per pass.
    next_line: [u32; PASS_COUNT as usize],
}

impl<P: Copy> Deinterlacer<P> {
    /// Starts from a `width x height` image filled with `fill`.
    pub fn new(width: u32, height: u32, fill: P) -> Result<Self, InterlaceError> {
        Ok(Self::from_matrix(PixelMatrix::new(width, height, fill)?))
    }

    /// Starts from an existing image, e.g. the previous frame of an animation.
    pub fn from_matrix(image: PixelMatrix<P>) -> Self {
        let merged = Passes::empty_for(image.width(), image.height());
        Deinterlacer {
            image,
            merged,
            next_line: [0; PASS_COUNT as usize],
        }
    }

    /// Merges a complete pass, see [`merge_pass`].
    pub fn merge_pass(&mut self, pass: u8, sub: &PixelMatrix<P>) -> Result<(), InterlaceError> {
        merge_pass(pass, &mut self.image, sub)?;
        self.next_line[usize::from(pass)] = sub.height();
        self.mark(pass);
        Ok(())
    }

    /// Merges a single scanline, see [`merge_row`].
    ///
    /// Scanlines of a pass must arrive top to bottom without gaps, as they do in the data
    /// stream; anything else fails with [`InterlaceError::UnexpectedLine`]. A pass counts as
    /// merged once all of its scanlines have been merged.
    pub fn merge_row(&mut self, info: &RowInfo, row: &[P]) -> Result<(), InterlaceError> {
        let (_, lines) =
            multiplier_offset(info.pass)?.sub_size(self.image.width(), self.image.height());
        let slot = usize::from(info.pass);
        let expected = self.next_line[slot];
        if info.line < lines && info.line != expected {
            let err = InterlaceError::UnexpectedLine {
                pass: info.pass,
                line: info.line,
                expected,
            };
            debug!("rejecting scanline: {}", err);
            return Err(err);
        }
        merge_row(&mut self.image, info, row)?;
        self.next_line[slot] = info.line + 1;
        if self.next_line[slot] == lines {
            self.mark(info.pass);
        }
        Ok(())
    }

    fn mark(&mut self, pass: u8) {
        let bit = Passes::from_bits_truncate(1 << pass);
        let empty = Passes::empty_for(self.image.width(), self.image.height());
        if self.merged.contains(bit) && !empty.contains(bit) {
            debug!("pass {} merged more than once", pass);
        }
        self.merged |= bit;
    }

    /// The passes merged so far.
    pub fn merged(&self) -> Passes {
        self.merged
    }

    /// Whether every pixel of the image has been written.
    pub fn is_complete(&self) -> bool {
        self.merged.is_all()
    }

    /// The image as assembled so far.
    pub fn matrix(&self) -> &PixelMatrix<P> {
        &self.image
    }

    pub fn into_matrix(self) -> PixelMatrix<P> {
        self.image
    }
}
