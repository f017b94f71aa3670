//! Row-major pixel storage shared by the full image and the pass sub-images.

use std::ops::{Index, IndexMut};

use crate::error::InterlaceError;

/// A rectangular, row-major grid of pixels.
///
/// The pixel type is opaque to this crate; any `Copy` sample works, be it a packed `u32`
/// RGBA value, a `[u8; 3]` or a palette index. The buffer always holds exactly
/// `width * height` pixels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PixelMatrix<P> {
    width: u32,
    height: u32,
    pixels: Vec<P>,
}

/// Number of pixels in a `width x height` grid, if addressable on this target.
pub(crate) fn pixel_count(width: u32, height: u32) -> Option<usize> {
    let width = usize::try_from(width).ok()?;
    let height = usize::try_from(height).ok()?;
    width.checked_mul(height)
}

impl<P: Copy> PixelMatrix<P> {
    /// Creates a `width x height` matrix with every pixel set to `fill`.
    pub fn new(width: u32, height: u32, fill: P) -> Result<Self, InterlaceError> {
        let len = pixel_count(width, height).ok_or(InterlaceError::InvalidDimensions {
            width,
            height,
            len: usize::MAX,
        })?;
        Ok(PixelMatrix {
            width,
            height,
            pixels: vec![fill; len],
        })
    }

    /// Wraps an existing row-major buffer.
    ///
    /// Fails with [`InterlaceError::InvalidDimensions`] unless `pixels.len() == width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<P>) -> Result<Self, InterlaceError> {
        match pixel_count(width, height) {
            Some(len) if len == pixels.len() => Ok(PixelMatrix {
                width,
                height,
                pixels,
            }),
            _ => Err(InterlaceError::InvalidDimensions {
                width,
                height,
                len: pixels.len(),
            }),
        }
    }

    /// Builds a matrix by calling `f(x, y)` for every coordinate, row by row.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> P,
    ) -> Result<Self, InterlaceError> {
        let len = pixel_count(width, height).ok_or(InterlaceError::InvalidDimensions {
            width,
            height,
            len: usize::MAX,
        })?;
        let mut pixels = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Ok(PixelMatrix {
            width,
            height,
            pixels,
        })
    }
}

impl<P> PixelMatrix<P> {
    /// Assembles a matrix from parts whose sizes were computed by the caller.
    pub(crate) fn from_raw(width: u32, height: u32, pixels: Vec<P>) -> Self {
        debug_assert_eq!(pixel_count(width, height), Some(pixels.len()));
        PixelMatrix {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [P] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<P> {
        self.pixels
    }

    /// Gets the pixel at the position, or `None` if the position is out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<&P> {
        let i = self.index_of(x, y)?;
        Some(&self.pixels[i])
    }

    /// Gets the pixel at the position, or `None` if the position is out of bounds.
    #[inline]
    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut P> {
        let i = self.index_of(x, y)?;
        Some(&mut self.pixels[i])
    }

    /// One row of pixels, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[P]> {
        let start = self.index_of(0, y)?;
        Some(&self.pixels[start..][..self.width as usize])
    }

    pub fn row_mut(&mut self, y: u32) -> Option<&mut [P]> {
        let start = self.index_of(0, y)?;
        let width = self.width as usize;
        Some(&mut self.pixels[start..][..width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[P]> + '_ {
        // `chunks_exact(0)` panics, an empty-width matrix simply has no pixels to yield.
        let width = (self.width as usize).max(1);
        self.pixels.chunks_exact(width)
    }

    #[inline]
    fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

impl<P> Index<(u32, u32)> for PixelMatrix<P> {
    type Output = P;

    #[track_caller]
    fn index(&self, (x, y): (u32, u32)) -> &P {
        match self.index_of(x, y) {
            Some(i) => &self.pixels[i],
            None => panic!(
                "pixel ({}, {}) out of bounds for a {}x{} matrix",
                x, y, self.width, self.height
            ),
        }
    }
}

impl<P> IndexMut<(u32, u32)> for PixelMatrix<P> {
    #[track_caller]
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        match self.index_of(x, y) {
            Some(i) => &mut self.pixels[i],
            None => panic!(
                "pixel ({}, {}) out of bounds for a {}x{} matrix",
                x, y, self.width, self.height
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_every_pixel() {
        let m = PixelMatrix::new(3, 2, 7u32).unwrap();
        assert_eq!(m.dimensions(), (3, 2));
        assert_eq!(m.pixels(), &[7; 6]);
    }

    #[test]
    fn zero_sized_matrices() {
        let m = PixelMatrix::new(0, 5, 1u8).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.rows().count(), 0);
        assert_eq!(m.get(0, 0), None);

        let m = PixelMatrix::new(5, 0, 1u8).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.row(0), None);
    }

    #[test]
    fn from_pixels_checks_length() {
        assert!(PixelMatrix::from_pixels(2, 2, vec![0u8; 4]).is_ok());
        assert_eq!(
            PixelMatrix::from_pixels(2, 2, vec![0u8; 3]),
            Err(InterlaceError::InvalidDimensions {
                width: 2,
                height: 2,
                len: 3
            })
        );
    }

    #[test]
    fn indexing_is_row_major() {
        let mut m = PixelMatrix::from_pixels(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(m[(2, 0)], 2);
        assert_eq!(m[(0, 1)], 3);
        m[(1, 1)] = 40;
        assert_eq!(m.row(1), Some(&[3, 40, 5][..]));
        assert_eq!(m.get(3, 0), None);
        assert_eq!(m.get(0, 2), None);
        *m.get_mut(0, 0).unwrap() = 9;
        assert_eq!(m.pixels()[0], 9);
    }

    #[test]
    #[should_panic]
    fn indexing_out_of_bounds_panics() {
        let m = PixelMatrix::new(2, 2, 0u8).unwrap();
        let _ = m[(2, 0)];
    }

    #[test]
    fn from_fn_visits_rows_in_order() {
        let m = PixelMatrix::from_fn(2, 2, |x, y| (x, y)).unwrap();
        assert_eq!(m.pixels(), &[(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
