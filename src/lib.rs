//! # Adam7 interlacing
//! This crate implements the two-dimensional interlacing scheme of PNG. It computes the
//! size of each of the seven passes for any image size, maps pass-local coordinates into
//! the full image and moves pixels between the full image and the passes.
//!
//! Decompression, filtering and sample decoding are left to the surrounding codec: the
//! decoder hands in one already unfiltered pass (or scanline) at a time, the encoder gets
//! the seven passes back to filter and compress them.
//!
//! ## Decoding
//! ```
//! use adam7::{pass_sizes, Deinterlacer, PixelMatrix};
//!
//! let (width, height) = (12, 7);
//! let mut image = Deinterlacer::new(width, height, 0u32).unwrap();
//! for (pass, &(w, h)) in (0..).zip(pass_sizes(width, height).iter()) {
//!     // In a real decoder these pixels come out of the unfiltered image data.
//!     let sub = PixelMatrix::new(w, h, u32::from(pass)).unwrap();
//!     image.merge_pass(pass, &sub).unwrap();
//! }
//! assert!(image.is_complete());
//! ```
//!
//! ## Encoding
//! ```
//! use adam7::{extract_passes, PixelMatrix};
//!
//! let image = PixelMatrix::from_fn(9, 9, |x, y| [x as u8, y as u8, 0]).unwrap();
//! let passes = extract_passes(&image);
//! assert_eq!(passes[0].dimensions(), (2, 2));
//! assert_eq!(passes[0][(1, 1)], [8, 8, 0]);
//! ```

#![forbid(unsafe_code)]

mod adam7;
#[cfg(feature = "benchmarks")]
pub mod benchable_apis;
mod error;
mod interlace;
mod matrix;

pub use crate::adam7::{
    multiplier_offset, pass_size, pass_sizes, to_full_coordinate, to_pass_coordinate, PassRows,
    PassTransform, RowInfo, PASS_COUNT,
};
pub use crate::error::InterlaceError;
#[cfg(feature = "rayon")]
pub use crate::interlace::{extract_passes_par, merge_passes_par};
pub use crate::interlace::{
    extract_pass, extract_passes, merge_pass, merge_passes, merge_row, Deinterlacer, Passes,
};
pub use crate::matrix::PixelMatrix;
