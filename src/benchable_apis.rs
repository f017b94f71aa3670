//! Development-time-only helper module for exporting private APIs so that they can be benchmarked.
//! This module is gated behind the "benchmarks" feature.

use crate::adam7::PassRows;
use crate::interlace::{extract_passes, merge_passes, merge_row};
use crate::matrix::PixelMatrix;

/// Deinterlaces `passes` into `img` one scanline at a time, the way a streaming decoder
/// does.
pub fn merge_rows<P: Copy>(img: &mut PixelMatrix<P>, passes: &[PixelMatrix<P>; 7]) {
    for info in PassRows::new(img.width(), img.height()) {
        let line = passes[usize::from(info.pass)].row(info.line).unwrap();
        merge_row(img, &info, line).unwrap();
    }
}

/// Deinterlaces `passes` into `img` one whole pass at a time.
pub fn merge_all<P: Copy>(img: &mut PixelMatrix<P>, passes: &[PixelMatrix<P>; 7]) {
    merge_passes(img, passes).unwrap();
}

pub fn extract_all<P: Copy>(img: &PixelMatrix<P>) -> [PixelMatrix<P>; 7] {
    extract_passes(img)
}
