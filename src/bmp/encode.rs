//! Pixel data encoding for uncompressed BMP.

use alloc::vec::Vec;

use crate::error::BmpError;
use crate::header::Header;
use crate::pixel::Pixel;
use crate::raster::Raster;

/// Encode the pixel data region: bottom row first, each row padded with
/// zeros to the stride.
pub(crate) fn encode_pixels<P: Pixel>(
    header: &Header,
    raster: &Raster<P>,
    out: &mut Vec<u8>,
) -> Result<(), BmpError> {
    let depth = header.depth()?;
    if depth != P::DEPTH {
        return Err(BmpError::DepthMismatch {
            expected: P::DEPTH,
            actual: depth,
        });
    }
    if header.width != raster.width() || header.height != raster.height() {
        return Err(BmpError::PixelCountMismatch {
            expected: header.width as usize * header.height as usize,
            actual: raster.len(),
        });
    }
    let stride = header.row_stride()?;

    for row in raster.rows() {
        let row_start = out.len();
        P::encode_row(row, out);
        let pad_bytes = stride - (out.len() - row_start);
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }
    Ok(())
}

/// Encode header and pixel data into a complete BMP file.
pub(crate) fn encode_bmp<P: Pixel>(header: &Header, raster: &Raster<P>) -> Result<Vec<u8>, BmpError> {
    let head = header.serialize()?;
    let file_size = u32::from_le_bytes([head[2], head[3], head[4], head[5]]) as usize;

    let mut out = Vec::with_capacity(file_size);
    out.extend_from_slice(&head);
    encode_pixels(header, raster, &mut out)?;
    debug_assert_eq!(out.len(), file_size);

    log::debug!(
        "encoded {}x{} {:?} BMP ({} bytes)",
        raster.width(),
        raster.height(),
        P::DEPTH,
        out.len()
    );
    Ok(out)
}
