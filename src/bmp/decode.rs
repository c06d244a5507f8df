//! Pixel data decoding for uncompressed BMP.

use alloc::vec::Vec;

use crate::error::BmpError;
use crate::header::{HEADER_SIZE, Header};
use crate::limits::Limits;
use crate::pixel::{Depth, Pixel};
use crate::raster::{self, Raster};

/// Validate that `header` describes pixel data this codec can read as `P`.
pub(crate) fn check_header<P: Pixel>(header: &Header) -> Result<(), BmpError> {
    let depth = header.depth()?;
    if depth != P::DEPTH {
        return Err(BmpError::DepthMismatch {
            expected: P::DEPTH,
            actual: depth,
        });
    }
    if header.compression != 0 {
        return Err(BmpError::UnsupportedCompression(header.compression));
    }
    if header.width == 0 || header.height == 0 {
        return Err(BmpError::InvalidDimensions {
            width: header.width,
            height: header.height,
        });
    }
    if (header.data_offset as usize) < HEADER_SIZE {
        return Err(BmpError::InvalidHeader(alloc::format!(
            "pixel data offset {} overlaps the header",
            header.data_offset
        )));
    }
    Ok(())
}

pub(crate) fn check_limits(
    limits: Option<&Limits>,
    width: u32,
    height: u32,
    depth: Depth,
) -> Result<(), BmpError> {
    match limits {
        Some(limits) => limits.check_image(width, height, depth),
        None => Ok(()),
    }
}

/// Read `header.height` rows of `stride` bytes starting at the data offset,
/// keeping `width` pixels from each and dropping the padding.
pub(crate) fn decode_pixels<P: Pixel>(header: &Header, data: &[u8]) -> Result<Raster<P>, BmpError> {
    check_header::<P>(header)?;

    let too_large = || BmpError::DimensionsTooLarge {
        width: header.width,
        height: header.height,
    };
    let stride = header.row_stride()?;
    let data_len = raster::data_size(P::DEPTH, header.width, header.height).ok_or_else(too_large)?;
    let count = (header.width as usize)
        .checked_mul(header.height as usize)
        .ok_or_else(too_large)?;

    let start = header.data_offset as usize;
    let end = start.checked_add(data_len).ok_or_else(too_large)?;
    let pixel_data = data.get(start..end).ok_or(BmpError::UnexpectedEof)?;

    if header.data_size != 0 && header.data_size as usize != data_len {
        log::warn!(
            "BMP data size field is {} but {}x{} at {} bpp needs {data_len}",
            header.data_size,
            header.width,
            header.height,
            header.bits_per_pixel
        );
    }

    let width = header.width as usize;
    let mut pixels = Vec::with_capacity(count);
    for row in pixel_data.chunks_exact(stride) {
        P::decode_row(row, width, &mut pixels);
    }

    Raster::from_pixels(header.width, header.height, pixels)
}
