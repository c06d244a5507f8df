//! BMP wire codec (internal).
//!
//! Use [`crate::decode`], [`crate::DecodeRequest`] or [`crate::Bitmap::encode`].

mod decode;
mod encode;
pub(crate) mod pack;

use crate::error::BmpError;
use crate::header::Header;
use crate::image::{Bitmap, Image};
use crate::limits::Limits;
use crate::pixel::{Depth, Gray, Mono, Pixel, Word};
use alloc::vec::Vec;
use rgb::{RGB8, RGBA8};

/// Decode a BMP whose depth must match `P`.
pub(crate) fn decode<P: Pixel>(data: &[u8], limits: Option<&Limits>) -> Result<Bitmap<P>, BmpError> {
    let header = Header::parse(data)?;
    decode_with_header(header, data, limits)
}

fn decode_with_header<P: Pixel>(
    header: Header,
    data: &[u8],
    limits: Option<&Limits>,
) -> Result<Bitmap<P>, BmpError> {
    decode::check_header::<P>(&header)?;
    decode::check_limits(limits, header.width, header.height, P::DEPTH)?;
    if header.data_offset as usize != crate::header::HEADER_SIZE {
        log::warn!(
            "BMP pixel data starts at {}; re-encoding will write it at 54 without a palette",
            header.data_offset
        );
    }

    let raster = decode::decode_pixels::<P>(&header, data)?;
    log::debug!(
        "decoded {}x{} {:?} BMP ({} bytes)",
        header.width,
        header.height,
        P::DEPTH,
        data.len()
    );
    Bitmap::from_parts(header, raster)
}

/// Read the header once, then decode with the pixel type its depth names.
pub(crate) fn decode_image(data: &[u8], limits: Option<&Limits>) -> Result<Image, BmpError> {
    let header = Header::parse(data)?;
    Ok(match header.depth()? {
        Depth::Mono => Image::Mono(decode_with_header::<Mono>(header, data, limits)?),
        Depth::Gray8 => Image::Gray(decode_with_header::<Gray>(header, data, limits)?),
        Depth::Word16 => Image::Word(decode_with_header::<Word>(header, data, limits)?),
        Depth::Rgb24 => Image::Rgb(decode_with_header::<RGB8>(header, data, limits)?),
        Depth::Rgba32 => Image::Rgba(decode_with_header::<RGBA8>(header, data, limits)?),
    })
}

/// Encode to a complete BMP file.
pub(crate) fn encode<P: Pixel>(bitmap: &Bitmap<P>) -> Result<Vec<u8>, BmpError> {
    encode::encode_bmp(bitmap.header(), bitmap.raster())
}
