//! # zenbmp
//!
//! Uncompressed BMP decoder, encoder and in-place transform engine.
//!
//! ## Supported Formats
//!
//! Files with the 54-byte header (14-byte file header + BITMAPINFOHEADER)
//! and uncompressed pixel data at five depths:
//!
//! - **1 bpp** monochrome, eight pixels per byte, most significant bit first
//! - **8 bpp** grey/index byte, no palette
//! - **16 bpp** one opaque big-endian word per pixel
//! - **24 bpp** RGB, stored BGR
//! - **32 bpp** RGBA, stored BGRA
//!
//! Rows are padded to a multiple of four bytes and stored bottom row first.
//! Decoded pixels keep that order; visual (top-down) addressing goes through
//! [`Bitmap::pixel_at`] and [`Raster::index_of`].
//!
//! ## Transforms
//!
//! [`Transform`] (flip, rotate, crop/pad, bilinear resize) works at every
//! depth. Grey scale, sepia and invert are available on RGB and RGBA
//! bitmaps. A failed transform leaves the image unchanged.
//!
//! ## Non-Goals
//!
//! - Compressed BMP (RLE, bitfields, embedded JPEG/PNG)
//! - Palettes, V4/V5 headers, colour management
//! - Top-down (negative height) output
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp::{DecodeRequest, Flip, Transform};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! // Probe without decoding
//! let header = DecodeRequest::new(data).header()?;
//! println!("{}x{} at {} bpp", header.width, header.height, header.bits_per_pixel);
//!
//! let mut image = zenbmp::decode(data)?;
//! image.rotate(90)?;
//! image.flip(Flip::Horizontal);
//! if image.depth().is_color() {
//!     image.to_grey_scale(16)?;
//! }
//! let encoded = image.encode()?;
//! # Ok::<(), zenbmp::BmpError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

use alloc::vec::Vec;

mod bmp;
mod color;
mod decode;
mod error;
mod header;
mod image;
mod limits;
mod pixel;
mod raster;
mod transform;

#[cfg(feature = "std")]
pub mod io;

// Re-exports
pub use decode::DecodeRequest;
pub use error::BmpError;
pub use header::{BMP_MAGIC, DIB_HEADER_SIZE, HEADER_SIZE, Header};
pub use image::{Bitmap, Image};
pub use limits::Limits;
pub use pixel::{ColorPixel, Depth, Gray, Mono, Pixel, Word};
pub use raster::{Raster, data_size, row_stride};
pub use rgb::{RGB8, RGBA8};
pub use transform::{Flip, Transform};

/// Decode a BMP of any supported depth.
pub fn decode(data: &[u8]) -> Result<Image, BmpError> {
    Image::decode(data)
}

/// Parse only the 54-byte header.
pub fn decode_header(data: &[u8]) -> Result<Header, BmpError> {
    Header::parse(data)
}

/// Encode to a complete BMP file.
pub fn encode(image: &Image) -> Result<Vec<u8>, BmpError> {
    image.encode()
}
