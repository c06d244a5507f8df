//! Reading and writing BMP files on disk.

use std::fs;
use std::path::Path;

use crate::error::BmpError;
use crate::image::{Bitmap, Image};
use crate::pixel::Pixel;

/// Failure reading or writing a BMP file.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Bmp(#[from] BmpError),
}

/// Read and decode a BMP of any supported depth.
pub fn read_image(path: impl AsRef<Path>) -> Result<Image, FileError> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    log::debug!("read {} bytes from {}", data.len(), path.display());
    Ok(Image::decode(&data)?)
}

/// Read a BMP that must have the depth of `P`.
pub fn read_bitmap<P: Pixel>(path: impl AsRef<Path>) -> Result<Bitmap<P>, FileError> {
    let data = fs::read(path)?;
    Ok(Bitmap::decode(&data)?)
}

/// Encode `image` and write it, replacing any existing file.
pub fn write_image(path: impl AsRef<Path>, image: &Image) -> Result<(), FileError> {
    write_bytes(path.as_ref(), &image.encode()?)
}

pub fn write_bitmap<P: Pixel>(path: impl AsRef<Path>, bitmap: &Bitmap<P>) -> Result<(), FileError> {
    write_bytes(path.as_ref(), &bitmap.encode()?)
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), FileError> {
    fs::write(path, bytes)?;
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
