//! Owned pixel storage and stride arithmetic.

use alloc::vec::Vec;
use core::slice::ChunksExact;

use crate::error::BmpError;
use crate::pixel::{Depth, Pixel};

/// Bytes per stored row, rounded up to a multiple of 4.
///
/// Monochrome rows hold `ceil(width / 8)` bytes before padding; every
/// other depth holds `width * bytes_per_pixel`. Returns `None` on overflow.
pub fn row_stride(depth: Depth, width: u32) -> Option<usize> {
    let width = usize::try_from(width).ok()?;
    let row_bytes = match depth {
        Depth::Mono => width.div_ceil(8),
        _ => width.checked_mul(depth.bytes_per_pixel())?,
    };
    row_bytes.checked_add(3).map(|r| r & !3)
}

/// Length of the pixel data region: `stride * height`.
pub fn data_size(depth: Depth, width: u32, height: u32) -> Option<usize> {
    row_stride(depth, width)?.checked_mul(usize::try_from(height).ok()?)
}

pub(crate) fn pixel_count(width: u32, height: u32) -> Result<usize, BmpError> {
    if width == 0 || height == 0 {
        return Err(BmpError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(BmpError::DimensionsTooLarge { width, height })
}

/// An empty buffer with room for `width * height` pixels, or
/// `DimensionsTooLarge` when that cannot be allocated.
pub(crate) fn pixel_buffer<P>(width: u32, height: u32) -> Result<Vec<P>, BmpError> {
    let count = pixel_count(width, height)?;
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(count)
        .map_err(|_| BmpError::DimensionsTooLarge { width, height })?;
    Ok(pixels)
}

/// A `width * height` grid of pixels stored bottom row first.
///
/// Within a row, columns run left to right. The pixel count always equals
/// `width * height`; shape changes replace the whole buffer at once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster<P> {
    width: u32,
    height: u32,
    pixels: Vec<P>,
}

impl<P: Pixel> Raster<P> {
    /// A raster filled with one pixel value.
    pub fn new(width: u32, height: u32, fill: P) -> Result<Self, BmpError> {
        let mut pixels = pixel_buffer(width, height)?;
        pixels.resize(width as usize * height as usize, fill);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap pixels already in bottom-up row order.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<P>) -> Result<Self, BmpError> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(BmpError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> Depth {
        P::DEPTH
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    /// Mutable access to pixel values. The length is fixed.
    pub fn pixels_mut(&mut self) -> &mut [P] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<P> {
        self.pixels
    }

    /// Stored rows, bottom row first.
    pub fn rows(&self) -> ChunksExact<'_, P> {
        self.pixels.chunks_exact(self.width as usize)
    }

    /// Storage index of a pixel addressed by visual position, where row 0
    /// is the top of the image.
    pub fn index_of(&self, row: u32, column: u32) -> Option<usize> {
        if row >= self.height || column >= self.width {
            return None;
        }
        let reversed_row = (self.height - 1 - row) as usize;
        Some(reversed_row * self.width as usize + column as usize)
    }

    /// Pixel at a storage index.
    pub fn get(&self, index: usize) -> Option<P> {
        self.pixels.get(index).copied()
    }

    pub fn set(&mut self, index: usize, pixel: P) -> Result<(), BmpError> {
        let len = self.pixels.len();
        let slot = self
            .pixels
            .get_mut(index)
            .ok_or(BmpError::OutOfBounds { index, len })?;
        *slot = pixel;
        Ok(())
    }

    /// Pixel at a visual (top-down) row and column.
    pub fn get_at(&self, row: u32, column: u32) -> Option<P> {
        self.index_of(row, column).and_then(|index| self.get(index))
    }

    pub fn set_at(&mut self, row: u32, column: u32, pixel: P) -> Result<(), BmpError> {
        match self.index_of(row, column) {
            Some(index) => self.set(index, pixel),
            None => Err(BmpError::OutOfBounds {
                index: (row as usize)
                    .saturating_mul(self.width as usize)
                    .saturating_add(column as usize),
                len: self.pixels.len(),
            }),
        }
    }

    /// Swap in a new buffer and shape together.
    pub(crate) fn replace(&mut self, width: u32, height: u32, pixels: Vec<P>) {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        self.width = width;
        self.height = height;
        self.pixels = pixels;
    }
}
