use alloc::string::String;

use crate::pixel::Depth;

/// Errors from BMP decoding, encoding and transforms.
///
/// Every failure is local to the call that reported it: a failed transform
/// leaves the bitmap exactly as it was before the call.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("buffer too small for BMP header: need {needed} bytes, got {actual}")]
    TooSmall { needed: usize, actual: usize },

    #[error("missing BM signature")]
    BadMagic,

    #[error("unsupported bits per pixel: {0} (supported: 1, 8, 16, 24, 32)")]
    UnsupportedDepth(u16),

    #[error("unsupported BMP compression scheme: {0}")]
    UnsupportedCompression(u32),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("pixel count mismatch: expected {expected}, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },

    #[error("depth mismatch: expected {expected:?}, got {actual:?}")]
    DepthMismatch { expected: Depth, actual: Depth },

    #[error("rotation must be a multiple of 90 degrees, got {0}")]
    InvalidAngle(i32),

    #[error("pixel index {index} out of bounds for {len} pixels")]
    OutOfBounds { index: usize, len: usize },

    #[error(
        "area {width}x{height} at offset ({x_offset}, {y_offset}) does not fit in {current_width}x{current_height}"
    )]
    InvalidArea {
        width: u32,
        height: u32,
        x_offset: u32,
        y_offset: u32,
        current_width: u32,
        current_height: u32,
    },

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("grey levels must be at least 1")]
    InvalidGreyLevels,

    #[error("{operation} is not supported for {depth:?} images")]
    UnsupportedOperation {
        operation: &'static str,
        depth: Depth,
    },
}
