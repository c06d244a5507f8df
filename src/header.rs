//! The fixed 54-byte BMP header: 14-byte file header plus a 40-byte
//! BITMAPINFOHEADER.

use crate::error::BmpError;
use crate::pixel::Depth;
use crate::raster;

/// Size of the file header plus the DIB header.
pub const HEADER_SIZE: usize = 54;

/// Size of the BITMAPINFOHEADER this codec reads and writes.
pub const DIB_HEADER_SIZE: u32 = 40;

/// The "BM" signature.
pub const BMP_MAGIC: [u8; 2] = *b"BM";

/// 72 DPI expressed in pixels per metre.
const DEFAULT_PRINT_SIZE: u32 = 2835;

/// Decoded header fields.
///
/// `file_size` and `data_size` are bookkeeping: they reflect the last
/// decode or shape change and are recomputed by [`Header::serialize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub file_size: u32,
    /// Byte offset of the pixel data.
    pub data_offset: u32,
    pub dib_size: u32,
    pub width: u32,
    /// Always the magnitude of the stored value; rows are bottom-up.
    pub height: u32,
    pub color_planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// Pixel data length including row padding.
    pub data_size: u32,
    pub print_size_w: u32,
    pub print_size_h: u32,
    pub palette_size: u32,
    pub important_colors: u32,
}

fn u16_at(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn u32_at(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

impl Header {
    /// Header for a fresh image of the given shape.
    pub fn new(width: u32, height: u32, depth: Depth) -> Result<Self, BmpError> {
        let mut header = Self {
            file_size: 0,
            data_offset: HEADER_SIZE as u32,
            dib_size: DIB_HEADER_SIZE,
            width,
            height,
            color_planes: 1,
            bits_per_pixel: depth.bits(),
            compression: 0,
            data_size: 0,
            print_size_w: DEFAULT_PRINT_SIZE,
            print_size_h: DEFAULT_PRINT_SIZE,
            palette_size: 0,
            important_colors: 0,
        };
        header.refresh_sizes()?;
        Ok(header)
    }

    /// Parse the 54-byte header at the start of `data`.
    ///
    /// Only the size and the signature are validated here; depth and
    /// compression are checked when pixel data is decoded.
    pub fn parse(data: &[u8]) -> Result<Self, BmpError> {
        if data.len() < HEADER_SIZE {
            return Err(BmpError::TooSmall {
                needed: HEADER_SIZE,
                actual: data.len(),
            });
        }
        if data[0..2] != BMP_MAGIC {
            return Err(BmpError::BadMagic);
        }

        let raw_height = u32_at(data, 22) as i32;
        if raw_height < 0 {
            log::warn!("BMP height {raw_height} is negative; treating rows as bottom-up");
        }

        Ok(Self {
            file_size: u32_at(data, 2),
            data_offset: u32_at(data, 10),
            dib_size: u32_at(data, 14),
            width: u32_at(data, 18),
            height: raw_height.unsigned_abs(),
            color_planes: u16_at(data, 26),
            bits_per_pixel: u16_at(data, 28),
            compression: u32_at(data, 30),
            data_size: u32_at(data, 34),
            print_size_w: u32_at(data, 38),
            print_size_h: u32_at(data, 42),
            palette_size: u32_at(data, 46),
            important_colors: u32_at(data, 50),
        })
    }

    /// Serialize to the wire layout.
    ///
    /// The signature, data offset, DIB size, plane count, compression and
    /// palette fields are fixed. File and data sizes are recomputed from
    /// the current width, height and depth.
    pub fn serialize(&self) -> Result<[u8; HEADER_SIZE], BmpError> {
        let (data_size, file_size) = self.computed_sizes()?;

        let mut out = [0u8; HEADER_SIZE];
        out[0..2].copy_from_slice(&BMP_MAGIC);
        out[2..6].copy_from_slice(&file_size.to_le_bytes());
        // 6..10 reserved
        out[10..14].copy_from_slice(&(HEADER_SIZE as u32).to_le_bytes());
        out[14..18].copy_from_slice(&DIB_HEADER_SIZE.to_le_bytes());
        out[18..22].copy_from_slice(&self.width.to_le_bytes());
        out[22..26].copy_from_slice(&self.height.to_le_bytes());
        out[26..28].copy_from_slice(&1u16.to_le_bytes());
        out[28..30].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        // 30..34 compression = BI_RGB
        out[34..38].copy_from_slice(&data_size.to_le_bytes());
        out[38..42].copy_from_slice(&self.print_size_w.to_le_bytes());
        out[42..46].copy_from_slice(&self.print_size_h.to_le_bytes());
        // 46..54 palette size and important colors
        Ok(out)
    }

    /// Depth named by `bits_per_pixel`.
    pub fn depth(&self) -> Result<Depth, BmpError> {
        Depth::from_bits(self.bits_per_pixel).ok_or(BmpError::UnsupportedDepth(self.bits_per_pixel))
    }

    /// Bytes per stored row, padding included.
    pub fn row_stride(&self) -> Result<usize, BmpError> {
        raster::row_stride(self.depth()?, self.width).ok_or(BmpError::DimensionsTooLarge {
            width: self.width,
            height: self.height,
        })
    }

    /// Recompute `data_size` and `file_size` after a shape change.
    pub(crate) fn refresh_sizes(&mut self) -> Result<(), BmpError> {
        let (data_size, file_size) = self.computed_sizes()?;
        self.data_size = data_size;
        self.file_size = file_size;
        Ok(())
    }

    pub(crate) fn set_dimensions(&mut self, width: u32, height: u32) -> Result<(), BmpError> {
        let mut next = *self;
        next.width = width;
        next.height = height;
        next.refresh_sizes()?;
        *self = next;
        Ok(())
    }

    fn computed_sizes(&self) -> Result<(u32, u32), BmpError> {
        let too_large = BmpError::DimensionsTooLarge {
            width: self.width,
            height: self.height,
        };
        let data_size = raster::data_size(self.depth()?, self.width, self.height)
            .and_then(|size| u32::try_from(size).ok())
            .ok_or(too_large)?;
        let file_size = data_size
            .checked_add(HEADER_SIZE as u32)
            .ok_or(BmpError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })?;
        Ok((data_size, file_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> [u8; HEADER_SIZE] {
        let mut h = Header::new(2, 2, Depth::Rgb24).unwrap();
        h.print_size_w = 100;
        h.print_size_h = 200;
        h.serialize().unwrap()
    }

    #[test]
    fn rejects_short_buffer() {
        let err = Header::parse(&[b'B', b'M', 0, 0]).unwrap_err();
        assert!(matches!(err, BmpError::TooSmall { needed: 54, actual: 4 }));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = sample();
        bytes[0] = b'X';
        assert!(matches!(Header::parse(&bytes), Err(BmpError::BadMagic)));
    }

    #[test]
    fn fields_at_fixed_offsets() {
        let bytes = sample();
        assert_eq!(&bytes[0..2], b"BM");
        // 2x2 RGB: stride 8, data 16, file 70
        assert_eq!(u32_at(&bytes, 2), 70);
        assert_eq!(u32_at(&bytes, 10), 54);
        assert_eq!(u32_at(&bytes, 14), 40);
        assert_eq!(u32_at(&bytes, 18), 2);
        assert_eq!(u32_at(&bytes, 22), 2);
        assert_eq!(u16_at(&bytes, 26), 1);
        assert_eq!(u16_at(&bytes, 28), 24);
        assert_eq!(u32_at(&bytes, 30), 0);
        assert_eq!(u32_at(&bytes, 34), 16);
        assert_eq!(u32_at(&bytes, 38), 100);
        assert_eq!(u32_at(&bytes, 42), 200);
        assert_eq!(u32_at(&bytes, 46), 0);
        assert_eq!(u32_at(&bytes, 50), 0);
    }

    #[test]
    fn parse_inverts_serialize() {
        let bytes = sample();
        let header = Header::parse(&bytes).unwrap();
        assert_eq!(header.width, 2);
        assert_eq!(header.height, 2);
        assert_eq!(header.bits_per_pixel, 24);
        assert_eq!(header.data_size, 16);
        assert_eq!(header.file_size, 70);
        assert_eq!(header.print_size_w, 100);
        assert_eq!(header.serialize().unwrap(), bytes);
    }

    #[test]
    fn serialize_ignores_stale_sizes_and_palette() {
        let mut header = Header::parse(&sample()).unwrap();
        header.data_size = 9999;
        header.file_size = 1;
        header.data_offset = 1078;
        header.palette_size = 256;
        header.compression = 3;
        let bytes = header.serialize().unwrap();
        assert_eq!(u32_at(&bytes, 2), 70);
        assert_eq!(u32_at(&bytes, 10), 54);
        assert_eq!(u32_at(&bytes, 30), 0);
        assert_eq!(u32_at(&bytes, 34), 16);
        assert_eq!(u32_at(&bytes, 46), 0);
    }

    #[test]
    fn negative_height_reads_as_magnitude() {
        let mut bytes = sample();
        bytes[22..26].copy_from_slice(&(-2i32).to_le_bytes());
        assert_eq!(Header::parse(&bytes).unwrap().height, 2);
    }

    #[test]
    fn unsupported_depth_is_reported() {
        let mut header = Header::parse(&sample()).unwrap();
        header.bits_per_pixel = 4;
        assert!(matches!(header.depth(), Err(BmpError::UnsupportedDepth(4))));
        assert!(matches!(header.serialize(), Err(BmpError::UnsupportedDepth(4))));
    }
}
