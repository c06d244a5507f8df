//! Decoded images: a header plus a raster, typed by depth.

use alloc::vec::Vec;

use rgb::{RGB8, RGBA8};

use crate::error::BmpError;
use crate::header::Header;
use crate::limits::Limits;
use crate::pixel::{Depth, Gray, Mono, Pixel, Word};
use crate::raster::Raster;
use crate::transform::{Flip, Transform};

/// A decoded or constructed BMP of one depth.
///
/// The header's width, height and size fields always describe the raster;
/// every shape change updates both together.
///
/// Equality compares what survives an encode/decode round trip: shape,
/// print size and pixels. Header fields the encoder rewrites (data offset,
/// palette counts) are ignored.
#[derive(Clone, Debug)]
pub struct Bitmap<P> {
    header: Header,
    raster: Raster<P>,
}

impl<P: PartialEq> PartialEq for Bitmap<P> {
    fn eq(&self, other: &Self) -> bool {
        self.raster == other.raster
            && self.header.print_size_w == other.header.print_size_w
            && self.header.print_size_h == other.header.print_size_h
    }
}

impl<P: Eq> Eq for Bitmap<P> {}

impl<P: Pixel> Bitmap<P> {
    /// A `width` x `height` image filled with `fill`.
    pub fn new(width: u32, height: u32, fill: P) -> Result<Self, BmpError> {
        let header = Header::new(width, height, P::DEPTH)?;
        let raster = Raster::new(width, height, fill)?;
        Ok(Self { header, raster })
    }

    /// Wrap pixels in bottom-up row order.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<P>) -> Result<Self, BmpError> {
        let header = Header::new(width, height, P::DEPTH)?;
        let raster = Raster::from_pixels(width, height, pixels)?;
        Ok(Self { header, raster })
    }

    pub fn from_raster(raster: Raster<P>) -> Result<Self, BmpError> {
        let header = Header::new(raster.width(), raster.height(), P::DEPTH)?;
        Ok(Self { header, raster })
    }

    pub(crate) fn from_parts(mut header: Header, raster: Raster<P>) -> Result<Self, BmpError> {
        header.set_dimensions(raster.width(), raster.height())?;
        Ok(Self { header, raster })
    }

    /// Decode a BMP of this depth.
    ///
    /// Fails with [`BmpError::DepthMismatch`] when the file stores another depth.
    pub fn decode(data: &[u8]) -> Result<Self, BmpError> {
        crate::bmp::decode(data, None)
    }

    pub fn decode_with_limits(data: &[u8], limits: &Limits) -> Result<Self, BmpError> {
        crate::bmp::decode(data, Some(limits))
    }

    /// Encode to a complete BMP file. Sizes are recomputed from the
    /// current shape.
    pub fn encode(&self) -> Result<Vec<u8>, BmpError> {
        crate::bmp::encode(self)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn raster(&self) -> &Raster<P> {
        &self.raster
    }

    pub fn into_raster(self) -> Raster<P> {
        self.raster
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    pub fn depth(&self) -> Depth {
        P::DEPTH
    }

    pub fn bits_per_pixel(&self) -> u16 {
        P::DEPTH.bits()
    }

    /// Pixels in storage order, bottom row first.
    pub fn pixels(&self) -> &[P] {
        self.raster.pixels()
    }

    pub fn pixels_mut(&mut self) -> &mut [P] {
        self.raster.pixels_mut()
    }

    /// Pixel at a storage index.
    pub fn pixel(&self, index: usize) -> Option<P> {
        self.raster.get(index)
    }

    pub fn set_pixel(&mut self, index: usize, pixel: P) -> Result<(), BmpError> {
        self.raster.set(index, pixel)
    }

    /// Pixel at a visual position; row 0 is the top of the image.
    pub fn pixel_at(&self, row: u32, column: u32) -> Option<P> {
        self.raster.get_at(row, column)
    }

    pub fn set_pixel_at(&mut self, row: u32, column: u32, pixel: P) -> Result<(), BmpError> {
        self.raster.set_at(row, column, pixel)
    }

    /// Run a shape-changing raster operation that ends at `width` x `height`.
    ///
    /// The header for the target shape is built first, so a shape the file
    /// format cannot describe fails before any pixel buffer is allocated.
    /// Raster operations validate before mutating, so either both parts
    /// change or neither does.
    fn reshape(
        &mut self,
        width: u32,
        height: u32,
        op: impl FnOnce(&mut Raster<P>) -> Result<(), BmpError>,
    ) -> Result<(), BmpError> {
        let mut header = self.header;
        header.set_dimensions(width, height)?;
        op(&mut self.raster)?;
        self.header = header;
        Ok(())
    }
}

impl<P: Pixel> Transform for Bitmap<P> {
    fn flip(&mut self, axis: Flip) {
        log::trace!("flip {axis:?} {}x{}", self.width(), self.height());
        self.raster.flip(axis);
    }

    fn rotate(&mut self, degrees: i32) -> Result<(), BmpError> {
        log::trace!("rotate {degrees} {}x{}", self.width(), self.height());
        if degrees % 90 != 0 {
            return Err(BmpError::InvalidAngle(degrees));
        }
        if degrees.rem_euclid(180) == 0 {
            self.raster.rotate(degrees)?;
            return Ok(());
        }
        let (width, height) = (self.height(), self.width());
        self.reshape(width, height, |raster| raster.rotate(degrees))?;
        core::mem::swap(&mut self.header.print_size_w, &mut self.header.print_size_h);
        Ok(())
    }

    fn resize_area(
        &mut self,
        width: u32,
        height: u32,
        x_offset: u32,
        y_offset: u32,
    ) -> Result<(), BmpError> {
        log::trace!(
            "resize area {}x{} -> {width}x{height} at ({x_offset}, {y_offset})",
            self.width(),
            self.height()
        );
        self.reshape(width, height, |raster| {
            raster.resize_area(width, height, x_offset, y_offset)
        })
    }

    fn resize_image(&mut self, width: u32, height: u32) -> Result<(), BmpError> {
        log::trace!(
            "resize image {}x{} -> {width}x{height}",
            self.width(),
            self.height()
        );
        self.reshape(width, height, |raster| raster.resize_image(width, height))
    }
}

#[cfg(feature = "imgref")]
impl<P: Pixel> Bitmap<P> {
    /// Copy into an [`imgref::ImgVec`] in top-down visual row order.
    pub fn to_imgvec(&self) -> imgref::ImgVec<P> {
        let mut pixels = Vec::with_capacity(self.raster.len());
        for row in self.raster.rows().rev() {
            pixels.extend_from_slice(row);
        }
        imgref::ImgVec::new(pixels, self.width() as usize, self.height() as usize)
    }

    /// Build from a top-down [`imgref::ImgRef`].
    pub fn from_imgref(img: imgref::ImgRef<'_, P>) -> Result<Self, BmpError> {
        let too_large = || BmpError::DimensionsTooLarge {
            width: u32::MAX,
            height: u32::MAX,
        };
        let width = u32::try_from(img.width()).map_err(|_| too_large())?;
        let height = u32::try_from(img.height()).map_err(|_| too_large())?;
        let rows: Vec<&[P]> = img.rows().collect();
        let mut pixels = Vec::with_capacity(img.width() * img.height());
        for row in rows.iter().rev() {
            pixels.extend_from_slice(row);
        }
        Self::from_pixels(width, height, pixels)
    }
}

/// A decoded BMP of any supported depth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Image {
    Mono(Bitmap<Mono>),
    Gray(Bitmap<Gray>),
    Word(Bitmap<Word>),
    Rgb(Bitmap<RGB8>),
    Rgba(Bitmap<RGBA8>),
}

macro_rules! each_depth {
    ($image:expr, $bitmap:ident => $body:expr) => {
        match $image {
            Image::Mono($bitmap) => $body,
            Image::Gray($bitmap) => $body,
            Image::Word($bitmap) => $body,
            Image::Rgb($bitmap) => $body,
            Image::Rgba($bitmap) => $body,
        }
    };
}

impl Image {
    /// Decode a BMP of any supported depth.
    pub fn decode(data: &[u8]) -> Result<Self, BmpError> {
        crate::bmp::decode_image(data, None)
    }

    pub fn encode(&self) -> Result<Vec<u8>, BmpError> {
        each_depth!(self, bitmap => bitmap.encode())
    }

    pub fn depth(&self) -> Depth {
        each_depth!(self, bitmap => bitmap.depth())
    }

    pub fn width(&self) -> u32 {
        each_depth!(self, bitmap => bitmap.width())
    }

    pub fn height(&self) -> u32 {
        each_depth!(self, bitmap => bitmap.height())
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.depth().bits()
    }

    pub fn header(&self) -> &Header {
        each_depth!(self, bitmap => bitmap.header())
    }

    pub fn as_mono(&self) -> Option<&Bitmap<Mono>> {
        match self {
            Image::Mono(bitmap) => Some(bitmap),
            _ => None,
        }
    }

    pub fn as_gray(&self) -> Option<&Bitmap<Gray>> {
        match self {
            Image::Gray(bitmap) => Some(bitmap),
            _ => None,
        }
    }

    pub fn as_word(&self) -> Option<&Bitmap<Word>> {
        match self {
            Image::Word(bitmap) => Some(bitmap),
            _ => None,
        }
    }

    pub fn as_rgb(&self) -> Option<&Bitmap<RGB8>> {
        match self {
            Image::Rgb(bitmap) => Some(bitmap),
            _ => None,
        }
    }

    pub fn as_rgba(&self) -> Option<&Bitmap<RGBA8>> {
        match self {
            Image::Rgba(bitmap) => Some(bitmap),
            _ => None,
        }
    }

    pub fn as_rgb_mut(&mut self) -> Option<&mut Bitmap<RGB8>> {
        match self {
            Image::Rgb(bitmap) => Some(bitmap),
            _ => None,
        }
    }

    pub fn as_rgba_mut(&mut self) -> Option<&mut Bitmap<RGBA8>> {
        match self {
            Image::Rgba(bitmap) => Some(bitmap),
            _ => None,
        }
    }

    /// Average the colour channels into grey. Colour depths only.
    pub fn to_grey_scale(&mut self, levels: u8) -> Result<(), BmpError> {
        match self {
            Image::Rgb(bitmap) => bitmap.to_grey_scale(levels),
            Image::Rgba(bitmap) => bitmap.to_grey_scale(levels),
            other => Err(other.unsupported("grey scale")),
        }
    }

    /// Sepia tone. Colour depths only.
    pub fn to_sepia_tone(&mut self) -> Result<(), BmpError> {
        match self {
            Image::Rgb(bitmap) => bitmap.to_sepia_tone(),
            Image::Rgba(bitmap) => bitmap.to_sepia_tone(),
            other => return Err(other.unsupported("sepia tone")),
        }
        Ok(())
    }

    /// Invert the colour channels. Colour depths only.
    pub fn invert(&mut self) -> Result<(), BmpError> {
        match self {
            Image::Rgb(bitmap) => bitmap.invert(),
            Image::Rgba(bitmap) => bitmap.invert(),
            other => return Err(other.unsupported("invert")),
        }
        Ok(())
    }

    fn unsupported(&self, operation: &'static str) -> BmpError {
        BmpError::UnsupportedOperation {
            operation,
            depth: self.depth(),
        }
    }
}

impl Transform for Image {
    fn flip(&mut self, axis: Flip) {
        each_depth!(self, bitmap => bitmap.flip(axis))
    }

    fn rotate(&mut self, degrees: i32) -> Result<(), BmpError> {
        each_depth!(self, bitmap => bitmap.rotate(degrees))
    }

    fn resize_area(
        &mut self,
        width: u32,
        height: u32,
        x_offset: u32,
        y_offset: u32,
    ) -> Result<(), BmpError> {
        each_depth!(self, bitmap => bitmap.resize_area(width, height, x_offset, y_offset))
    }

    fn resize_image(&mut self, width: u32, height: u32) -> Result<(), BmpError> {
        each_depth!(self, bitmap => bitmap.resize_image(width, height))
    }
}

macro_rules! impl_conversions {
    ($($variant:ident($pixel:ty)),* $(,)?) => {$(
        impl From<Bitmap<$pixel>> for Image {
            fn from(bitmap: Bitmap<$pixel>) -> Self {
                Image::$variant(bitmap)
            }
        }

        impl TryFrom<Image> for Bitmap<$pixel> {
            type Error = BmpError;

            fn try_from(image: Image) -> Result<Self, BmpError> {
                match image {
                    Image::$variant(bitmap) => Ok(bitmap),
                    other => Err(BmpError::DepthMismatch {
                        expected: <$pixel as Pixel>::DEPTH,
                        actual: other.depth(),
                    }),
                }
            }
        }
    )*};
}

impl_conversions!(
    Mono(Mono),
    Gray(Gray),
    Word(Word),
    Rgb(RGB8),
    Rgba(RGBA8),
);
