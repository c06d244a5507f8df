use crate::error::BmpError;
use crate::header::Header;
use crate::image::{Bitmap, Image};
use crate::limits::Limits;
use crate::pixel::Pixel;

/// Decode builder.
///
/// ```no_run
/// use zenbmp::{DecodeRequest, Limits};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits {
///     max_pixels: Some(16_000_000),
///     ..Default::default()
/// };
/// let image = DecodeRequest::new(data).with_limits(&limits).decode()?;
/// println!("{}x{} {:?}", image.width(), image.height(), image.depth());
/// # Ok::<(), zenbmp::BmpError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images that exceed `limits` before any pixel buffer is allocated.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Parse the header without touching pixel data.
    pub fn header(&self) -> Result<Header, BmpError> {
        Header::parse(self.data)
    }

    /// Decode with the pixel type named by the header's depth.
    pub fn decode(&self) -> Result<Image, BmpError> {
        crate::bmp::decode_image(self.data, self.limits)
    }

    /// Decode into a known pixel type.
    ///
    /// Returns [`BmpError::DepthMismatch`] if the file stores another depth.
    pub fn decode_as<P: Pixel>(&self) -> Result<Bitmap<P>, BmpError> {
        crate::bmp::decode(self.data, self.limits)
    }
}
