use crate::error::BmpError;
use crate::pixel::Depth;

/// Caps applied to a BMP header before its pixel buffer is allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the decoded pixel buffer, one unpacked sample per pixel.
    pub max_memory_bytes: Option<u64>,
}

fn exceeded(what: &str, value: u64, limit: u64) -> BmpError {
    BmpError::LimitExceeded(alloc::format!("{what} {value} exceeds limit {limit}"))
}

impl Limits {
    /// Check the shape and decoded size of a `width` x `height` image of `depth`.
    pub(crate) fn check_image(&self, width: u32, height: u32, depth: Depth) -> Result<(), BmpError> {
        let (width, height) = (u64::from(width), u64::from(height));
        let pixels = width * height;
        let checks = [
            ("width", width, self.max_width),
            ("height", height, self.max_height),
            ("pixel count", pixels, self.max_pixels),
            (
                "decoded bytes",
                pixels.saturating_mul(depth.bytes_per_pixel() as u64),
                self.max_memory_bytes,
            ),
        ];
        for (what, value, limit) in checks {
            if let Some(limit) = limit.filter(|&limit| value > limit) {
                return Err(exceeded(what, value, limit));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unlimited() {
        let limits = Limits::default();
        assert!(limits.check_image(u32::MAX, u32::MAX, Depth::Rgba32).is_ok());
    }

    #[test]
    fn pixel_limit_counts_area() {
        let limits = Limits {
            max_pixels: Some(100),
            ..Default::default()
        };
        assert!(limits.check_image(10, 10, Depth::Mono).is_ok());
        assert!(matches!(
            limits.check_image(10, 11, Depth::Mono),
            Err(BmpError::LimitExceeded(_))
        ));
    }

    #[test]
    fn memory_limit_scales_with_depth() {
        let limits = Limits {
            max_memory_bytes: Some(400),
            ..Default::default()
        };
        assert!(limits.check_image(10, 10, Depth::Rgba32).is_ok());
        assert!(limits.check_image(10, 10, Depth::Gray8).is_ok());
        assert!(limits.check_image(10, 11, Depth::Rgba32).is_err());
    }

    #[test]
    fn width_limit_names_the_field() {
        let limits = Limits {
            max_width: Some(8),
            ..Default::default()
        };
        let err = limits.check_image(9, 1, Depth::Rgb24).unwrap_err();
        assert!(alloc::format!("{err}").contains("width 9"));
    }
}
