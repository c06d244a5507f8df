//! Per-pixel colour remapping for RGB and RGBA bitmaps. Alpha is never touched.

use crate::error::BmpError;
use crate::image::Bitmap;
use crate::pixel::ColorPixel;

const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

fn sepia_channel(coefficients: [f32; 3], red: u8, green: u8, blue: u8) -> u8 {
    let value = coefficients[0] * f32::from(red)
        + coefficients[1] * f32::from(green)
        + coefficients[2] * f32::from(blue);
    value.min(255.0) as u8
}

fn grey_value<P: ColorPixel>(pixel: &P, step: Option<u8>) -> u8 {
    let sum = u16::from(pixel.red()) + u16::from(pixel.green()) + u16::from(pixel.blue());
    let grey = (sum / 3) as u8;
    match step {
        Some(step) => grey - grey % step,
        None => grey,
    }
}

impl<P: ColorPixel> Bitmap<P> {
    /// Replace every colour with the integer mean of its channels.
    ///
    /// With `levels < 255` the grey value is snapped down to a multiple of
    /// `255 / levels`. Zero levels is rejected.
    pub fn to_grey_scale(&mut self, levels: u8) -> Result<(), BmpError> {
        if levels == 0 {
            return Err(BmpError::InvalidGreyLevels);
        }
        log::trace!("grey scale, {levels} levels");
        let step = (levels < u8::MAX).then(|| u8::MAX / levels);
        for pixel in self.pixels_mut() {
            let grey = grey_value(pixel, step);
            pixel.set_rgb(grey, grey, grey);
        }
        Ok(())
    }

    pub fn to_sepia_tone(&mut self) {
        log::trace!("sepia tone");
        for pixel in self.pixels_mut() {
            let (red, green, blue) = (pixel.red(), pixel.green(), pixel.blue());
            pixel.set_rgb(
                sepia_channel(SEPIA[0], red, green, blue),
                sepia_channel(SEPIA[1], red, green, blue),
                sepia_channel(SEPIA[2], red, green, blue),
            );
        }
    }

    /// `255 - c` on each colour channel.
    pub fn invert(&mut self) {
        log::trace!("invert");
        for pixel in self.pixels_mut() {
            let (red, green, blue) = (pixel.red(), pixel.green(), pixel.blue());
            pixel.set_rgb(255 - red, 255 - green, 255 - blue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rgb::{RGB8, RGBA8};

    fn rgb(pixels: &[RGB8]) -> Bitmap<RGB8> {
        Bitmap::from_pixels(pixels.len() as u32, 1, pixels.to_vec()).unwrap()
    }

    #[test]
    fn grey_is_channel_mean() {
        let mut bitmap = rgb(&[RGB8::new(30, 60, 90), RGB8::new(255, 255, 254)]);
        bitmap.to_grey_scale(255).unwrap();
        assert_eq!(
            bitmap.pixels(),
            &[RGB8::new(60, 60, 60), RGB8::new(254, 254, 254)]
        );
    }

    #[test]
    fn grey_levels_quantize() {
        let mut bitmap = rgb(&[RGB8::new(30, 60, 90), RGB8::new(10, 20, 33)]);
        // step 255 / 51 = 5; 60 stays, 21 drops to 20
        bitmap.to_grey_scale(51).unwrap();
        assert_eq!(
            bitmap.pixels(),
            &[RGB8::new(60, 60, 60), RGB8::new(20, 20, 20)]
        );

        let mut two = rgb(&[RGB8::new(200, 200, 200), RGB8::new(100, 100, 100)]);
        // step 127
        two.to_grey_scale(2).unwrap();
        assert_eq!(two.pixels(), &[RGB8::new(127, 127, 127), RGB8::new(0, 0, 0)]);
    }

    #[test]
    fn zero_grey_levels_rejected() {
        let mut bitmap = rgb(&[RGB8::new(1, 2, 3)]);
        assert!(matches!(
            bitmap.to_grey_scale(0),
            Err(BmpError::InvalidGreyLevels)
        ));
        assert_eq!(bitmap.pixels(), &[RGB8::new(1, 2, 3)]);
    }

    #[test]
    fn sepia_saturates_and_truncates() {
        let mut bitmap = rgb(&[RGB8::new(255, 255, 255), RGB8::new(100, 100, 100)]);
        bitmap.to_sepia_tone();
        assert_eq!(
            bitmap.pixels(),
            &[RGB8::new(255, 255, 238), RGB8::new(135, 120, 93)]
        );
    }

    #[test]
    fn invert_keeps_alpha() {
        let mut bitmap =
            Bitmap::from_pixels(2, 1, vec![RGBA8::new(0, 10, 255, 7), RGBA8::new(1, 2, 3, 200)])
                .unwrap();
        bitmap.invert();
        assert_eq!(
            bitmap.pixels(),
            &[RGBA8::new(255, 245, 0, 7), RGBA8::new(254, 253, 252, 200)]
        );
        bitmap.invert();
        assert_eq!(bitmap.pixels()[0], RGBA8::new(0, 10, 255, 7));
    }

    #[test]
    fn grey_and_sepia_keep_alpha() {
        let mut bitmap = Bitmap::from_pixels(1, 1, vec![RGBA8::new(30, 60, 90, 42)]).unwrap();
        bitmap.to_grey_scale(255).unwrap();
        assert_eq!(bitmap.pixels()[0], RGBA8::new(60, 60, 60, 42));
        bitmap.to_sepia_tone();
        assert_eq!(bitmap.pixels()[0].a, 42);
    }
}
