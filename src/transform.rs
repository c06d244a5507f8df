//! Geometric transforms: flip, rotate, crop/pad and bilinear resize.
//!
//! Every transform that changes shape builds one auxiliary buffer and
//! swaps it in after all validation has passed, so a failed call leaves
//! the raster untouched.

use crate::error::BmpError;
use crate::pixel::Pixel;
use crate::raster::{Raster, pixel_buffer, pixel_count};

/// Flip axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flip {
    /// Mirror columns within every row.
    Horizontal,
    /// Reverse the order of rows.
    Vertical,
}

/// Depth-independent operations shared by typed bitmaps and [`crate::Image`].
pub trait Transform {
    fn flip(&mut self, axis: Flip);

    /// Rotate clockwise by a multiple of 90 degrees.
    fn rotate(&mut self, degrees: i32) -> Result<(), BmpError>;

    /// Crop or pad to `width` x `height`, keeping the visual top-left.
    ///
    /// Offsets move the kept window right and down and only apply to a
    /// dimension that shrinks. Cells that appear are filled with the
    /// depth's background pixel.
    fn resize_area(
        &mut self,
        width: u32,
        height: u32,
        x_offset: u32,
        y_offset: u32,
    ) -> Result<(), BmpError>;

    /// Bilinear rescale to `width` x `height`.
    fn resize_image(&mut self, width: u32, height: u32) -> Result<(), BmpError>;
}

impl<P: Pixel> Raster<P> {
    pub fn flip(&mut self, axis: Flip) {
        let w = self.width() as usize;
        let h = self.height() as usize;
        let pixels = self.pixels_mut();
        match axis {
            Flip::Horizontal => pixels.chunks_exact_mut(w).for_each(<[P]>::reverse),
            Flip::Vertical => {
                for i in 0..h / 2 {
                    let (low, high) = pixels.split_at_mut((h - 1 - i) * w);
                    low[i * w..(i + 1) * w].swap_with_slice(&mut high[..w]);
                }
            }
        }
    }

    /// Rotate clockwise. Storage coordinates follow
    /// `dst[w-1-j][i] = src[i][j]` for 90 and `dst[j][h-1-i] = src[i][j]`
    /// for 270, with row 0 at the bottom.
    pub fn rotate(&mut self, degrees: i32) -> Result<(), BmpError> {
        if degrees % 90 != 0 {
            return Err(BmpError::InvalidAngle(degrees));
        }
        match degrees.rem_euclid(360) {
            0 => {}
            // Reversing the row-major buffer reverses rows and columns at once.
            180 => self.pixels_mut().reverse(),
            90 => self.rotate_quarter(true)?,
            _ => self.rotate_quarter(false)?,
        }
        Ok(())
    }

    fn rotate_quarter(&mut self, clockwise: bool) -> Result<(), BmpError> {
        let w = self.width() as usize;
        let h = self.height() as usize;
        let mut rotated = pixel_buffer(self.height(), self.width())?;
        let src = self.pixels();
        for row in 0..w {
            for column in 0..h {
                let index = if clockwise {
                    column * w + (w - 1 - row)
                } else {
                    (h - 1 - column) * w + row
                };
                rotated.push(src[index]);
            }
        }
        let (width, height) = (self.height(), self.width());
        self.replace(width, height, rotated);
        Ok(())
    }

    pub fn resize_area(
        &mut self,
        width: u32,
        height: u32,
        x_offset: u32,
        y_offset: u32,
    ) -> Result<(), BmpError> {
        pixel_count(width, height)?;

        let x_offset = if width < self.width() { x_offset } else { 0 };
        let y_offset = if height < self.height() { y_offset } else { 0 };
        let fits = |size: u32, offset: u32, current: u32| {
            size.checked_add(offset).is_some_and(|end| end <= current)
        };
        if !fits(width, x_offset, self.width().max(width))
            || !fits(height, y_offset, self.height().max(height))
        {
            return Err(BmpError::InvalidArea {
                width,
                height,
                x_offset,
                y_offset,
                current_width: self.width(),
                current_height: self.height(),
            });
        }

        // One pass: a growing dimension pads, a shrinking one crops at its offset.
        if width == self.width() && height == self.height() {
            return Ok(());
        }
        self.reframe(width, height, x_offset, y_offset)
    }

    /// New visual cell (r, c) takes old visual cell (r + y_offset,
    /// c + x_offset), or the background when that lies outside.
    fn reframe(
        &mut self,
        width: u32,
        height: u32,
        x_offset: u32,
        y_offset: u32,
    ) -> Result<(), BmpError> {
        let (old_w, old_h) = (self.width() as usize, self.height() as usize);
        let (new_w, new_h) = (width as usize, height as usize);
        let (x_offset, y_offset) = (x_offset as usize, y_offset as usize);
        let mut framed = pixel_buffer(width, height)?;
        let src = self.pixels();

        for stored_row in 0..new_h {
            let source_row = (new_h - 1 - stored_row) + y_offset;
            if source_row >= old_h {
                framed.extend(core::iter::repeat_n(P::background(), new_w));
                continue;
            }
            let old_row_start = (old_h - 1 - source_row) * old_w;
            for column in 0..new_w {
                let source_column = column + x_offset;
                framed.push(if source_column < old_w {
                    src[old_row_start + source_column]
                } else {
                    P::background()
                });
            }
        }
        self.replace(width, height, framed);
        Ok(())
    }

    pub fn resize_image(&mut self, width: u32, height: u32) -> Result<(), BmpError> {
        let mut resized = pixel_buffer(width, height)?;
        let prev_w = self.width() as usize;
        let prev_h = self.height() as usize;
        let x_ratio = (prev_w - 1) as f32 / width as f32;
        let y_ratio = (prev_h - 1) as f32 / height as f32;
        let src = self.pixels();

        for row in 0..height as usize {
            let fy = y_ratio * row as f32;
            let y = (fy as usize).min(prev_h - 1);
            let y_diff = fy - y as f32;
            let y_next = (y + 1).min(prev_h - 1);
            for column in 0..width as usize {
                let fx = x_ratio * column as f32;
                let x = (fx as usize).min(prev_w - 1);
                let x_diff = fx - x as f32;
                let x_next = (x + 1).min(prev_w - 1);

                let corners = [
                    src[y * prev_w + x],
                    src[y * prev_w + x_next],
                    src[y_next * prev_w + x],
                    src[y_next * prev_w + x_next],
                ];
                // Yb = A(1-w)(1-h) + B(w)(1-h) + C(h)(1-w) + D(wh)
                let weights = [
                    (1.0 - x_diff) * (1.0 - y_diff),
                    x_diff * (1.0 - y_diff),
                    y_diff * (1.0 - x_diff),
                    x_diff * y_diff,
                ];
                resized.push(P::blend(corners, weights));
            }
        }
        self.replace(width, height, resized);
        Ok(())
    }
}

impl<P: Pixel> Transform for Raster<P> {
    fn flip(&mut self, axis: Flip) {
        Raster::flip(self, axis);
    }

    fn rotate(&mut self, degrees: i32) -> Result<(), BmpError> {
        Raster::rotate(self, degrees)
    }

    fn resize_area(
        &mut self,
        width: u32,
        height: u32,
        x_offset: u32,
        y_offset: u32,
    ) -> Result<(), BmpError> {
        Raster::resize_area(self, width, height, x_offset, y_offset)
    }

    fn resize_image(&mut self, width: u32, height: u32) -> Result<(), BmpError> {
        Raster::resize_image(self, width, height)
    }
}
