//! Per-depth pixel representations.
//!
//! Each supported bit depth has exactly one pixel type. The 24 and 32-bit
//! depths use the `rgb` crate's [`RGB8`] and [`RGBA8`] directly; the other
//! three are small newtypes defined here.

use alloc::vec::Vec;
use core::fmt;

use rgb::{RGB8, RGBA8};

use crate::bmp::pack;

/// Bits-per-pixel classification of a BMP image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Depth {
    /// 1 bit per pixel, 8 pixels per byte, MSB first.
    Mono,
    /// 8 bits per pixel, raw index or grey value.
    Gray8,
    /// 16 bits per pixel, one opaque word.
    Word16,
    /// 24 bits per pixel, BGR on the wire.
    Rgb24,
    /// 32 bits per pixel, BGRA on the wire.
    Rgba32,
}

impl Depth {
    /// Map a header `bitsPerPixel` value to a depth.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            1 => Some(Self::Mono),
            8 => Some(Self::Gray8),
            16 => Some(Self::Word16),
            24 => Some(Self::Rgb24),
            32 => Some(Self::Rgba32),
            _ => None,
        }
    }

    /// The `bitsPerPixel` header value for this depth.
    pub fn bits(self) -> u16 {
        match self {
            Self::Mono => 1,
            Self::Gray8 => 8,
            Self::Word16 => 16,
            Self::Rgb24 => 24,
            Self::Rgba32 => 32,
        }
    }

    /// `ceil(bits / 8)`. Monochrome rounds up to one byte.
    pub fn bytes_per_pixel(self) -> usize {
        usize::from(self.bits()).div_ceil(8)
    }

    /// Whether the depth carries red, green and blue channels.
    pub fn is_color(self) -> bool {
        matches!(self, Self::Rgb24 | Self::Rgba32)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A pixel of one of the five supported depths.
///
/// This trait is sealed. Beyond the plain channel accessors each type
/// carries its wire packing rule and its padding value for area growth.
pub trait Pixel: Copy + PartialEq + fmt::Debug + sealed::Sealed {
    /// Depth this pixel type is stored at.
    const DEPTH: Depth;

    /// Value written into cells that appear when an area grows.
    fn background() -> Self;

    /// Bilinear combination of four neighbours.
    ///
    /// `weights` are applied to `corners` in order and every channel is
    /// truncated back to its integer domain.
    fn blend(corners: [Self; 4], weights: [f32; 4]) -> Self;

    /// Unpack `width` pixels from one stored row (padding excluded).
    fn decode_row(src: &[u8], width: usize, out: &mut Vec<Self>);

    /// Pack one row of pixels into wire order, without padding.
    fn encode_row(row: &[Self], out: &mut Vec<u8>);
}

/// Pixels with red, green and blue channels.
pub trait ColorPixel: Pixel {
    fn red(&self) -> u8;
    fn green(&self) -> u8;
    fn blue(&self) -> u8;

    /// Replace the colour channels, keeping alpha where present.
    fn set_rgb(&mut self, red: u8, green: u8, blue: u8);
}

/// 1-bit pixel. Any non-zero input is stored as 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Mono(u8);

impl Mono {
    pub const BLACK: Mono = Mono(0);
    pub const WHITE: Mono = Mono(1);

    pub fn new(value: u8) -> Self {
        Self(u8::from(value > 0))
    }

    /// 0 or 1.
    pub fn value(self) -> u8 {
        self.0
    }

    pub fn set(&mut self, value: u8) {
        *self = Self::new(value);
    }
}

/// 8-bit pixel: a grey level or a raw palette index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gray(pub u8);

impl Gray {
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn set(&mut self, value: u8) {
        self.0 = value;
    }
}

/// 16-bit pixel, kept as a single word with no channel split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Word(pub u16);

impl Word {
    pub fn new(value: u16) -> Self {
        Self(value)
    }

    pub fn value(self) -> u16 {
        self.0
    }

    pub fn set(&mut self, value: u16) {
        self.0 = value;
    }
}

impl sealed::Sealed for Mono {}
impl sealed::Sealed for Gray {}
impl sealed::Sealed for Word {}
impl sealed::Sealed for RGB8 {}
impl sealed::Sealed for RGBA8 {}

fn weighted(values: [f32; 4], weights: [f32; 4]) -> f32 {
    values[0] * weights[0] + values[1] * weights[1] + values[2] * weights[2] + values[3] * weights[3]
}

fn blend_u8(values: [u8; 4], weights: [f32; 4]) -> u8 {
    weighted(values.map(f32::from), weights) as u8
}

impl Pixel for Mono {
    const DEPTH: Depth = Depth::Mono;

    fn background() -> Self {
        Mono::WHITE
    }

    fn blend(corners: [Self; 4], weights: [f32; 4]) -> Self {
        Mono::new(blend_u8(corners.map(Mono::value), weights))
    }

    fn decode_row(src: &[u8], width: usize, out: &mut Vec<Self>) {
        pack::unpack_mono(src, width, out);
    }

    fn encode_row(row: &[Self], out: &mut Vec<u8>) {
        pack::pack_mono(row, out);
    }
}

impl Pixel for Gray {
    const DEPTH: Depth = Depth::Gray8;

    fn background() -> Self {
        Gray(255)
    }

    fn blend(corners: [Self; 4], weights: [f32; 4]) -> Self {
        Gray(blend_u8(corners.map(Gray::value), weights))
    }

    fn decode_row(src: &[u8], width: usize, out: &mut Vec<Self>) {
        pack::unpack_gray(src, width, out);
    }

    fn encode_row(row: &[Self], out: &mut Vec<u8>) {
        out.extend(row.iter().map(|p| p.0));
    }
}

impl Pixel for Word {
    const DEPTH: Depth = Depth::Word16;

    fn background() -> Self {
        Word(u16::MAX)
    }

    fn blend(corners: [Self; 4], weights: [f32; 4]) -> Self {
        Word(weighted(corners.map(|p| f32::from(p.0)), weights) as u16)
    }

    fn decode_row(src: &[u8], width: usize, out: &mut Vec<Self>) {
        pack::unpack_word(src, width, out);
    }

    fn encode_row(row: &[Self], out: &mut Vec<u8>) {
        pack::pack_word(row, out);
    }
}

impl Pixel for RGB8 {
    const DEPTH: Depth = Depth::Rgb24;

    fn background() -> Self {
        RGB8 {
            r: 255,
            g: 255,
            b: 255,
        }
    }

    fn blend(corners: [Self; 4], weights: [f32; 4]) -> Self {
        RGB8 {
            r: blend_u8(corners.map(|p| p.r), weights),
            g: blend_u8(corners.map(|p| p.g), weights),
            b: blend_u8(corners.map(|p| p.b), weights),
        }
    }

    fn decode_row(src: &[u8], width: usize, out: &mut Vec<Self>) {
        pack::unpack_bgr(src, width, out);
    }

    fn encode_row(row: &[Self], out: &mut Vec<u8>) {
        pack::pack_bgr(row, out);
    }
}

impl Pixel for RGBA8 {
    const DEPTH: Depth = Depth::Rgba32;

    fn background() -> Self {
        RGBA8 {
            r: 255,
            g: 255,
            b: 255,
            a: 255,
        }
    }

    fn blend(corners: [Self; 4], weights: [f32; 4]) -> Self {
        RGBA8 {
            r: blend_u8(corners.map(|p| p.r), weights),
            g: blend_u8(corners.map(|p| p.g), weights),
            b: blend_u8(corners.map(|p| p.b), weights),
            a: blend_u8(corners.map(|p| p.a), weights),
        }
    }

    fn decode_row(src: &[u8], width: usize, out: &mut Vec<Self>) {
        pack::unpack_bgra(src, width, out);
    }

    fn encode_row(row: &[Self], out: &mut Vec<u8>) {
        pack::pack_bgra(row, out);
    }
}

impl ColorPixel for RGB8 {
    fn red(&self) -> u8 {
        self.r
    }

    fn green(&self) -> u8 {
        self.g
    }

    fn blue(&self) -> u8 {
        self.b
    }

    fn set_rgb(&mut self, red: u8, green: u8, blue: u8) {
        self.r = red;
        self.g = green;
        self.b = blue;
    }
}

impl ColorPixel for RGBA8 {
    fn red(&self) -> u8 {
        self.r
    }

    fn green(&self) -> u8 {
        self.g
    }

    fn blue(&self) -> u8 {
        self.b
    }

    fn set_rgb(&mut self, red: u8, green: u8, blue: u8) {
        self.r = red;
        self.g = green;
        self.b = blue;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_clamps_to_one_bit() {
        assert_eq!(Mono::new(0).value(), 0);
        assert_eq!(Mono::new(1).value(), 1);
        assert_eq!(Mono::new(200).value(), 1);

        let mut px = Mono::BLACK;
        px.set(7);
        assert_eq!(px, Mono::WHITE);
        px.set(0);
        assert_eq!(px, Mono::BLACK);
    }

    #[test]
    fn depth_bits_roundtrip() {
        for bits in [1u16, 8, 16, 24, 32] {
            let depth = Depth::from_bits(bits).unwrap();
            assert_eq!(depth.bits(), bits);
        }
        assert_eq!(Depth::from_bits(4), None);
        assert_eq!(Depth::from_bits(0), None);
        assert_eq!(Depth::Mono.bytes_per_pixel(), 1);
        assert_eq!(Depth::Word16.bytes_per_pixel(), 2);
        assert_eq!(Depth::Rgba32.bytes_per_pixel(), 4);
    }

    #[test]
    fn backgrounds_per_depth() {
        assert_eq!(Mono::background(), Mono::WHITE);
        assert_eq!(Gray::background(), Gray(255));
        assert_eq!(Word::background(), Word(65535));
        assert_eq!(RGB8::background(), RGB8::new(255, 255, 255));
        assert_eq!(RGBA8::background(), RGBA8::new(255, 255, 255, 255));
    }

    #[test]
    fn blend_truncates_channels() {
        let corners = [
            RGB8::new(10, 0, 255),
            RGB8::new(20, 0, 255),
            RGB8::new(30, 0, 255),
            RGB8::new(40, 0, 255),
        ];
        let out = RGB8::blend(corners, [0.25; 4]);
        assert_eq!(out, RGB8::new(25, 0, 255));

        let words = [Word(100), Word(201), Word(0), Word(0)];
        assert_eq!(Word::blend(words, [0.5, 0.5, 0.0, 0.0]), Word(150));
    }

    #[test]
    fn mono_blend_clamps() {
        let corners = [Mono::WHITE, Mono::BLACK, Mono::BLACK, Mono::BLACK];
        assert_eq!(Mono::blend(corners, [1.0, 0.0, 0.0, 0.0]), Mono::WHITE);
        assert_eq!(Mono::blend(corners, [0.5, 0.5, 0.0, 0.0]), Mono::BLACK);
    }

    #[test]
    fn set_rgb_keeps_alpha() {
        let mut px = RGBA8::new(1, 2, 3, 77);
        px.set_rgb(9, 8, 7);
        assert_eq!(px, RGBA8::new(9, 8, 7, 77));
        assert_eq!((px.red(), px.green(), px.blue()), (9, 8, 7));
    }
}
