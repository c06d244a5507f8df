//! Row packing for each depth.
//!
//! Decoders take exactly one stored row with its padding already sliced
//! off by the caller, and extract `width` pixels. Encoders append the
//! unpadded row to `out`.

use alloc::vec::Vec;

use rgb::{RGB8, RGBA8};

use crate::pixel::{Gray, Mono, Word};

/// Expand MSB-first packed bits into `width` monochrome pixels.
pub(crate) fn unpack_mono(src: &[u8], width: usize, out: &mut Vec<Mono>) {
    let full = width / 8;
    let mut in_iter = src.iter();

    (&mut in_iter).take(full).for_each(|&byte| {
        out.extend([
            Mono::new((byte >> 7) & 0x01),
            Mono::new((byte >> 6) & 0x01),
            Mono::new((byte >> 5) & 0x01),
            Mono::new((byte >> 4) & 0x01),
            Mono::new((byte >> 3) & 0x01),
            Mono::new((byte >> 2) & 0x01),
            Mono::new((byte >> 1) & 0x01),
            Mono::new(byte & 0x01),
        ]);
    });

    let remainder = width % 8;
    if remainder > 0 {
        if let Some(&byte) = in_iter.next() {
            out.extend((0..remainder).map(|pos| Mono::new((byte >> (7 - pos)) & 0x01)));
        }
    }
}

/// Pack monochrome pixels 8 per byte, MSB first. A trailing partial byte
/// has its unused low bits cleared.
pub(crate) fn pack_mono(row: &[Mono], out: &mut Vec<u8>) {
    out.extend(row.chunks(8).map(|chunk| {
        chunk
            .iter()
            .enumerate()
            .fold(0u8, |acc, (pos, px)| acc | (px.value() << (7 - pos)))
    }));
}

pub(crate) fn unpack_gray(src: &[u8], width: usize, out: &mut Vec<Gray>) {
    out.extend(src.iter().take(width).map(|&v| Gray(v)));
}

/// 16-bit words are stored high byte first.
pub(crate) fn unpack_word(src: &[u8], width: usize, out: &mut Vec<Word>) {
    out.extend(
        src.chunks_exact(2)
            .take(width)
            .map(|pair| Word(u16::from_be_bytes([pair[0], pair[1]]))),
    );
}

pub(crate) fn pack_word(row: &[Word], out: &mut Vec<u8>) {
    for px in row {
        out.extend_from_slice(&px.0.to_be_bytes());
    }
}

/// BGR wire order to RGB.
pub(crate) fn unpack_bgr(src: &[u8], width: usize, out: &mut Vec<RGB8>) {
    out.extend(src.chunks_exact(3).take(width).map(|bgr| RGB8 {
        r: bgr[2],
        g: bgr[1],
        b: bgr[0],
    }));
}

pub(crate) fn pack_bgr(row: &[RGB8], out: &mut Vec<u8>) {
    for px in row {
        out.push(px.b);
        out.push(px.g);
        out.push(px.r);
    }
}

/// BGRA wire order to RGBA.
pub(crate) fn unpack_bgra(src: &[u8], width: usize, out: &mut Vec<RGBA8>) {
    out.extend(src.chunks_exact(4).take(width).map(|bgra| RGBA8 {
        r: bgra[2],
        g: bgra[1],
        b: bgra[0],
        a: bgra[3],
    }));
}

pub(crate) fn pack_bgra(row: &[RGBA8], out: &mut Vec<u8>) {
    for px in row {
        out.push(px.b);
        out.push(px.g);
        out.push(px.r);
        out.push(px.a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn mono_msb_first() {
        let mut out = Vec::new();
        unpack_mono(&[0b1010_0001, 0b1100_0000], 10, &mut out);
        let bits: Vec<u8> = out.iter().map(|p| p.value()).collect();
        assert_eq!(bits, vec![1, 0, 1, 0, 0, 0, 0, 1, 1, 1]);

        let mut packed = Vec::new();
        pack_mono(&out, &mut packed);
        assert_eq!(packed, vec![0b1010_0001, 0b1100_0000]);
    }

    #[test]
    fn mono_partial_byte_ignores_low_bits() {
        let mut out = Vec::new();
        unpack_mono(&[0b0111_1111], 1, &mut out);
        assert_eq!(out, vec![Mono::BLACK]);
    }

    #[test]
    fn word_is_high_byte_first() {
        let mut out = Vec::new();
        unpack_word(&[0x12, 0x34, 0xAB, 0xCD], 2, &mut out);
        assert_eq!(out, vec![Word(0x1234), Word(0xABCD)]);

        let mut packed = Vec::new();
        pack_word(&out, &mut packed);
        assert_eq!(packed, vec![0x12, 0x34, 0xAB, 0xCD]);
    }

    #[test]
    fn bgr_channels_are_swapped() {
        let mut out = Vec::new();
        unpack_bgr(&[1, 2, 3, 4, 5, 6, 0, 0], 2, &mut out);
        assert_eq!(out, vec![RGB8::new(3, 2, 1), RGB8::new(6, 5, 4)]);

        let mut packed = Vec::new();
        pack_bgr(&out, &mut packed);
        assert_eq!(packed, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn bgra_keeps_alpha_last() {
        let mut out = Vec::new();
        unpack_bgra(&[10, 20, 30, 40], 1, &mut out);
        assert_eq!(out, vec![RGBA8::new(30, 20, 10, 40)]);

        let mut packed = Vec::new();
        pack_bgra(&out, &mut packed);
        assert_eq!(packed, vec![10, 20, 30, 40]);
    }

    #[test]
    fn gray_stops_at_width() {
        let mut out = Vec::new();
        unpack_gray(&[7, 8, 9, 0], 3, &mut out);
        assert_eq!(out, vec![Gray(7), Gray(8), Gray(9)]);
    }
}
