#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: u32, height: i32, bits: u16, pixels: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; 54];
    out[0] = b'B';
    out[1] = b'M';
    out[2..6].copy_from_slice(&(54 + pixels.len() as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&bits.to_le_bytes());
    out[34..38].copy_from_slice(&(pixels.len() as u32).to_le_bytes()); // data size
    out.extend_from_slice(pixels);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/mono_10x2.bmp"), bmp(10, 2, 1, &[0xA0, 0xC0, 0, 0, 0x01, 0x40, 0, 0])).unwrap();
    fs::write(format!("{dir}/gray_5x1.bmp"), bmp(5, 1, 8, &[1, 2, 3, 4, 5, 0, 0, 0])).unwrap();
    fs::write(format!("{dir}/word_3x1.bmp"), bmp(3, 1, 16, &[0x12, 0x34, 0xAB, 0xCD, 0, 1, 0, 0])).unwrap();
    fs::write(
        format!("{dir}/rgb_2x2.bmp"),
        bmp(2, 2, 24, &[255, 0, 0, 0, 255, 0, 0, 0, 0, 0, 255, 30, 20, 10, 0, 0]),
    )
    .unwrap();
    fs::write(format!("{dir}/rgba_2x1.bmp"), bmp(2, 1, 32, &[1, 2, 3, 4, 5, 6, 7, 8])).unwrap();
    fs::write(format!("{dir}/rgb_top_down.bmp"), bmp(1, -2, 24, &[1, 2, 3, 0, 4, 5, 6, 0])).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/rgb_truncated.bmp"), bmp(4, 4, 24, &[0; 20])).unwrap();
    fs::write(format!("{dir}/four_bit.bmp"), bmp(1, 1, 4, &[0; 4])).unwrap();

    println!("Generated seed corpus in {dir}/");
}
