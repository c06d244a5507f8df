#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::*;

fuzz_target!(|input: (Vec<u8>, Vec<u8>)| {
    let (data, ops) = input;
    let limits = Limits {
        max_pixels: Some(1 << 16),
        ..Default::default()
    };
    let Ok(mut image) = DecodeRequest::new(&data).with_limits(&limits).decode() else {
        return;
    };

    // Each op is two bytes: selector and argument. Failures are fine, panics are not.
    for op in ops.chunks_exact(2).take(16) {
        let arg = u32::from(op[1] % 64);
        let _ = match op[0] % 8 {
            0 => {
                image.flip(Flip::Horizontal);
                Ok(())
            }
            1 => {
                image.flip(Flip::Vertical);
                Ok(())
            }
            2 => image.rotate(i32::from(op[1]) * 45 - 360),
            3 => image.resize_area(arg, arg / 2 + 1, arg % 3, arg % 5),
            4 => image.resize_image(arg + 1, arg / 3),
            5 => image.to_grey_scale(op[1]),
            6 => image.to_sepia_tone(),
            _ => image.invert(),
        };
        let header = image.header();
        assert_eq!((header.width, header.height), (image.width(), image.height()));
    }

    // Decoded headers carry the input's offsets and reserved fields, so
    // compare what the encoder writes rather than the whole header.
    let encoded = image.encode().expect("transformed image failed to encode");
    let decoded = decode(&encoded).unwrap();
    assert_eq!(
        (decoded.width(), decoded.height(), decoded.depth()),
        (image.width(), image.height(), image.depth())
    );
    assert_eq!(decoded.encode().unwrap(), encoded);
});
