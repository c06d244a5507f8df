#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let Ok(decoded) = DecodeRequest::new(data).with_limits(&limits).decode() else {
        return;
    };

    let reencoded = decoded.encode().expect("decoded image failed to encode");
    let Ok(decoded2) = decode(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded2.width(), decoded.width());
    assert_eq!(decoded2.height(), decoded.height());
    assert_eq!(decoded2.depth(), decoded.depth());
    assert_eq!(decoded2.encode().unwrap(), reencoded, "roundtrip byte mismatch");
});
