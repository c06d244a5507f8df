#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::{DecodeRequest, Limits, RGB8};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let request = DecodeRequest::new(data).with_limits(&limits);

    // Depth-dispatched and typed decode must never panic
    let _ = request.header();
    let _ = request.decode();
    let _ = request.decode_as::<RGB8>();
});
