#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpixmaps::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 20),
        max_colors: Some(1 << 14),
        ..Default::default()
    };
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let Ok(decoded) = DecodeRequest::new(data).with_limits(&limits).decode_xpm() else {
        return;
    };

    let Ok(reencoded) = encode_xpm(&decoded.image, "fuzz") else {
        return;
    };
    let Ok(decoded2) = decode_xpm(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.width(), decoded2.width());
    assert_eq!(decoded.height(), decoded2.height());
    assert_eq!(
        decoded.image.to_rgba(),
        decoded2.image.to_rgba(),
        "roundtrip pixel mismatch"
    );
});
