#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpixmaps::cals::{NestedCodec, NestedDecode};
use zenpixmaps::{BoxError, IndexedImage, Limits, PaletteEntry, RGBA8};

/// Accepts any payload and returns a blank image of the hinted size.
struct Blank;

impl NestedCodec for Blank {
    fn decode(&self, request: &NestedDecode<'_>) -> Result<IndexedImage, BoxError> {
        let (w, h) = (request.hints.width.min(64), request.hints.height.min(64));
        let palette = vec![PaletteEntry::new(RGBA8::new(255, 255, 255, 255))];
        Ok(IndexedImage::new(w, h, palette, vec![0; (w * h) as usize])?)
    }

    fn encode(&self, _: &str, _: &IndexedImage) -> Result<Vec<u8>, BoxError> {
        Ok(Vec::new())
    }
}

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 22),
        max_colors: Some(1 << 16),
        ..Default::default()
    };

    // Auto-detect decode (XPM, CALS) — must never panic
    let _ = zenpixmaps::DecodeRequest::new(data)
        .with_limits(&limits)
        .with_nested_codec(&Blank)
        .decode();

    // Probe and explicit XPM decode — must never panic
    let _ = zenpixmaps::ImageInfo::from_bytes(data);
    let _ = zenpixmaps::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode_xpm();
});
