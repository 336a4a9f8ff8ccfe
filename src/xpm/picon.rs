//! Picon: a 48x48-bounded XPM over a fixed reference palette.

use rgb::RGBA8;

use crate::error::PixmapError;
use crate::image::IndexedImage;
use crate::quantize::{Remap, Resize, palettize};

/// Bounding box for picons.
pub const MAX_SIDE: u32 = 48;

/// Spelling written for the transparent entry of a picon.
pub const TRANSPARENT_SPELLING: &str = "grey75";

const fn gray(v: u8) -> RGBA8 {
    RGBA8::new(v, v, v, 255)
}

const fn rgb(hex: u32) -> RGBA8 {
    RGBA8::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255)
}

/// Reference palette for grayscale sources.
pub const GRAY_PALETTE: [RGBA8; 16] = [
    gray(0x00), gray(0x12), gray(0x21), gray(0x33), gray(0x45), gray(0x54), gray(0x66), gray(0x78),
    gray(0x87), gray(0x99), gray(0xab), gray(0xba), gray(0xcc), gray(0xde), gray(0xed), gray(0xff),
];

/// Reference palette for color sources.
pub const COLOR_PALETTE: [RGBA8; 30] = [
    rgb(0x000000), rgb(0x2f4f4f), rgb(0x708090), rgb(0x7e7e7e), rgb(0xdcdcdc), rgb(0xffffff),
    rgb(0x000080), rgb(0x0000ff), rgb(0x1e90ff), rgb(0x87ceeb), rgb(0xe6e6fa), rgb(0x00ffff),
    rgb(0x800080), rgb(0xb22222), rgb(0x2e8b57), rgb(0x32cd32), rgb(0x00ff00), rgb(0x98fb98),
    rgb(0xff00ff), rgb(0xff0000), rgb(0xff6347), rgb(0xffa500), rgb(0xffd700), rgb(0xffff00),
    rgb(0xee82ee), rgb(0xa0522d), rgb(0xcd853f), rgb(0xd2b48c), rgb(0xf5deb3), rgb(0xfffacd),
];

/// Collaborators and switches for [`build`].
pub struct PiconOptions<'a> {
    pub resize: &'a dyn Resize,
    pub remap: &'a dyn Remap,
    /// Keep the color palette even when every pixel is gray.
    pub true_color: bool,
}

/// Dimensions after shrink-to-fit into `MAX_SIDE` x `MAX_SIDE`.
///
/// Images already inside the box are left alone; others keep their aspect
/// ratio with the long side at `MAX_SIDE`.
pub fn fit_dimensions(width: u32, height: u32) -> (u32, u32) {
    if width <= MAX_SIDE && height <= MAX_SIDE {
        return (width, height);
    }
    let (w, h, side) = (u64::from(width), u64::from(height), u64::from(MAX_SIDE));
    if w >= h {
        (MAX_SIDE, ((h * side + w / 2) / w).max(1) as u32)
    } else {
        (((w * side + h / 2) / h).max(1) as u32, MAX_SIDE)
    }
}

/// Reduce RGBA pixels to a picon-ready indexed image.
///
/// The palette holds only reference colors that are actually used, in
/// reference order, followed by one transparent entry when any pixel has
/// alpha below the threshold. `pixels` must hold exactly `width * height`
/// entries.
pub fn build(
    pixels: &[RGBA8],
    width: u32,
    height: u32,
    options: &PiconOptions<'_>,
) -> Result<IndexedImage, PixmapError> {
    crate::pixel::check_nonzero(width, height)?;
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(PixmapError::NotEnoughPixelData(alloc::format!(
            "expected {expected} pixels, got {}",
            pixels.len()
        )));
    }
    let grayscale = !options.true_color && pixels.iter().all(|p| p.r == p.g && p.g == p.b);

    let (nw, nh) = fit_dimensions(width, height);
    let resized;
    let pixels = if (nw, nh) != (width, height) {
        log::debug!("picon: resizing {width}x{height} to {nw}x{nh}");
        resized = options.resize.resize(pixels, width, height, nw, nh);
        &resized[..]
    } else {
        pixels
    };
    let count = nw as usize * nh as usize;
    if pixels.len() != count {
        return Err(PixmapError::UnsupportedVariant(alloc::format!(
            "resizer returned {} pixels for {nw}x{nh}",
            pixels.len()
        )));
    }

    let reference: &[RGBA8] = if grayscale {
        &GRAY_PALETTE
    } else {
        &COLOR_PALETTE
    };
    let image = palettize(pixels, nw, nh, reference, options.remap)?;
    log::debug!(
        "picon {nw}x{nh}: {} colors from {} palette{}",
        image.palette().len(),
        if grayscale { "gray" } else { "color" },
        if image.has_alpha() { ", transparent" } else { "" }
    );
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use crate::quantize::{BoxResize, NearestRemap};

    fn options() -> PiconOptions<'static> {
        PiconOptions {
            resize: &BoxResize,
            remap: &NearestRemap,
            true_color: false,
        }
    }

    #[test]
    fn shrink_to_fit() {
        assert_eq!(fit_dimensions(32, 16), (32, 16));
        assert_eq!(fit_dimensions(48, 48), (48, 48));
        assert_eq!(fit_dimensions(96, 48), (48, 24));
        assert_eq!(fit_dimensions(100, 100), (48, 48));
        assert_eq!(fit_dimensions(10, 200), (2, 48));
        assert_eq!(fit_dimensions(1000, 1), (48, 1));
    }

    #[test]
    fn gray_source_uses_gray_palette() {
        let px = [gray(0x10), gray(0xf0)];
        let img = build(&px, 2, 1, &options()).unwrap();
        let colors: Vec<RGBA8> = img.palette().iter().map(|e| e.color).collect();
        assert_eq!(colors, [gray(0x12), gray(0xed)]);
    }

    #[test]
    fn true_color_keeps_color_palette() {
        let px = [gray(0x10)];
        let img = build(
            &px,
            1,
            1,
            &PiconOptions {
                true_color: true,
                ..options()
            },
        )
        .unwrap();
        assert_eq!(img.palette()[0].color, rgb(0x000000));
    }

    #[test]
    fn unused_colors_are_dropped() {
        let px = [RGBA8::new(250, 0, 0, 255); 4];
        let img = build(&px, 2, 2, &options()).unwrap();
        assert_eq!(img.palette().len(), 1);
        assert_eq!(img.palette()[0].color, rgb(0xff0000));
    }

    #[test]
    fn transparent_sentinel_is_last() {
        let px = [RGBA8::new(250, 0, 0, 255), RGBA8::new(0, 0, 250, 10)];
        let img = build(&px, 2, 1, &options()).unwrap();
        assert_eq!(img.palette().len(), 2);
        assert!(img.palette()[1].is_transparent());
        assert_eq!(img.indices(), &[0, 1]);
    }

    #[test]
    fn large_sources_are_shrunk() {
        let px = alloc::vec![RGBA8::new(0, 0, 128, 255); 100 * 50];
        let img = build(&px, 100, 50, &options()).unwrap();
        assert_eq!((img.width(), img.height()), (48, 24));
    }

    #[test]
    fn pixel_count_checked_before_resizing() {
        let px = [RGBA8::new(1, 2, 3, 255); 10];
        assert!(matches!(
            build(&px, 100, 100, &options()),
            Err(PixmapError::NotEnoughPixelData(_))
        ));
        assert!(matches!(
            build(&px, 2, 2, &options()),
            Err(PixmapError::NotEnoughPixelData(_))
        ));
    }
}
