use alloc::format;
use alloc::vec::Vec;
use rgb::RGBA8;

use crate::error::PixmapError;

/// Pixel memory layout of a truecolor input buffer.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// Single channel, 8-bit grayscale.
    Gray8,
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
    /// 3 channels, 8-bit BGR.
    Bgr8,
    /// 4 channels, 8-bit BGRA.
    Bgra8,
    /// 4 channels, 8-bit BGRX (opaque; 4th byte is padding, not alpha).
    Bgrx8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 | Self::Bgrx8 => 4,
        }
    }
}

/// Normalize a pixel buffer of any supported layout to RGBA8.
pub(crate) fn to_rgba(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<Vec<RGBA8>, PixmapError> {
    let count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(PixmapError::DimensionsTooLarge { width, height })?;
    let bpp = layout.bytes_per_pixel();
    let expected = count
        .checked_mul(bpp)
        .ok_or(PixmapError::DimensionsTooLarge { width, height })?;
    if pixels.len() < expected {
        return Err(PixmapError::BufferTooSmall {
            needed: expected,
            actual: pixels.len(),
        });
    }

    let out = pixels[..expected]
        .chunks_exact(bpp)
        .map(|px| match layout {
            PixelLayout::Gray8 => RGBA8::new(px[0], px[0], px[0], 255),
            PixelLayout::Rgb8 => RGBA8::new(px[0], px[1], px[2], 255),
            PixelLayout::Rgba8 => RGBA8::new(px[0], px[1], px[2], px[3]),
            PixelLayout::Bgr8 => RGBA8::new(px[2], px[1], px[0], 255),
            PixelLayout::Bgra8 => RGBA8::new(px[2], px[1], px[0], px[3]),
            PixelLayout::Bgrx8 => RGBA8::new(px[2], px[1], px[0], 255),
        })
        .collect();
    Ok(out)
}

/// Reject zero-sized images.
pub(crate) fn check_nonzero(width: u32, height: u32) -> Result<(), PixmapError> {
    if width == 0 || height == 0 {
        return Err(PixmapError::UnsupportedVariant(format!(
            "cannot encode a {width}x{height} image"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgra_is_swizzled() {
        let px = to_rgba(&[1, 2, 3, 4], 1, 1, PixelLayout::Bgra8).unwrap();
        assert_eq!(px, [RGBA8::new(3, 2, 1, 4)]);
    }

    #[test]
    fn bgrx_padding_is_opaque() {
        let px = to_rgba(&[1, 2, 3, 0], 1, 1, PixelLayout::Bgrx8).unwrap();
        assert_eq!(px[0].a, 255);
    }

    #[test]
    fn short_buffer_rejected() {
        let err = to_rgba(&[0; 5], 2, 1, PixelLayout::Rgb8).unwrap_err();
        assert!(matches!(
            err,
            PixmapError::BufferTooSmall {
                needed: 6,
                actual: 5
            }
        ));
    }
}
