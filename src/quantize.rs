//! Resampling and palette remapping used by the Picon encoder, and by the
//! XPM encoder when a source has more colors than symbols can address.
//!
//! Both are traits so callers can plug in their own resampler or quantizer;
//! [`BoxResize`] and [`NearestRemap`] are the built-in defaults.

use alloc::vec::Vec;
use rgb::RGBA8;

use crate::error::{BoxError, PixmapError};
use crate::image::{IndexedImage, PaletteEntry};
use crate::xpm::ALPHA_THRESHOLD;
use crate::xpm::names::TRANSPARENT;

/// Resample RGBA pixels to new dimensions.
pub trait Resize {
    fn resize(
        &self,
        pixels: &[RGBA8],
        width: u32,
        height: u32,
        new_width: u32,
        new_height: u32,
    ) -> Vec<RGBA8>;
}

/// Area-average (box filter) resampler.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxResize;

impl Resize for BoxResize {
    fn resize(
        &self,
        pixels: &[RGBA8],
        width: u32,
        height: u32,
        new_width: u32,
        new_height: u32,
    ) -> Vec<RGBA8> {
        let (w, h) = (u64::from(width), u64::from(height));
        let (nw, nh) = (u64::from(new_width), u64::from(new_height));
        let span = |d: u64, n: u64, src: u64| {
            let start = d * src / n;
            let end = ((d + 1) * src / n).max(start + 1).min(src);
            (start as usize, end as usize)
        };

        let mut out = Vec::with_capacity((nw * nh) as usize);
        for dy in 0..nh {
            let (y0, y1) = span(dy, nh, h);
            for dx in 0..nw {
                let (x0, x1) = span(dx, nw, w);
                let mut sum = [0u64; 4];
                for y in y0..y1 {
                    let row = &pixels[y * width as usize..][..width as usize];
                    for px in &row[x0..x1] {
                        sum[0] += u64::from(px.r);
                        sum[1] += u64::from(px.g);
                        sum[2] += u64::from(px.b);
                        sum[3] += u64::from(px.a);
                    }
                }
                let n = ((y1 - y0) * (x1 - x0)) as u64;
                let avg = |s: u64| ((s + n / 2) / n) as u8;
                out.push(RGBA8::new(avg(sum[0]), avg(sum[1]), avg(sum[2]), avg(sum[3])));
            }
        }
        out
    }
}

/// Result of remapping an image onto a reference palette.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Remapped {
    /// Colors the indices refer to. May be a reordering of the reference.
    pub palette: Vec<RGBA8>,
    /// One index per pixel, row-major.
    pub indices: Vec<u32>,
}

/// Map every pixel to a color from a fixed reference palette.
///
/// Pixels arrive opaque; transparency is handled by the caller.
pub trait Remap {
    fn remap(
        &self,
        pixels: &[RGBA8],
        width: u32,
        height: u32,
        palette: &[RGBA8],
    ) -> Result<Remapped, BoxError>;
}

/// Nearest color by squared RGB distance, no dithering. Ties go to the
/// earlier palette entry.
#[derive(Clone, Copy, Debug, Default)]
pub struct NearestRemap;

fn distance(a: RGBA8, b: RGBA8) -> u32 {
    let d = |x: u8, y: u8| {
        let v = i32::from(x) - i32::from(y);
        (v * v) as u32
    };
    d(a.r, b.r) + d(a.g, b.g) + d(a.b, b.b)
}

impl Remap for NearestRemap {
    fn remap(
        &self,
        pixels: &[RGBA8],
        _width: u32,
        _height: u32,
        palette: &[RGBA8],
    ) -> Result<Remapped, BoxError> {
        if palette.is_empty() {
            return Err("reference palette is empty".into());
        }
        let indices = pixels
            .iter()
            .map(|&px| {
                let mut best = (0u32, u32::MAX);
                for (i, &c) in palette.iter().enumerate() {
                    let dist = distance(px, c);
                    if dist < best.1 {
                        best = (i as u32, dist);
                    }
                }
                best.0
            })
            .collect();
        Ok(Remapped {
            palette: palette.to_vec(),
            indices,
        })
    }
}

/// Remapper backed by `imagequant` with the reference colors pinned.
#[cfg(feature = "imagequant")]
#[derive(Clone, Copy, Debug, Default)]
pub struct ImagequantRemap;

#[cfg(feature = "imagequant")]
impl Remap for ImagequantRemap {
    fn remap(
        &self,
        pixels: &[RGBA8],
        width: u32,
        height: u32,
        palette: &[RGBA8],
    ) -> Result<Remapped, BoxError> {
        use imagequant::{Attributes, RGBA};

        if palette.is_empty() || palette.len() > 256 {
            return Err("reference palette must have 1-256 colors".into());
        }
        let mut attr = Attributes::new();
        attr.set_max_colors(palette.len().max(2) as u32)?;

        let bitmap: Vec<RGBA> = pixels
            .iter()
            .map(|p| RGBA::new(p.r, p.g, p.b, p.a))
            .collect();
        let mut img = attr.new_image(bitmap, width as usize, height as usize, 0.0)?;
        for c in palette {
            img.add_fixed_color(RGBA::new(c.r, c.g, c.b, c.a))?;
        }
        let mut result = attr.quantize(&mut img)?;
        result.set_dithering_level(0.0)?;
        let (colors, indices) = result.remapped(&mut img)?;

        Ok(Remapped {
            palette: colors
                .iter()
                .map(|c| RGBA8::new(c.r, c.g, c.b, c.a))
                .collect(),
            indices: indices.into_iter().map(u32::from).collect(),
        })
    }
}

/// The 256-color 3-3-2 RGB cube, indexed `rrrgggbb`.
pub fn uniform_palette() -> Vec<RGBA8> {
    let level = |v: u8, max: u8| (u16::from(v) * 255 / u16::from(max)) as u8;
    (0..=255u8)
        .map(|i| RGBA8::new(level(i >> 5, 7), level(i >> 2 & 7, 7), level(i & 3, 3), 255))
        .collect()
}

/// Remap `pixels` onto `reference` and build an indexed image from the result.
///
/// Pixels with alpha below [`ALPHA_THRESHOLD`] all share one transparent
/// entry, appended last. Reference colors no opaque pixel uses are dropped;
/// the rest keep the remapper's order.
pub(crate) fn palettize(
    pixels: &[RGBA8],
    width: u32,
    height: u32,
    reference: &[RGBA8],
    remap: &dyn Remap,
) -> Result<IndexedImage, PixmapError> {
    let count = width as usize * height as usize;
    let transparent: Vec<bool> = pixels.iter().map(|p| p.a < ALPHA_THRESHOLD).collect();
    let opaque: Vec<RGBA8> = pixels.iter().map(|p| RGBA8 { a: 255, ..*p }).collect();

    let remapped = remap
        .remap(&opaque, width, height, reference)
        .map_err(|e| PixmapError::nested("remap", e))?;
    if remapped.indices.len() != count
        || remapped
            .indices
            .iter()
            .any(|&i| i as usize >= remapped.palette.len())
    {
        return Err(PixmapError::UnsupportedVariant(
            "remapper returned indices outside its palette".into(),
        ));
    }

    let mut used = alloc::vec![false; remapped.palette.len()];
    for (&i, &clear) in remapped.indices.iter().zip(&transparent) {
        if !clear {
            used[i as usize] = true;
        }
    }
    let mut renumber = alloc::vec![0u32; remapped.palette.len()];
    let mut palette = Vec::new();
    for (i, color) in remapped.palette.iter().enumerate() {
        if used[i] {
            renumber[i] = palette.len() as u32;
            palette.push(PaletteEntry::new(*color));
        }
    }

    let sentinel = palette.len() as u32;
    if transparent.iter().any(|&t| t) {
        palette.push(PaletteEntry::new(TRANSPARENT));
    }
    let indices = remapped
        .indices
        .iter()
        .zip(&transparent)
        .map(|(&i, &clear)| if clear { sentinel } else { renumber[i as usize] })
        .collect();
    Ok(IndexedImage::from_parts_unchecked(width, height, palette, indices))
}
