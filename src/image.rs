use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use rgb::RGBA8;

use crate::error::PixmapError;

/// One color table entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Color value. Alpha 0 marks the transparent (`None`) sentinel.
    pub color: RGBA8,
    /// Symbolic name from an `s` spec, if any.
    pub symbolic: Option<String>,
}

impl PaletteEntry {
    /// Opaque entry without a symbolic name.
    pub fn new(color: RGBA8) -> Self {
        Self {
            color,
            symbolic: None,
        }
    }

    /// Entry carrying a symbolic name.
    pub fn with_symbolic(color: RGBA8, symbolic: impl Into<String>) -> Self {
        Self {
            color,
            symbolic: Some(symbolic.into()),
        }
    }

    /// Whether this entry is the transparent sentinel.
    pub fn is_transparent(&self) -> bool {
        self.color.a == 0
    }
}

/// A palette-indexed raster.
///
/// Indices are stored row-major, top-to-bottom, one `u32` per pixel. Every
/// index is guaranteed to be smaller than the palette length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    palette: Vec<PaletteEntry>,
    indices: Vec<u32>,
}

impl IndexedImage {
    /// Build an image from a palette and row-major indices.
    pub fn new(
        width: u32,
        height: u32,
        palette: Vec<PaletteEntry>,
        indices: Vec<u32>,
    ) -> Result<Self, PixmapError> {
        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or(PixmapError::DimensionsTooLarge { width, height })?;
        if indices.len() != count {
            return Err(PixmapError::NotEnoughPixelData(alloc::format!(
                "expected {count} indices, got {}",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= palette.len()) {
            return Err(PixmapError::UnsupportedVariant(alloc::format!(
                "index {bad} out of range for {} palette entries",
                palette.len()
            )));
        }
        Ok(Self {
            width,
            height,
            palette,
            indices,
        })
    }

    /// Build an exact palette from RGBA pixels, in order of first appearance.
    pub fn from_rgba(pixels: &[RGBA8], width: u32, height: u32) -> Result<Self, PixmapError> {
        let mut lookup: BTreeMap<[u8; 4], u32> = BTreeMap::new();
        let mut palette = Vec::new();
        let mut indices = Vec::with_capacity(pixels.len());
        for px in pixels {
            let key = [px.r, px.g, px.b, px.a];
            let index = *lookup.entry(key).or_insert_with(|| {
                palette.push(PaletteEntry::new(*px));
                (palette.len() - 1) as u32
            });
            indices.push(index);
        }
        Self::new(width, height, palette, indices)
    }

    pub(crate) fn from_parts_unchecked(
        width: u32,
        height: u32,
        palette: Vec<PaletteEntry>,
        indices: Vec<u32>,
    ) -> Self {
        debug_assert_eq!(indices.len(), width as usize * height as usize);
        Self {
            width,
            height,
            palette,
            indices,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn palette(&self) -> &[PaletteEntry] {
        &self.palette
    }

    /// Row-major palette indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Indices of one row.
    pub fn row(&self, y: u32) -> &[u32] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.indices[start..start + w]
    }

    /// Whether any palette entry carries transparency.
    pub fn has_alpha(&self) -> bool {
        self.palette.iter().any(|e| e.color.a != 255)
    }

    /// Color of the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> RGBA8 {
        let i = self.indices[y as usize * self.width as usize + x as usize];
        self.palette[i as usize].color
    }

    /// Expand to RGBA pixels.
    pub fn to_rgba(&self) -> Vec<RGBA8> {
        self.indices
            .iter()
            .map(|&i| self.palette[i as usize].color)
            .collect()
    }

    /// Zero-copy view of the index plane.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, u32> {
        imgref::ImgRef::new(&self.indices, self.width as usize, self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn from_rgba_orders_by_first_appearance() {
        let red = RGBA8::new(255, 0, 0, 255);
        let blue = RGBA8::new(0, 0, 255, 255);
        let img = IndexedImage::from_rgba(&[blue, red, blue, blue], 2, 2).unwrap();
        assert_eq!(img.palette().len(), 2);
        assert_eq!(img.palette()[0].color, blue);
        assert_eq!(img.indices(), &[0, 1, 0, 0]);
        assert_eq!(img.pixel(1, 0), red);
    }

    #[test]
    fn out_of_range_index_rejected() {
        let palette = vec![PaletteEntry::new(RGBA8::new(0, 0, 0, 255))];
        assert!(IndexedImage::new(1, 1, palette, vec![1]).is_err());
    }

    #[test]
    fn wrong_index_count_rejected() {
        let palette = vec![PaletteEntry::new(RGBA8::new(0, 0, 0, 255))];
        let err = IndexedImage::new(2, 2, palette, vec![0, 0, 0]).unwrap_err();
        assert!(matches!(err, PixmapError::NotEnoughPixelData(_)));
    }
}
