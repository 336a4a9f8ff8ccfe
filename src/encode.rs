use alloc::vec::Vec;
use rgb::RGBA8;

use crate::cals::{self, NestedCodec};
use crate::error::PixmapError;
use crate::image::IndexedImage;
use crate::info::Orientation;
use crate::pixel::{self, PixelLayout};
use crate::quantize::{self, BoxResize, NearestRemap, Remap, Resize};
use crate::xpm::names::{ColorNameLookup, SymbolicNames, X11Colors};
use crate::xpm::picon::PiconOptions;
use crate::xpm::symbol::MAX_COLORS;
use crate::xpm::{self, DEFAULT_NAME};

enum Target<'a> {
    Xpm,
    Picon { true_color: bool },
    Cals(&'a dyn NestedCodec),
}

/// Encode builder.
///
/// ```no_run
/// use zenpixmaps::{EncodeRequest, IndexedImage};
///
/// # fn get() -> IndexedImage { unimplemented!() }
/// let image = get();
/// let xpm = EncodeRequest::xpm().with_name("icon").encode(&image)?;
/// # Ok::<(), zenpixmaps::PixmapError>(())
/// ```
pub struct EncodeRequest<'a> {
    target: Target<'a>,
    name: &'a str,
    names: &'a dyn ColorNameLookup,
    symbolic: Option<&'a SymbolicNames>,
    resize: &'a dyn Resize,
    remap: &'a dyn Remap,
    density: u32,
    orientation: Orientation,
}

impl<'a> EncodeRequest<'a> {
    fn with_target(target: Target<'a>) -> Self {
        Self {
            target,
            name: DEFAULT_NAME,
            names: &X11Colors,
            symbolic: None,
            resize: &BoxResize,
            remap: &NearestRemap,
            density: cals::DEFAULT_DENSITY,
            orientation: Orientation::TopLeft,
        }
    }

    /// Lossless XPM.
    pub fn xpm() -> Self {
        Self::with_target(Target::Xpm)
    }

    /// Picon: shrunk to 48x48 and remapped onto the reference palette.
    pub fn picon() -> Self {
        Self::with_target(Target::Picon { true_color: false })
    }

    /// CALS type 1, with the raster compressed by `codec`.
    pub fn cals(codec: &'a dyn NestedCodec) -> Self {
        Self::with_target(Target::Cals(codec))
    }

    /// C array name (XPM/Picon). Sanitized into an identifier.
    pub fn with_name(mut self, name: &'a str) -> Self {
        self.name = name;
        self
    }

    pub fn with_color_names(mut self, names: &'a dyn ColorNameLookup) -> Self {
        self.names = names;
        self
    }

    /// Symbolic names for entries that carry none of their own (XPM).
    pub fn with_symbolic_names(mut self, table: &'a SymbolicNames) -> Self {
        self.symbolic = Some(table);
        self
    }

    /// Resampler used when a picon source exceeds 48x48.
    pub fn with_resize(mut self, resize: &'a dyn Resize) -> Self {
        self.resize = resize;
        self
    }

    /// Remapper onto the picon reference palette, also used to reduce XPM
    /// sources with more colors than three-glyph symbols can address.
    pub fn with_remap(mut self, remap: &'a dyn Remap) -> Self {
        self.remap = remap;
        self
    }

    /// Keep the color reference palette even for gray sources (Picon).
    pub fn with_true_color(mut self, true_color: bool) -> Self {
        if let Target::Picon { true_color: t } = &mut self.target {
            *t = true_color;
        }
        self
    }

    /// Pixels per inch written to `rdensty` (CALS).
    pub fn with_density(mut self, density: u32) -> Self {
        self.density = density;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Encode an indexed image.
    ///
    /// An XPM palette larger than three-glyph symbols can address is reduced
    /// onto the 3-3-2 color cube through the remapper first.
    pub fn encode(&self, image: &IndexedImage) -> Result<Vec<u8>, PixmapError> {
        match &self.target {
            Target::Xpm if image.palette().len() > MAX_COLORS as usize => {
                let pixels = image.to_rgba();
                let reduced = self.reduce(&pixels, image.width(), image.height())?;
                xpm::encode(&reduced, self.name, self.names, self.symbolic)
            }
            Target::Xpm => xpm::encode(image, self.name, self.names, self.symbolic),
            Target::Picon { .. } => {
                let pixels = image.to_rgba();
                self.encode_picon_rgba(&pixels, image.width(), image.height())
            }
            Target::Cals(codec) => cals::encode(image, self.density, self.orientation, *codec),
        }
    }

    /// Encode raw pixels.
    ///
    /// XPM and CALS build an exact palette from the pixels; Picon remaps
    /// them onto its reference palette.
    pub fn encode_pixels(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<Vec<u8>, PixmapError> {
        let rgba = pixel::to_rgba(pixels, width, height, layout)?;
        match &self.target {
            Target::Picon { .. } => self.encode_picon_rgba(&rgba, width, height),
            _ => self.encode(&IndexedImage::from_rgba(&rgba, width, height)?),
        }
    }

    fn reduce(
        &self,
        pixels: &[RGBA8],
        width: u32,
        height: u32,
    ) -> Result<IndexedImage, PixmapError> {
        log::debug!("xpm: more than {MAX_COLORS} colors, remapping onto the 3-3-2 cube");
        quantize::palettize(pixels, width, height, &quantize::uniform_palette(), self.remap)
    }

    fn encode_picon_rgba(
        &self,
        pixels: &[RGBA8],
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, PixmapError> {
        let true_color = matches!(self.target, Target::Picon { true_color: true });
        let options = PiconOptions {
            resize: self.resize,
            remap: self.remap,
            true_color,
        };
        xpm::encode_picon(pixels, width, height, self.name, self.names, &options)
    }
}
