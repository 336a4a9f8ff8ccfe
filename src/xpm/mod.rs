//! XPM (X PixMap) and Picon codec.
//!
//! XPM images are C source: a `static char *name[]` array whose string
//! literals hold a `"<columns> <rows> <colors> <chars-per-pixel>"` header,
//! one color definition per palette entry, and one row of fixed-width pixel
//! symbols per image row. Picons are XPMs shrunk to fit 48x48 and reduced to
//! a small fixed palette.

mod color;
mod container;
mod decode;
mod encode;
pub mod names;
pub mod picon;
pub mod symbol;

pub use color::{ContextTag, ResolvedDefinition, parse_specs, resolve};
pub use container::is_xpm;
pub use decode::XpmHeader;
pub use encode::{ALPHA_THRESHOLD, DEFAULT_NAME, sanitize_name};

use alloc::vec::Vec;

use crate::decode::DecodeOutput;
use crate::error::PixmapError;
use crate::image::IndexedImage;
use crate::info::{ImageInfo, Orientation, PixmapFormat};
use crate::limits::Limits;
use names::{ColorNameLookup, SymbolicNames};
use picon::PiconOptions;

/// Decode XPM bytes.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    names: &dyn ColorNameLookup,
    symbolic: Option<&mut SymbolicNames>,
) -> Result<DecodeOutput, PixmapError> {
    let decoded = decode::decode(data, limits, names, symbolic)?;
    Ok(DecodeOutput {
        image: decoded.image,
        format: PixmapFormat::Xpm,
        depth: decoded.depth,
        density: None,
        orientation: Orientation::TopLeft,
    })
}

/// Read dimensions and palette size without resolving colors.
pub(crate) fn probe(data: &[u8]) -> Result<ImageInfo, PixmapError> {
    if !is_xpm(data) {
        return Err(PixmapError::UnrecognizedFormat);
    }
    let header = XpmHeader::parse(container::parse(data)?.header)?;
    Ok(ImageInfo {
        width: header.columns,
        height: header.rows,
        format: PixmapFormat::Xpm,
        colors: Some(header.colors),
        symbol_width: Some(header.symbol_width as u8),
        density: None,
        orientation: Orientation::TopLeft,
    })
}

/// Encode an indexed image as XPM.
pub(crate) fn encode(
    image: &IndexedImage,
    name: &str,
    names: &dyn ColorNameLookup,
    symbolic: Option<&SymbolicNames>,
) -> Result<Vec<u8>, PixmapError> {
    encode::XpmWriter {
        name,
        names,
        symbolic,
        transparent_spelling: "None",
    }
    .write(image)
}

/// Reduce RGBA pixels to a picon and encode it.
pub(crate) fn encode_picon(
    pixels: &[rgb::RGBA8],
    width: u32,
    height: u32,
    name: &str,
    names: &dyn ColorNameLookup,
    options: &PiconOptions<'_>,
) -> Result<Vec<u8>, PixmapError> {
    let image = picon::build(pixels, width, height, options)?;
    encode::XpmWriter {
        name,
        names,
        symbolic: None,
        transparent_spelling: picon::TRANSPARENT_SPELLING,
    }
    .write(&image)
}
