//! # zenpixmaps
//!
//! XPM/Picon text raster codec and CALS type 1 header codec.
//!
//! ## Supported Formats
//!
//! ### XPM
//! - Decode XPM3 C-source images with 1–3 character pixel symbols
//! - Color specs by X11 name, `grayN`, `#rgb` through `#rrrrggggbbbb`, or `None`
//! - Visual context priority `c` > `g` > `g4` > `m`, with `s` symbolic names
//! - Lossless encode of indexed images, minimal symbol width
//!
//! ### Picon
//! - Shrink-to-fit 48x48, remap onto a fixed 16-gray or 30-color palette
//! - Pluggable [`Resize`] and [`Remap`] collaborators
//!
//! ### CALS
//! - Read and write the sixteen 128-byte header records
//! - The group4 raster is delegated to a caller-supplied [`cals::NestedCodec`]
//!
//! ## Non-Goals
//!
//! - CCITT group 4 compression itself
//! - XPM extensions (`XPMEXT`) and hotspots are skipped, not preserved
//! - Animated or multi-image files
//!
//! ## Usage
//!
//! ```no_run
//! use zenpixmaps::{DecodeRequest, EncodeRequest, ImageInfo};
//!
//! let data: &[u8] = &[]; // your XPM bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.format);
//!
//! let decoded = DecodeRequest::new(data).decode()?;
//! let picon = EncodeRequest::picon().with_name("face").encode(&decoded.image)?;
//! # Ok::<(), zenpixmaps::PixmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod image;
mod info;
mod limits;
mod pixel;
mod quantize;

pub mod cals;
pub mod xpm;

mod decode;
mod encode;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use encode::EncodeRequest;
pub use error::{BoxError, PixmapError};
pub use image::{IndexedImage, PaletteEntry};
pub use info::{ImageInfo, Orientation, PixmapFormat};
pub use limits::Limits;
pub use pixel::PixelLayout;
#[cfg(feature = "imagequant")]
pub use quantize::ImagequantRemap;
pub use quantize::{BoxResize, NearestRemap, Remap, Remapped, Resize, uniform_palette};
pub use rgb::RGBA8;
pub use xpm::names::{ColorNameLookup, SymbolicNames, X11Colors};

use alloc::vec::Vec;

/// Decode XPM or CALS, detecting the format. CALS needs `nested`.
pub fn decode(
    data: &[u8],
    nested: Option<&dyn cals::NestedCodec>,
) -> Result<DecodeOutput, PixmapError> {
    let request = DecodeRequest::new(data);
    match nested {
        Some(codec) => request.with_nested_codec(codec).decode(),
        None => request.decode(),
    }
}

/// Decode an XPM image with the built-in color table.
pub fn decode_xpm(data: &[u8]) -> Result<DecodeOutput, PixmapError> {
    DecodeRequest::new(data).decode_xpm()
}

/// Decode a CALS image, delegating the raster to `nested`.
pub fn decode_cals(
    data: &[u8],
    nested: &dyn cals::NestedCodec,
) -> Result<DecodeOutput, PixmapError> {
    DecodeRequest::new(data).with_nested_codec(nested).decode_cals()
}

/// Encode an indexed image as XPM.
pub fn encode_xpm(image: &IndexedImage, name: &str) -> Result<Vec<u8>, PixmapError> {
    EncodeRequest::xpm().with_name(name).encode(image)
}

/// Encode raw pixels as a Picon.
pub fn encode_picon(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<Vec<u8>, PixmapError> {
    EncodeRequest::picon().encode_pixels(pixels, width, height, layout)
}

/// Encode an indexed image as CALS type 1 at the default density.
pub fn encode_cals(
    image: &IndexedImage,
    nested: &dyn cals::NestedCodec,
) -> Result<Vec<u8>, PixmapError> {
    EncodeRequest::cals(nested).encode(image)
}
