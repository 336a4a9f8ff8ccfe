//! CALS Type 1 raster codec.
//!
//! A CALS file is sixteen 128-byte ASCII header records followed by a
//! CCITT group 4 payload. This module owns the header; the payload is handed
//! to a caller-supplied [`NestedCodec`].

mod bridge;
pub mod header;

pub use bridge::{GROUP4, NestedCodec, NestedDecode, NestedHints};
#[cfg(feature = "std")]
pub use bridge::{FileCodec, ScratchFileCodec};
pub use header::CalsHeader;

use alloc::format;
use alloc::vec::Vec;

use crate::decode::DecodeOutput;
use crate::error::PixmapError;
use crate::image::IndexedImage;
use crate::info::{ImageInfo, Orientation, PixmapFormat};
use crate::limits::Limits;

/// Density written when the caller gives none.
pub const DEFAULT_DENSITY: u32 = 200;

const MAGIC: [&[u8]; 3] = [b"version: MIL-STD-1840", b"srcdocid:", b"rorient:"];

/// Whether `data` looks like a CALS header.
pub fn is_cals(data: &[u8]) -> bool {
    data.len() >= header::RECORD_LEN
        && MAGIC
            .iter()
            .any(|m| data[..m.len()].eq_ignore_ascii_case(m))
}

fn checked_header(data: &[u8]) -> Result<CalsHeader, PixmapError> {
    if !is_cals(data) {
        return Err(PixmapError::UnrecognizedFormat);
    }
    let header = header::parse(data);
    if header.width == 0 || header.height == 0 {
        return Err(PixmapError::MalformedHeader(format!(
            "rpelcnt missing or zero ({}x{})",
            header.width, header.height
        )));
    }
    Ok(header)
}

pub(crate) fn probe(data: &[u8]) -> Result<ImageInfo, PixmapError> {
    let header = checked_header(data)?;
    Ok(ImageInfo {
        width: header.width,
        height: header.height,
        format: PixmapFormat::Cals,
        colors: None,
        symbol_width: None,
        density: header.density,
        orientation: header.orientation,
    })
}

pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    nested: &dyn NestedCodec,
) -> Result<DecodeOutput, PixmapError> {
    let header = checked_header(data)?;
    if let Some(limits) = limits {
        limits.check(header.width, header.height)?;
        let count = (header.width as usize)
            .checked_mul(header.height as usize)
            .ok_or(PixmapError::DimensionsTooLarge {
                width: header.width,
                height: header.height,
            })?;
        limits.check_memory(count.saturating_mul(core::mem::size_of::<u32>()))?;
    }

    let request = NestedDecode {
        format: GROUP4,
        data: &data[header.data_offset..],
        hints: NestedHints {
            width: header.width,
            height: header.height,
            density: header.density,
            orientation: header.orientation,
        },
    };
    log::debug!(
        "cals {}x{}, {} payload bytes",
        header.width,
        header.height,
        request.data.len()
    );
    let image = nested
        .decode(&request)
        .map_err(|e| PixmapError::nested(GROUP4, e))?;

    Ok(DecodeOutput {
        image,
        format: PixmapFormat::Cals,
        depth: 1,
        density: header.density,
        orientation: header.orientation,
    })
}

pub(crate) fn encode(
    image: &IndexedImage,
    density: u32,
    orientation: Orientation,
    nested: &dyn NestedCodec,
) -> Result<Vec<u8>, PixmapError> {
    crate::pixel::check_nonzero(image.width(), image.height())?;
    let payload = nested
        .encode(GROUP4, image)
        .map_err(|e| PixmapError::nested(GROUP4, e))?;
    let mut out = Vec::with_capacity(header::HEADER_LEN + payload.len());
    header::write(&mut out, image.width(), image.height(), density, orientation);
    out.extend_from_slice(&payload);
    Ok(out)
}
