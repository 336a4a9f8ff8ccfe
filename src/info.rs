use crate::error::PixmapError;

/// Container format detected from magic bytes.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixmapFormat {
    /// XPM text raster (Picons are XPMs too).
    Xpm,
    /// CALS Type 1 raster: 16 header records and a group4 payload.
    Cals,
}

impl PixmapFormat {
    /// Identify the format from leading bytes.
    pub fn detect(data: &[u8]) -> Option<Self> {
        if crate::xpm::is_xpm(data) {
            Some(Self::Xpm)
        } else if crate::cals::is_cals(data) {
            Some(Self::Cals)
        } else {
            None
        }
    }
}

/// Pixel orientation, numbered like the TIFF/EXIF orientation tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    TopLeft = 1,
    TopRight = 2,
    BottomRight = 3,
    BottomLeft = 4,
    LeftTop = 5,
    RightTop = 6,
    RightBottom = 7,
    LeftBottom = 8,
}

impl Orientation {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => Self::TopLeft,
            2 => Self::TopRight,
            3 => Self::BottomRight,
            4 => Self::BottomLeft,
            5 => Self::LeftTop,
            6 => Self::RightTop,
            7 => Self::RightBottom,
            8 => Self::LeftBottom,
            _ => return None,
        })
    }
}

/// Image metadata read from the header alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: PixmapFormat,
    /// Declared palette size (XPM only).
    pub colors: Option<u32>,
    /// Characters per pixel symbol (XPM only).
    pub symbol_width: Option<u8>,
    /// Pixels per inch (CALS only).
    pub density: Option<u32>,
    pub orientation: Orientation,
}

impl ImageInfo {
    /// Probe header without decoding pixels.
    pub fn from_bytes(data: &[u8]) -> Result<Self, PixmapError> {
        match PixmapFormat::detect(data) {
            Some(PixmapFormat::Xpm) => crate::xpm::probe(data),
            Some(PixmapFormat::Cals) => crate::cals::probe(data),
            None => Err(PixmapError::UnrecognizedFormat),
        }
    }
}
