use crate::cals::NestedCodec;
use crate::error::PixmapError;
use crate::image::IndexedImage;
use crate::info::{Orientation, PixmapFormat};
use crate::limits::Limits;
use crate::xpm::names::{ColorNameLookup, SymbolicNames, X11Colors};

/// Decoded image plus format metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOutput {
    pub image: IndexedImage,
    pub format: PixmapFormat,
    /// Bits per channel: the deepest XPM color spec, or 1 for CALS.
    pub depth: u8,
    /// Pixels per inch, when the header declares it (CALS).
    pub density: Option<u32>,
    pub orientation: Orientation,
}

impl DecodeOutput {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn into_image(self) -> IndexedImage {
        self.image
    }
}

/// Decode builder.
///
/// ```no_run
/// use zenpixmaps::DecodeRequest;
///
/// let data: &[u8] = b"/* XPM */ ...";
/// let decoded = DecodeRequest::new(data).decode()?;
/// # Ok::<(), zenpixmaps::PixmapError>(())
/// ```
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    names: &'a dyn ColorNameLookup,
    symbolic: Option<&'a mut SymbolicNames>,
    nested: Option<&'a dyn NestedCodec>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            names: &X11Colors,
            symbolic: None,
            nested: None,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Replace the built-in X11 color table.
    pub fn with_color_names(mut self, names: &'a dyn ColorNameLookup) -> Self {
        self.names = names;
        self
    }

    /// Record `s` symbolic names into `table`.
    pub fn with_symbolic_names(mut self, table: &'a mut SymbolicNames) -> Self {
        self.symbolic = Some(table);
        self
    }

    /// Codec for the group4 payload of CALS files. Required to decode CALS.
    pub fn with_nested_codec(mut self, codec: &'a dyn NestedCodec) -> Self {
        self.nested = Some(codec);
        self
    }

    /// Detect the format and decode.
    pub fn decode(self) -> Result<DecodeOutput, PixmapError> {
        match PixmapFormat::detect(self.data) {
            Some(PixmapFormat::Xpm) => self.decode_xpm(),
            Some(PixmapFormat::Cals) => self.decode_cals(),
            None => Err(PixmapError::UnrecognizedFormat),
        }
    }

    pub fn decode_xpm(self) -> Result<DecodeOutput, PixmapError> {
        crate::xpm::decode(self.data, self.limits, self.names, self.symbolic)
    }

    pub fn decode_cals(self) -> Result<DecodeOutput, PixmapError> {
        let nested = self.nested.ok_or_else(|| {
            PixmapError::UnsupportedVariant("CALS decode needs a nested group4 codec".into())
        })?;
        crate::cals::decode(self.data, self.limits, nested)
    }
}
