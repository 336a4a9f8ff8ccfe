use alloc::boxed::Box;
use alloc::string::String;

/// Boxed error returned by external collaborators (nested codecs, remappers).
pub type BoxError = Box<dyn core::error::Error + Send + Sync>;

/// Errors from XPM/Picon/CALS decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PixmapError {
    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("unterminated string literal")]
    UnterminatedLiteral,

    #[error("duplicate or missing symbol: {0}")]
    DuplicateOrMissingSymbol(String),

    #[error("pixel symbol at ({x}, {y}) is not in the color table")]
    CorruptColorIndex { x: u32, y: u32 },

    #[error("not enough pixel data: {0}")]
    NotEnoughPixelData(String),

    #[error("unsupported symbol width {0} (must be 1-3)")]
    UnsupportedSymbolWidth(u64),

    #[error("byte 0x{0:02x} is not a symbol glyph")]
    InvalidSymbol(u8),

    #[error("ambiguous color specification: {0}")]
    AmbiguousColorSpec(String),

    #[error("unknown color: {0}")]
    UnknownColor(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("nested {codec} codec failed")]
    NestedCodecFailure {
        codec: String,
        #[source]
        source: BoxError,
    },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },
}

impl PixmapError {
    pub(crate) fn nested(codec: &str, source: BoxError) -> Self {
        PixmapError::NestedCodecFailure {
            codec: codec.into(),
            source,
        }
    }
}
