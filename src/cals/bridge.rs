//! Hand-off to the external bitonal (group4) codec.

use alloc::vec::Vec;

use crate::error::BoxError;
use crate::image::IndexedImage;
use crate::info::Orientation;

/// Sub-format name of the CALS raster payload.
pub const GROUP4: &str = "group4";

/// Geometry hints passed with a nested decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NestedHints {
    pub width: u32,
    pub height: u32,
    pub density: Option<u32>,
    pub orientation: Orientation,
}

/// A nested decode request: the raw payload plus what the header said.
#[derive(Clone, Copy, Debug)]
pub struct NestedDecode<'a> {
    pub format: &'a str,
    pub data: &'a [u8],
    pub hints: NestedHints,
}

/// Codec for the raster payload embedded in a CALS file.
///
/// Decoding should return a bitonal image (palette of two entries) sized
/// from the hints; encoding receives the image to compress.
pub trait NestedCodec {
    fn decode(&self, request: &NestedDecode<'_>) -> Result<IndexedImage, BoxError>;

    fn encode(&self, format: &str, image: &IndexedImage) -> Result<Vec<u8>, BoxError>;
}

impl<T: NestedCodec + ?Sized> NestedCodec for &T {
    fn decode(&self, request: &NestedDecode<'_>) -> Result<IndexedImage, BoxError> {
        (**self).decode(request)
    }

    fn encode(&self, format: &str, image: &IndexedImage) -> Result<Vec<u8>, BoxError> {
        (**self).encode(format, image)
    }
}

#[cfg(feature = "std")]
pub use scratch::{FileCodec, ScratchFileCodec};

#[cfg(feature = "std")]
mod scratch {
    use std::io::Write as _;
    use std::path::{Path, PathBuf};

    use super::{NestedCodec, NestedDecode, NestedHints};
    use crate::error::BoxError;
    use crate::image::IndexedImage;

    /// A bitonal codec that reads its input from a named file.
    pub trait FileCodec {
        /// Decode the file at `path`. `source` is the `<format>:<path>`
        /// name of the same file.
        fn decode_file(
            &self,
            source: &str,
            path: &Path,
            hints: &NestedHints,
        ) -> Result<IndexedImage, BoxError>;

        fn encode(&self, format: &str, image: &IndexedImage) -> Result<Vec<u8>, BoxError>;
    }

    /// Adapts a [`FileCodec`] to [`NestedCodec`] by spilling the payload
    /// into a scratch file that is removed when the decode finishes.
    #[derive(Clone, Debug)]
    pub struct ScratchFileCodec<C> {
        inner: C,
        dir: Option<PathBuf>,
    }

    impl<C: FileCodec> ScratchFileCodec<C> {
        pub fn new(inner: C) -> Self {
            Self { inner, dir: None }
        }

        /// Create scratch files in `dir` instead of the system temp dir.
        pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
            self.dir = Some(dir.into());
            self
        }

        pub fn inner(&self) -> &C {
            &self.inner
        }
    }

    impl<C: FileCodec> NestedCodec for ScratchFileCodec<C> {
        fn decode(&self, request: &NestedDecode<'_>) -> Result<IndexedImage, BoxError> {
            let mut builder = tempfile::Builder::new();
            builder.prefix("zenpixmaps-").suffix(".g4");
            let mut scratch = match &self.dir {
                Some(dir) => builder.tempfile_in(dir)?,
                None => builder.tempfile()?,
            };
            scratch.write_all(request.data)?;
            scratch.flush()?;

            let source = format!("{}:{}", request.format, scratch.path().display());
            log::debug!("nested decode via {source} ({} bytes)", request.data.len());
            let decoded = self
                .inner
                .decode_file(&source, scratch.path(), &request.hints);
            // removal runs on drop too; close() surfaces its error
            let closed = scratch.close();
            let image = decoded?;
            closed?;
            Ok(image)
        }

        fn encode(&self, format: &str, image: &IndexedImage) -> Result<Vec<u8>, BoxError> {
            self.inner.encode(format, image)
        }
    }
}
