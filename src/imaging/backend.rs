//! Image processing backend trait and error taxonomy.
//!
//! The [`ImageBackend`] trait covers the two operations the rendition cache
//! needs: decode an original into memory and encode a processed image back
//! out as JPEG. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, statically
//! linked. Tests use a mock that records calls instead of touching pixels,
//! which is how the cache's "no decode on a hit" property is observed.

use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from decode/encode work.
///
/// `UnsupportedFormat` and `Decode` are request-level: the item is reported
/// and skipped, never a crash. Failures while writing output are promoted
/// to a fatal error by the cache (see [`CacheError`](crate::cache::CacheError)).
#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Trait for image processing backends.
///
/// The decoder performs no resizing or color conversion — it hands back the
/// image in its native representation, dimensions queryable.
pub trait ImageBackend: Sync {
    /// Open and decode an original image, dispatching on its declared format.
    fn decode(&self, path: &Path) -> Result<DynamicImage, ImagingError>;

    /// Encode an image as JPEG at default quality and write it to `path`.
    fn save_jpeg(&self, img: &DynamicImage, path: &Path) -> Result<(), ImagingError>;
}
