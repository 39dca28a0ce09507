//! Input format recognition.
//!
//! The decoder dispatches on a format hint derived from the file extension,
//! not on content sniffing. Exactly three raster formats are recognized;
//! everything else is rejected up front, before any bytes are read.

use image::ImageFormat;
use std::path::Path;

/// Extensions whose decoders are compiled in and accepted as input.
const PHOTO_CANDIDATES: &[(&str, ImageKind)] = &[
    ("jpg", ImageKind::Jpeg),
    ("png", ImageKind::Png),
    ("gif", ImageKind::Gif),
];

/// Declared input format, derived from a filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
}

impl ImageKind {
    /// Match an extension (without the dot), case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        PHOTO_CANDIDATES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(ext))
            .map(|(_, kind)| *kind)
    }

    /// Derive the format hint from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// The `image` crate format to decode with.
    pub fn as_image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
            Self::Gif => ImageFormat::Gif,
        }
    }
}

/// Whether a path carries a recognized image extension.
pub fn is_image_path(path: &Path) -> bool {
    ImageKind::from_path(path).is_some()
}
