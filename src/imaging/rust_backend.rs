//! Pure Rust image processing backend — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF) | `image` crate (pure Rust decoders) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (default quality) |
//!
//! Decoding dispatches on the extension-derived [`ImageKind`] hint, never on
//! content sniffing: a `.png` file containing JPEG bytes is a decode error,
//! not a silent format switch.

use super::backend::{ImageBackend, ImagingError};
use super::format::ImageKind;
use image::{DynamicImage, ImageReader};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
#[derive(Debug, Default)]
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<DynamicImage, ImagingError> {
        let Some(kind) = ImageKind::from_path(path) else {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_string();
            return Err(ImagingError::UnsupportedFormat(ext));
        };

        let mut reader = ImageReader::open(path)?;
        reader.set_format(kind.as_image_format());
        reader.decode().map_err(|e| ImagingError::Decode {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn save_jpeg(&self, img: &DynamicImage, path: &Path) -> Result<(), ImagingError> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        let encoder = image::codecs::jpeg::JpegEncoder::new(writer);
        // JPEG has no alpha; flatten anything the decoders produced
        img.to_rgb8()
            .write_with_encoder(encoder)
            .map_err(|e| ImagingError::Encode {
                path: path.to_path_buf(),
                source: e,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageEncoder, RgbImage};

    /// Create a small valid JPEG file with the given dimensions.
    fn create_test_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let file = File::create(path).unwrap();
        let writer = BufWriter::new(file);
        image::codecs::jpeg::JpegEncoder::new(writer)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
    }

    #[test]
    fn decode_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let backend = RustBackend::new();
        let img = backend.decode(&path).unwrap();
        assert_eq!((img.width(), img.height()), (200, 150));
    }

    #[test]
    fn decode_synthetic_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.png");
        let img = RgbImage::from_pixel(64, 48, image::Rgb([10, 20, 30]));
        img.save(&path).unwrap();

        let backend = RustBackend::new();
        let decoded = backend.decode(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    #[test]
    fn decode_unsupported_extension_rejected_up_front() {
        let backend = RustBackend::new();
        // The file doesn't even exist; rejection happens before any I/O
        let err = backend.decode(Path::new("/photos/scan.bmp")).unwrap_err();
        assert!(matches!(err, ImagingError::UnsupportedFormat(ext) if ext == "bmp"));
    }

    #[test]
    fn decode_truncated_stream_is_decode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.jpg");
        std::fs::write(&path, b"\xff\xd8\xff\xe0 not actually a jpeg").unwrap();

        let backend = RustBackend::new();
        let err = backend.decode(&path).unwrap_err();
        assert!(matches!(err, ImagingError::Decode { .. }));
    }

    #[test]
    fn decode_mislabeled_extension_is_decode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        // PNG bytes behind a .jpg name: the hint wins, decode fails
        let path = tmp.path().join("mislabeled.jpg");
        let img = RgbImage::new(8, 8);
        img.save_with_format(&path, image::ImageFormat::Png).unwrap();

        let backend = RustBackend::new();
        let err = backend.decode(&path).unwrap_err();
        assert!(matches!(err, ImagingError::Decode { .. }));
    }

    #[test]
    fn decode_missing_file_is_io_error() {
        let backend = RustBackend::new();
        let err = backend.decode(Path::new("/nonexistent/image.jpg")).unwrap_err();
        assert!(matches!(err, ImagingError::Io(_)));
    }

    #[test]
    fn save_jpeg_roundtrips() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("out.jpg");

        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(120, 90, image::Rgb([200, 10, 10])));
        let backend = RustBackend::new();
        backend.save_jpeg(&img, &out).unwrap();

        let reread = backend.decode(&out).unwrap();
        assert_eq!((reread.width(), reread.height()), (120, 90));
    }

    #[test]
    fn save_jpeg_flattens_alpha() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("out.jpg");

        let rgba = image::RgbaImage::from_pixel(16, 16, image::Rgba([0, 255, 0, 128]));
        let backend = RustBackend::new();
        backend
            .save_jpeg(&DynamicImage::ImageRgba8(rgba), &out)
            .unwrap();
        assert!(std::fs::metadata(&out).unwrap().len() > 0);
    }

    #[test]
    fn save_jpeg_unwritable_path_is_io_error() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        let backend = RustBackend::new();
        let err = backend
            .save_jpeg(&img, Path::new("/nonexistent-dir/out.jpg"))
            .unwrap_err();
        assert!(matches!(err, ImagingError::Io(_)));
    }
}
