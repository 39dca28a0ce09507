//! On-disk rendition cache.
//!
//! Decoding and Lanczos-resampling a full-size photo is the expensive part
//! of serving a collection, so every bounded-size copy is written to a cache
//! directory and reused forever. The cache has no index: the artifact file
//! name is derived purely from (digest of the original path, bounding box),
//! and the existence of the file at that path *is* the cache entry.
//!
//! ```text
//! <cache_dir>/<sha256 hex of original path>-<maxW>x<maxH>.jpg
//! ```
//!
//! # Concurrency
//!
//! The hit path is lock-free: a plain existence check, no limiter slot. The
//! miss path takes a slot from a fixed-capacity [`Limiter`] so that at most
//! N decode+resize pipelines run at once, bounding peak memory and CPU.
//!
//! Two concurrent first-time requests for the same key may both see the
//! artifact absent and both render it. This race is accepted: the outputs
//! are deterministic, so the duplicate work wastes cycles but can never
//! corrupt — whoever writes last writes the same bytes. There is no per-key
//! in-flight deduplication and no retry logic; the key is stable, so a
//! caller retrying a failed request later is safe and idempotent.
//!
//! # Errors
//!
//! Unsupported or corrupt originals are request-level failures
//! ([`CacheError::Imaging`]) — report, skip the item, carry on. Failures
//! writing the artifact ([`CacheError::Fatal`]) mean the cache directory
//! itself is broken (disk full, permissions); callers are required to treat
//! that as unrecoverable and abort the pipeline rather than serve on.

use crate::imaging::{ImageBackend, ImagingError, RustBackend, fit_within};
use crate::limiter::Limiter;
use image::imageops::FilterType;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    /// Request-level failure: bad input image. Report and skip.
    #[error("imaging error: {0}")]
    Imaging(#[from] ImagingError),
    /// Environment failure while writing to the cache directory.
    /// Contractually unrecoverable: abort the operation, do not soft-retry.
    #[error("cache storage failed (unrecoverable): {0}")]
    Fatal(#[source] ImagingError),
}

impl CacheError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }
}

/// Cache of resized JPEG copies, keyed by (original path, bounding box).
pub struct RenditionCache<B = RustBackend> {
    cache_dir: PathBuf,
    limiter: Limiter,
    backend: B,
}

impl RenditionCache<RustBackend> {
    /// Cache writing to `cache_dir` with at most `capacity` concurrent
    /// renders. Creates the directory; failure to do so is fatal.
    pub fn new(cache_dir: impl Into<PathBuf>, capacity: usize) -> Result<Self, CacheError> {
        Self::with_backend(cache_dir, capacity, RustBackend::new())
    }
}

impl<B: ImageBackend> RenditionCache<B> {
    pub fn with_backend(
        cache_dir: impl Into<PathBuf>,
        capacity: usize,
        backend: B,
    ) -> Result<Self, CacheError> {
        let cache_dir = cache_dir.into();
        std::fs::create_dir_all(&cache_dir)
            .map_err(|e| CacheError::Fatal(ImagingError::Io(e)))?;
        Ok(Self {
            cache_dir,
            limiter: Limiter::new(capacity),
            backend,
        })
    }

    /// The deterministic artifact path for an original and bounding box.
    ///
    /// Same inputs, same path — always, across processes.
    pub fn artifact_path(&self, orig: &Path, max_width: u32, max_height: u32) -> PathBuf {
        let digest = Sha256::digest(orig.to_string_lossy().as_bytes());
        self.cache_dir
            .join(format!("{:x}-{}x{}.jpg", digest, max_width, max_height))
    }

    /// Return the path to a rendition of `orig` fitting `max_width × max_height`,
    /// rendering and caching it first if absent.
    ///
    /// The rendition preserves aspect ratio and never exceeds the box; see
    /// [`fit_within`] for the exact clamp order. Output is always JPEG at
    /// default quality, regardless of input format.
    pub fn rendition(
        &self,
        orig: &Path,
        max_width: u32,
        max_height: u32,
    ) -> Result<PathBuf, CacheError> {
        let artifact = self.artifact_path(orig, max_width, max_height);

        // Fast path: the file on disk is the cache entry.
        if artifact.exists() {
            return Ok(artifact);
        }

        // Slot held for the whole decode→resize→encode pipeline, released
        // on every exit path below.
        let _permit = self.limiter.acquire();

        let img = self.backend.decode(orig)?;
        let (w, h) = fit_within((img.width(), img.height()), (max_width, max_height));
        let resized = img.resize_exact(w, h, FilterType::Lanczos3);

        if let Err(e) = self.backend.save_jpeg(&resized, &artifact) {
            // Existence is the only validity check, so a truncated artifact
            // must not survive the failure.
            let _ = std::fs::remove_file(&artifact);
            return Err(CacheError::Fatal(e));
        }

        Ok(artifact)
    }

    /// The concurrency gate, exposed for observability.
    pub fn limiter(&self) -> &Limiter {
        &self.limiter
    }
}
