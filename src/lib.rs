//! # Obscura
//!
//! Core of a private photo album server. Your filesystem is the data
//! source: configured directories become albums, every image gets an
//! opaque identifier, and bounded-size JPEG renditions are cached on disk.
//!
//! # Architecture
//!
//! Two subsystems carry the interesting engineering; everything else
//! (HTTP routing, HTML, templating) lives outside this crate and talks to
//! them through plain paths, ids, and bounding boxes:
//!
//! ```text
//! register(path) ──► ImageRegistry ──► ImageId        (hand out in URLs)
//! resolve(id)    ──► ImageRegistry ──► path
//! rendition(path, max_w, max_h) ──► RenditionCache ──► cached JPEG path
//! ```
//!
//! A serving layer resolves an id back to a path and asks the cache for a
//! rendition fitting one of the configured presets. The two subsystems are
//! independent; they only meet in the caller.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`registry`] | Path ↔ opaque-id mapping, process-wide, grows only |
//! | [`cache`] | On-disk rendition cache with bounded render concurrency |
//! | [`limiter`] | Counting semaphore gating decode+resize pipelines |
//! | [`imaging`] | Format dispatch, decode/encode backend, fit math |
//! | [`album`] | Album directories → entries (images, sidecar descriptions) |
//! | [`config`] | `config.toml` loading and validation |
//!
//! # Design Decisions
//!
//! ## Ids Hide the Filesystem
//!
//! Image references that leave the process are SHA-256 digests of the
//! path, not the path. A visitor holding a gallery URL learns nothing
//! about directory layout, and the digest is stable, so links keep
//! working across restarts (the registry re-registers the same paths to
//! the same ids on startup).
//!
//! ## The Filesystem Is the Cache Index
//!
//! A rendition's location is a pure function of (path digest, bounding
//! box). There is no manifest to load, lock, or corrupt: if the file
//! exists, it is valid, because artifacts are written once and never
//! updated. Concurrent first requests for the same rendition may race and
//! render twice — the bytes are deterministic, so the race costs cycles,
//! never correctness.
//!
//! ## JPEG-Only Output
//!
//! Renditions are always JPEG at default quality, whatever the input
//! format. One output format keeps the artifact naming scheme and the
//! serving side trivial; inputs are the three formats private collections
//! actually contain (JPEG, PNG, GIF).
//!
//! ## Bounded Render Concurrency
//!
//! Each render holds a decoded image in memory. The [`limiter`] caps how
//! many run at once; callers past the cap block until a slot frees. That
//! is the only backpressure mechanism — no queues, no timeouts.

pub mod album;
pub mod cache;
pub mod config;
pub mod imaging;
pub mod limiter;
pub mod registry;

pub use album::{Album, Entry};
pub use cache::{CacheError, RenditionCache};
pub use config::GalleryConfig;
pub use registry::{ImageId, ImageRegistry};
