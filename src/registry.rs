//! Opaque image identifiers.
//!
//! Served pages reference images by id, never by path, so the filesystem
//! layout of a collection is not visible to anyone holding a URL. Ids are
//! the SHA-256 of the absolute path, hex-rendered — stable across calls
//! and across processes, but only reversible through the registry that
//! minted them.
//!
//! The registry is an explicitly constructed object: build one at startup
//! and hand it (by reference or `Arc`) to everything that needs it. The
//! mapping only grows and lives for the process lifetime. No eviction —
//! these are personal collections, not web-scale, and the per-path cost
//! is two map entries.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Opaque identifier for a registered image.
///
/// Suitable for embedding in a public-facing reference (e.g. a URL path
/// segment). Reversible only via [`ImageRegistry::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    /// Wrap an id received from the outside (e.g. parsed out of a URL).
    ///
    /// No validation happens here; an id that was never registered simply
    /// resolves to `None`.
    pub fn from_external(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bidirectional path ↔ id mapping, shared process-wide.
///
/// Both directions live behind a single `Mutex`, held only for the map
/// lookup/insert — never across I/O — so contention is bounded by map
/// operation cost.
#[derive(Debug, Default)]
pub struct ImageRegistry {
    inner: Mutex<Maps>,
}

#[derive(Debug, Default)]
struct Maps {
    path_to_id: HashMap<PathBuf, ImageId>,
    id_to_path: HashMap<ImageId, PathBuf>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a path, returning its opaque id.
    ///
    /// Idempotent: repeated calls with the same path return the same id.
    /// Never fails.
    pub fn register(&self, path: &Path) -> ImageId {
        let mut maps = self.inner.lock().unwrap();
        if let Some(id) = maps.path_to_id.get(path) {
            return id.clone();
        }
        let id = ImageId(hash_path(path));
        maps.path_to_id.insert(path.to_path_buf(), id.clone());
        maps.id_to_path.insert(id.clone(), path.to_path_buf());
        id
    }

    /// Look up the path behind an id.
    ///
    /// Returns `None` for ids this registry never produced — callers may
    /// pass in arbitrary external input.
    pub fn resolve(&self, id: &ImageId) -> Option<PathBuf> {
        let maps = self.inner.lock().unwrap();
        maps.id_to_path.get(id).cloned()
    }

    /// Number of registered images.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().path_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// SHA-256 of the path string, as lowercase hex.
fn hash_path(path: &Path) -> String {
    let digest = Sha256::digest(path.to_string_lossy().as_bytes());
    format!("{:x}", digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn resolve_roundtrips_register() {
        let reg = ImageRegistry::new();
        let id = reg.register(Path::new("/photos/a.jpg"));
        assert_eq!(reg.resolve(&id), Some(PathBuf::from("/photos/a.jpg")));
    }

    #[test]
    fn register_is_idempotent() {
        let reg = ImageRegistry::new();
        let first = reg.register(Path::new("/photos/a.jpg"));
        let second = reg.register(Path::new("/photos/a.jpg"));
        assert_eq!(first, second);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn distinct_paths_get_distinct_ids() {
        let reg = ImageRegistry::new();
        let a = reg.register(Path::new("/photos/a.jpg"));
        let b = reg.register(Path::new("/photos/b.jpg"));
        assert_ne!(a, b);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn resolve_unknown_id_is_none() {
        let reg = ImageRegistry::new();
        reg.register(Path::new("/photos/a.jpg"));
        let unknown = ImageId::from_external("deadbeef");
        assert_eq!(reg.resolve(&unknown), None);
    }

    #[test]
    fn id_is_sha256_hex_of_path() {
        let reg = ImageRegistry::new();
        let id = reg.register(Path::new("/photos/a.jpg"));
        assert_eq!(id.as_str().len(), 64);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        // And it hides the path: no path component leaks into the id
        assert!(!id.as_str().contains("photos"));
    }

    #[test]
    fn ids_are_stable_across_registries() {
        let a = ImageRegistry::new().register(Path::new("/photos/a.jpg"));
        let b = ImageRegistry::new().register(Path::new("/photos/a.jpg"));
        assert_eq!(a, b);
    }

    #[test]
    fn concurrent_registration_converges() {
        let reg = Arc::new(ImageRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let reg = Arc::clone(&reg);
                std::thread::spawn(move || reg.register(Path::new("/photos/race.jpg")))
            })
            .collect();
        let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(reg.len(), 1);
        assert_eq!(
            reg.resolve(&ids[0]),
            Some(PathBuf::from("/photos/race.jpg"))
        );
    }
}
