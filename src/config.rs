//! Gallery configuration.
//!
//! Loaded once at startup from a `config.toml`. Everything the core treats
//! as pluggable lives here: the cache directory, the concurrency limit, the
//! two bounding-box presets the serving layer requests, and the album table.
//!
//! ```toml
//! # All top-level options are optional — defaults shown
//! cache_dir = "cache"
//! concurrency = 4
//!
//! [presets]
//! thumb = [300, 200]    # album-page rendition bounding box
//! full = [1600, 1600]   # lightbox rendition bounding box
//!
//! # Albums are required — an empty config serves nothing
//! [albums.portraits]
//! path = "/photos/portraits"
//! reverse_order = true   # newest-first listing
//! path_as_name = true    # derive entry names from file stems
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Directory renditions are cached in.
    pub cache_dir: PathBuf,
    /// Maximum simultaneous decode+resize pipelines.
    pub concurrency: usize,
    /// The bounding boxes calling code requests.
    pub presets: Presets,
    /// Albums by public name.
    pub albums: BTreeMap<String, AlbumConfig>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("cache"),
            concurrency: 4,
            presets: Presets::default(),
            albums: BTreeMap::new(),
        }
    }
}

/// Rendition bounding boxes, as `[max_width, max_height]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Presets {
    pub thumb: [u32; 2],
    pub full: [u32; 2],
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            thumb: [300, 200],
            full: [1600, 1600],
        }
    }
}

impl Presets {
    pub fn thumb(&self) -> (u32, u32) {
        (self.thumb[0], self.thumb[1])
    }

    pub fn full(&self) -> (u32, u32) {
        (self.full[0], self.full[1])
    }
}

/// One album directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlbumConfig {
    /// Absolute path of the album directory.
    pub path: PathBuf,
    /// List entries newest-first (reverse directory order).
    #[serde(default)]
    pub reverse_order: bool,
    /// Derive entry names from file/directory stems.
    #[serde(default)]
    pub path_as_name: bool,
}

impl GalleryConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values are usable before anything is constructed from them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::Validation(
                "concurrency must be at least 1".to_string(),
            ));
        }
        for (name, dims) in [("thumb", self.presets.thumb), ("full", self.presets.full)] {
            if dims[0] == 0 || dims[1] == 0 {
                return Err(ConfigError::Validation(format!(
                    "preset '{}' must have positive dimensions, got {}x{}",
                    name, dims[0], dims[1]
                )));
            }
        }
        for (name, album) in &self.albums {
            if album.path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "album '{}' has an empty path",
                    name
                )));
            }
        }
        Ok(())
    }
}
