//! Album directories and their entries.
//!
//! An album is a flat directory. Each child becomes one entry:
//!
//! ```text
//! /photos/portraits/
//! ├── dawn.jpg            # single-image entry
//! ├── dawn.txt            # optional sidecar description for dawn.jpg
//! ├── studio-set/         # group entry: several images shown together
//! │   ├── 01.jpg
//! │   ├── 02.jpg
//! │   └── notes.txt       # description, accumulated across .txt files
//! └── notes.md            # unknown file: reported and skipped
//! ```
//!
//! Entries reference images by opaque [`ImageId`] only — scanning registers
//! every image path, and raw paths never appear in the output. Unreadable
//! or unrecognized children are reported and skipped; only failing to read
//! the album directory itself is an error.

use crate::imaging::is_image_path;
use crate::registry::{ImageId, ImageRegistry};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlbumError {
    #[error("failed to read album directory {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A configured album directory.
#[derive(Debug, Clone)]
pub struct Album {
    path: PathBuf,
    reverse_order: bool,
    path_as_name: bool,
}

/// A single item in an album: one image with an optional description, or a
/// directory of images grouped together.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    /// Display name; empty unless the album derives names from paths.
    pub name: String,
    pub description: String,
    pub images: Vec<ImageId>,
}

/// What an album child is, decided by name alone.
#[derive(Debug, PartialEq, Eq)]
enum ChildKind {
    Image,
    Group,
    /// `.txt` description next to an image; consumed with that image.
    Sidecar,
    Unknown,
}

fn classify(path: &Path, is_dir: bool) -> ChildKind {
    if is_dir {
        ChildKind::Group
    } else if is_image_path(path) {
        ChildKind::Image
    } else if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("txt")) {
        ChildKind::Sidecar
    } else {
        ChildKind::Unknown
    }
}

impl Album {
    pub fn new(path: impl Into<PathBuf>, reverse_order: bool, path_as_name: bool) -> Self {
        Self {
            path: path.into(),
            reverse_order,
            path_as_name,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries whose file name contains `filter`, case-insensitively.
    /// An empty filter matches everything.
    ///
    /// Children are visited in name order (reversed when the album is
    /// configured newest-first). Every image encountered is registered,
    /// so entry image lists contain opaque ids only.
    pub fn entries(
        &self,
        registry: &ImageRegistry,
        filter: &str,
    ) -> Result<Vec<Entry>, AlbumError> {
        let mut children: Vec<_> = fs::read_dir(&self.path)
            .map_err(|e| AlbumError::Unreadable {
                path: self.path.clone(),
                source: e,
            })?
            .filter_map(|e| e.ok())
            .collect();
        children.sort_by_key(|e| e.file_name());
        if self.reverse_order {
            children.reverse();
        }

        let filter = filter.to_lowercase();
        let mut entries = Vec::new();
        for child in children {
            let file_name = child.file_name();
            let name = file_name.to_string_lossy();
            if !name.to_lowercase().contains(&filter) {
                continue;
            }
            let is_dir = child.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let path = child.path();
            match classify(&path, is_dir) {
                ChildKind::Image => entries.push(self.load_image(registry, &path)),
                ChildKind::Group => match self.load_group(registry, &path) {
                    Some(entry) => entries.push(entry),
                    None => eprintln!("unreadable directory {}", path.display()),
                },
                // Sidecars are picked up next to their image, not as entries
                ChildKind::Sidecar => {}
                ChildKind::Unknown => eprintln!("unknown file {}", path.display()),
            }
        }
        Ok(entries)
    }

    fn load_image(&self, registry: &ImageRegistry, path: &Path) -> Entry {
        let description = fs::read_to_string(path.with_extension("txt")).unwrap_or_default();
        Entry {
            name: self.entry_name(path),
            description,
            images: vec![registry.register(path)],
        }
    }

    /// A directory groups several images and their descriptions into one entry.
    fn load_group(&self, registry: &ImageRegistry, dir: &Path) -> Option<Entry> {
        let mut items: Vec<_> = fs::read_dir(dir).ok()?.filter_map(|e| e.ok()).collect();
        items.sort_by_key(|e| e.file_name());

        let mut entry = Entry {
            name: self.entry_name(dir),
            description: String::new(),
            images: Vec::new(),
        };
        for item in items {
            let item_path = item.path();
            if is_image_path(&item_path) {
                entry.images.push(registry.register(&item_path));
            } else if item_path.extension().is_some_and(|e| e.eq_ignore_ascii_case("txt")) {
                match fs::read_to_string(&item_path) {
                    Ok(text) => entry.description.push_str(&text),
                    Err(e) => eprintln!("unreadable description {}: {e}", item_path.display()),
                }
            } else {
                eprintln!("unknown item {}", item_path.display());
            }
        }
        Some(entry)
    }

    fn entry_name(&self, path: &Path) -> String {
        if !self.path_as_name {
            return String::new();
        }
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
