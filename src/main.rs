use clap::{Parser, Subcommand};
use obscura::{Album, Entry, GalleryConfig, ImageRegistry, RenditionCache};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::PathBuf;

fn version_string() -> &'static str {
    let hash = env!("GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup — trivial, called exactly once
        Box::leak(format!("{}+{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "obscura")]
#[command(about = "Private photo album server core")]
#[command(long_about = "\
Private photo album server core

Configured directories become albums. Images are referenced by opaque ids
derived from their paths, so nothing about your filesystem layout leaks
into URLs. Bounded-size JPEG renditions are cached on disk and reused.

Album structure:

  /photos/portraits/
  ├── dawn.jpg            # single-image entry
  ├── dawn.txt            # optional sidecar description
  └── studio-set/         # a directory groups images into one entry
      ├── 01.jpg
      ├── 02.jpg
      └── notes.txt

See config.toml for cache directory, concurrency, rendition presets,
and the album table.")]
#[command(version = version_string())]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List albums and entries as JSON (ids, never paths)
    Scan {
        /// Only entries whose file name contains this, case-insensitively
        #[arg(long, default_value = "")]
        filter: String,
    },
    /// Pre-render every configured preset for every image
    Warm,
    /// Validate the configuration without touching any images
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = GalleryConfig::load(&cli.config)?;

    match cli.command {
        Command::Scan { filter } => {
            let registry = ImageRegistry::new();
            let manifest = scan_albums(&config, &registry, &filter)?;
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        Command::Warm => {
            let registry = ImageRegistry::new();
            let manifest = scan_albums(&config, &registry, "")?;
            let cache = RenditionCache::new(&config.cache_dir, config.concurrency)?;

            let ids: Vec<_> = manifest
                .values()
                .flatten()
                .flat_map(|entry| entry.images.iter().cloned())
                .collect();
            println!("warming {} images into {}", ids.len(), config.cache_dir.display());

            let presets = [config.presets.thumb(), config.presets.full()];
            let results: Vec<_> = ids
                .par_iter()
                .map(|id| {
                    // Ids came out of this registry moments ago
                    let path = registry.resolve(id).unwrap();
                    for (max_w, max_h) in presets {
                        match cache.rendition(&path, max_w, max_h) {
                            Ok(artifact) => println!("  {}", artifact.display()),
                            Err(e) if e.is_fatal() => return Err(e),
                            Err(e) => eprintln!("  skipping {}: {e}", path.display()),
                        }
                    }
                    Ok(())
                })
                .collect();

            // A fatal cache error means the environment is broken; stop loudly
            for result in results {
                result?;
            }
        }
        Command::Check => {
            println!(
                "config ok: {} albums, cache at {}, {} concurrent renders",
                config.albums.len(),
                config.cache_dir.display(),
                config.concurrency
            );
        }
    }

    Ok(())
}

/// Scan every configured album into a name → entries manifest.
fn scan_albums(
    config: &GalleryConfig,
    registry: &ImageRegistry,
    filter: &str,
) -> Result<BTreeMap<String, Vec<Entry>>, Box<dyn std::error::Error>> {
    let mut manifest = BTreeMap::new();
    for (name, album_config) in &config.albums {
        let album = Album::new(
            &album_config.path,
            album_config.reverse_order,
            album_config.path_as_name,
        );
        manifest.insert(name.clone(), album.entries(registry, filter)?);
    }
    Ok(manifest)
}
