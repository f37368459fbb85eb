use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use image::ImageReader;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::AppPaths;

const SPRITES_DIR: &str = "sprites";
const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, Deserialize)]
struct SpriteManifest {
    sprites: Vec<SpriteManifestEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct SpriteManifestEntry {
    key: String,
    image: String,
    #[serde(default)]
    redraw_background: bool,
    fallback_rgba: [u8; 4],
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read sprite manifest at {path}: {source}")]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse sprite manifest at {path}: {source}")]
    ParseManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate sprite key in manifest: {key}")]
    DuplicateKey { key: String },
}

#[derive(Debug, Clone)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct SpriteDef {
    /// None when the image file was absent or undecodable; the renderer
    /// falls back to a flat-color tile.
    pub image: Option<SpriteImage>,
    pub redraw_background: bool,
    pub fallback_rgba: [u8; 4],
}

/// Sprite lookup table, built once at startup from the JSON manifest under
/// `assets/sprites/`.
#[derive(Debug, Clone, Default)]
pub struct SpriteCatalog {
    by_key: HashMap<String, SpriteDef>,
}

impl SpriteCatalog {
    pub fn load(paths: &AppPaths) -> Result<Self, ContentError> {
        let sprites_dir = paths.assets_dir.join(SPRITES_DIR);
        let manifest_path = sprites_dir.join(MANIFEST_FILE);
        let raw = fs::read_to_string(&manifest_path).map_err(|source| {
            ContentError::ReadManifest {
                path: manifest_path.clone(),
                source,
            }
        })?;
        let manifest: SpriteManifest =
            serde_json::from_str(&raw).map_err(|source| ContentError::ParseManifest {
                path: manifest_path.clone(),
                source,
            })?;

        let mut catalog = SpriteCatalog::default();
        for entry in manifest.sprites {
            if catalog.by_key.contains_key(&entry.key) {
                return Err(ContentError::DuplicateKey { key: entry.key });
            }
            let image_path = sprites_dir.join(&entry.image);
            let image = load_sprite_rgba(&image_path);
            if image.is_none() {
                warn!(
                    sprite_key = %entry.key,
                    path = %image_path.display(),
                    "sprite_image_missing_using_fallback"
                );
            }
            catalog.by_key.insert(
                entry.key,
                SpriteDef {
                    image,
                    redraw_background: entry.redraw_background,
                    fallback_rgba: entry.fallback_rgba,
                },
            );
        }
        info!(sprite_count = catalog.by_key.len(), "sprite_catalog_loaded");
        Ok(catalog)
    }

    pub fn sprite(&self, key: &str) -> Option<&SpriteDef> {
        self.by_key.get(key)
    }

    pub fn redraw_background(&self, key: &str) -> bool {
        self.by_key
            .get(key)
            .map(|def| def.redraw_background)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Registers a sprite with no backing image; it renders as a flat
    /// fallback-color tile. Intended for tests and headless setups.
    pub fn insert_untextured(&mut self, key: &str, redraw_background: bool, fallback: [u8; 4]) {
        self.by_key.insert(
            key.to_string(),
            SpriteDef {
                image: None,
                redraw_background,
                fallback_rgba: fallback,
            },
        );
    }
}

fn load_sprite_rgba(path: &Path) -> Option<SpriteImage> {
    let reader = ImageReader::open(path).ok()?;
    let decoded = reader.decode().ok()?;
    let image = decoded.to_rgba8();
    Some(SpriteImage {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}
