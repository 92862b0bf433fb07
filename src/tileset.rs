use crate::error::Result;
use crate::surface::Surface;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Anything that can turn a (resolved) tileset path into an atlas image
pub trait TilesetLoader {
    /// Load and decode the atlas at `path`
    fn load_tileset(&self, path: &Path) -> Result<Surface>;
}

/// Reads atlases from disk below `base_path`
#[derive(Debug, Clone, Default)]
pub struct DiskLoader {
    /// Directory every tileset path is joined onto
    pub base_path: PathBuf,
}

impl DiskLoader {
    /// Loader rooted at `base_path`
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        DiskLoader {
            base_path: base_path.into(),
        }
    }
}

impl TilesetLoader for DiskLoader {
    fn load_tileset(&self, path: &Path) -> Result<Surface> {
        let full = self.base_path.join(path);
        log::info!("loading tileset {}", full.display());
        Surface::from_file(&full)
    }
}

/// Map an authored tileset path to one the loader understands.
///
/// Level files store atlas paths relative to themselves (`../tilesets/x.png`);
/// every `../` token is dropped so the path resolves below the asset root.
pub fn resolve_tileset_path(authored: &str) -> PathBuf {
    PathBuf::from(authored.replace("../", ""))
}

/// How long cached atlases live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheScope {
    /// Emptied on every level load
    #[default]
    Level,
    /// Kept for the lifetime of the renderer
    Process,
}

/// Atlases keyed by the path the level authored
#[derive(Debug, Default)]
pub struct TilesetCache {
    atlases: HashMap<String, Surface>,
}

impl TilesetCache {
    /// Empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `authored` through `loader` unless it is already cached.
    ///
    /// Returns `true` when a load actually happened.
    pub fn ensure_loaded<L: TilesetLoader + ?Sized>(
        &mut self,
        authored: &str,
        loader: &L,
    ) -> Result<bool> {
        if self.atlases.contains_key(authored) {
            return Ok(false);
        }
        let resolved = resolve_tileset_path(authored);
        log::debug!("tileset {} resolved to {}", authored, resolved.display());
        let atlas = loader.load_tileset(&resolved)?;
        self.atlases.insert(authored.to_owned(), atlas);
        Ok(true)
    }

    /// Cached atlas for an authored path
    pub fn get(&self, authored: &str) -> Option<&Surface> {
        self.atlases.get(authored)
    }

    /// Number of distinct atlases
    pub fn len(&self) -> usize {
        self.atlases.len()
    }

    /// `true` when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.atlases.is_empty()
    }

    /// Drop every atlas
    pub fn clear(&mut self) {
        self.atlases.clear();
    }
}
