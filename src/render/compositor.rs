//! Flattens every tile layer of a level into one offscreen surface and
//! re-samples it through the camera each frame.

use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::geom::GeoM;
use crate::ir_level::{IrLayer, IrLevel, IrTile};
use crate::render::crop::crop_rect;
use crate::surface::{DrawOptions, PixelRect, Surface};
use crate::tileset::{CacheScope, TilesetCache, TilesetLoader};
use macroquad::color::Color;

/// Camera surface tone shown wherever the level does not cover the view
pub const PLACEHOLDER: Color = Color::new(1.0, 128.0 / 255.0, 128.0 / 255.0, 1.0);

/// Authored layer index drawn at reduced opacity as a depth cue
pub const DIMMED_LAYER: usize = 1;

/// Alpha applied to [`DIMMED_LAYER`]
pub const DIMMED_LAYER_ALPHA: f32 = 0.4;

/// Placement chain for one tile: mirror about the tile centre, then move to
/// its level position.
pub fn tile_transform(tile: &IrTile, grid_size: u32) -> GeoM {
    let half = grid_size as f32 / 2.0;
    let mut g = GeoM::new().translate(-half, -half);
    if tile.flip_x {
        g = g.scale(-1.0, 1.0);
    }
    if tile.flip_y {
        g = g.scale(1.0, -1.0);
    }
    g.translate(half, half)
        .translate(tile.position[0] as f32, tile.position[1] as f32)
}

fn layer_alpha(index: usize) -> f32 {
    if index == DIMMED_LAYER {
        DIMMED_LAYER_ALPHA
    } else {
        1.0
    }
}

fn composite_layer(target: &mut Surface, atlas: &Surface, layer: &IrLayer, alpha: f32) {
    let g = layer.grid_size;
    for tile in &layer.tiles {
        let src = atlas.view(PixelRect::new(tile.src[0], tile.src[1], g, g));
        let opts = DrawOptions {
            geom: tile_transform(tile, g),
            alpha,
        };
        target.draw(&src, &opts);
    }
}

/// Paint every tile-bearing layer of `level` onto `target`.
///
/// Layers are authored top-first, so they are painted in reverse: the last
/// authored layer goes down first and layer 0 ends up on top.
pub fn composite_level(cache: &TilesetCache, target: &mut Surface, level: &IrLevel) -> Result<()> {
    for (index, layer) in level.layers.iter().enumerate().rev() {
        if !layer.kind.has_tiles() || layer.tiles.is_empty() {
            continue;
        }
        let Some(ts) = &layer.tileset else {
            log::debug!("layer {} has tiles but no tileset, skipped", layer.identifier);
            continue;
        };
        let atlas = cache.get(&ts.path).ok_or_else(|| Error::MissingTileset {
            layer: layer.identifier.clone(),
            path: ts.path.clone(),
        })?;
        composite_layer(target, atlas, layer, layer_alpha(index));
    }
    Ok(())
}

fn check_level_size(level: &IrLevel) -> Result<()> {
    let max = u16::MAX as u32;
    if level.width == 0 || level.height == 0 || level.width > max || level.height > max {
        return Err(Error::InvalidLevel(format!(
            "level '{}' is {}x{} pixels",
            level.identifier, level.width, level.height
        )));
    }
    Ok(())
}

/// Tile compositor: owns the tileset cache and the per-level composite
pub struct Renderer<L: TilesetLoader> {
    loader: L,
    scope: CacheScope,
    cache: TilesetCache,
    offscreen: Option<Surface>,
}

impl<L: TilesetLoader> Renderer<L> {
    /// Renderer pulling atlases through `loader`
    pub fn new(loader: L, scope: CacheScope) -> Self {
        Renderer {
            loader,
            scope,
            cache: TilesetCache::new(),
            offscreen: None,
        }
    }

    /// Resolve tilesets and rebuild the composite for `level`.
    ///
    /// Any atlas failure is returned as is; the previous composite is kept
    /// in that case.
    pub fn load_level(&mut self, level: &IrLevel) -> Result<()> {
        log::info!(
            "loading level {} ({}x{}, {} layers)",
            level.identifier,
            level.width,
            level.height,
            level.layers.len()
        );
        check_level_size(level)?;

        if self.scope == CacheScope::Level {
            self.cache.clear();
        }
        for layer in level.layers.iter().rev() {
            log::debug!(
                "layer [{:?}] {} grid={} cells={}x{} offset={:?}",
                layer.kind,
                layer.identifier,
                layer.grid_size,
                layer.cell_width,
                layer.cell_height,
                layer.offset
            );
            if let Some(ts) = &layer.tileset {
                self.cache.ensure_loaded(&ts.path, &self.loader)?;
            }
        }

        self.render_offscreen(level)
    }

    /// Rebuild the composite for `level` from atlases already in the cache.
    ///
    /// Fails with [`Error::MissingTileset`] when a layer's atlas was never
    /// loaded.
    pub fn render_offscreen(&mut self, level: &IrLevel) -> Result<()> {
        check_level_size(level)?;
        let mut offscreen = Surface::new(level.width, level.height);
        composite_level(&self.cache, &mut offscreen, level)?;
        self.offscreen = Some(offscreen);
        Ok(())
    }

    /// Draw the visible part of the composite through `camera` onto `dest`.
    ///
    /// The crop is clamped to the composite; an empty crop (camera past the
    /// level edge) or a missing composite only leaves the placeholder.
    pub fn render_frame(&self, camera: &mut Camera, dest: &mut Surface, level: &IrLevel) {
        let anchor = camera.position();
        let surface = camera.surface_mut();
        surface.clear();
        surface.fill(PLACEHOLDER);

        if let Some(offscreen) = &self.offscreen {
            let crop = crop_rect(
                anchor,
                (level.width, level.height),
                (offscreen.width(), offscreen.height()),
            );
            if crop.src.is_empty() {
                log::trace!("camera at {:?} is outside level {}", anchor, level.identifier);
            } else {
                let opts = DrawOptions {
                    geom: GeoM::new().translate(crop.dest.x, crop.dest.y),
                    alpha: 1.0,
                };
                surface.draw(&offscreen.view(crop.src), &opts);
            }
        }

        camera.blit(dest);
    }

    /// Composite built by the last successful [`Renderer::load_level`]
    pub fn composite(&self) -> Option<&Surface> {
        self.offscreen.as_ref()
    }

    /// Loader atlases are pulled through
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Tileset cache
    pub fn cache(&self) -> &TilesetCache {
        &self.cache
    }

    /// Cache lifetime this renderer was built with
    pub fn scope(&self) -> CacheScope {
        self.scope
    }
}
