#![warn(missing_docs)]

//! Tile-based 2D game runtime for Macroquad: LDtk levels flattened into one
//! composite, a rotating/zooming camera and an animated player.

mod animation;
mod camera;
mod config;
mod error;
mod game;
mod geom;
mod input;
mod ir_level;
mod loader {
    pub mod ldtk_loader;
}
mod player;
mod render {
    pub mod compositor;
    pub mod crop;
}
mod surface;
mod tileset;

pub use animation::{Animation, Grid};
pub use camera::Camera;
pub use config::{CameraConfig, GameConfig, WindowConfig};
pub use error::{Error, Result};
pub use game::{Flow, Game, TICKS_PER_SECOND};
pub use geom::GeoM;
pub use input::{key_for, Action, InputSource, KeyboardInput, ScriptedInput};
pub use ir_level::{IrLayer, IrLayerKind, IrLevel, IrProject, IrTile, IrTilesetDef, IrTilesetRef};
pub use loader::ldtk_loader::{decode_project_file, decode_project_str};
pub use player::{
    check_speed, default_animations, Facing, Player, PlayerSheets, PlayerState, FRAME_DURATION, FRAME_H,
    FRAME_W, MOVE_SPEED,
};
pub use render::compositor::{
    composite_level, tile_transform, Renderer, DIMMED_LAYER, DIMMED_LAYER_ALPHA, PLACEHOLDER,
};
pub use render::crop::{crop_rect, Crop};
pub use surface::{DrawOptions, PixelRect, Surface, SurfaceView};
pub use tileset::{resolve_tileset_path, CacheScope, DiskLoader, TilesetCache, TilesetLoader};
