//! Canonical, format-agnostic level description.
//!
//! The decoder fills these types once; the compositor only ever reads them.

/// Layer flavour as authored. Everything except `Entities` carries tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrLayerKind {
    /// Hand-placed tiles
    Tiles,
    /// Rule-generated tiles
    AutoLayer,
    /// Integer grid with its auto-generated tiles
    IntGrid,
    /// Entity instances, never rendered by the compositor
    Entities,
}

impl IrLayerKind {
    /// `true` for the kinds the compositor paints
    pub fn has_tiles(self) -> bool {
        !matches!(self, IrLayerKind::Entities)
    }
}

/// Tileset as referenced by a layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrTilesetRef {
    /// Tileset definition uid
    pub uid: i64,
    /// Human readable identifier
    pub identifier: String,
    /// Atlas path relative to the project file, as authored (may contain `../`)
    pub path: String,
}

/// Tileset definition from the project header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrTilesetDef {
    /// Tileset definition uid
    pub uid: i64,
    /// Human readable identifier
    pub identifier: String,
    /// Atlas path as authored; `None` for embedded/internal atlases
    pub path: Option<String>,
    /// Tile size in pixels
    pub grid_size: u32,
}

/// One tile drawn at one place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrTile {
    /// Tile id within its tileset
    pub id: i64,
    /// Destination in level pixels, layer offset included
    pub position: [i32; 2],
    /// Top-left corner of the source rectangle in the atlas
    pub src: [u32; 2],
    /// Mirror about the tile's vertical centre line
    pub flip_x: bool,
    /// Mirror about the tile's horizontal centre line
    pub flip_y: bool,
}

/// Layer instance inside a level
#[derive(Debug, Clone, PartialEq)]
pub struct IrLayer {
    /// Layer identifier
    pub identifier: String,
    /// Layer flavour
    pub kind: IrLayerKind,
    /// Cell (and tile) size in pixels
    pub grid_size: u32,
    /// Width in cells
    pub cell_width: u32,
    /// Height in cells
    pub cell_height: u32,
    /// Pixel offset, already folded into every tile position
    pub offset: [i32; 2],
    /// Authored opacity
    pub opacity: f32,
    /// Authored visibility
    pub visible: bool,
    /// Atlas used by the tiles, if any
    pub tileset: Option<IrTilesetRef>,
    /// Tile placements in authored order
    pub tiles: Vec<IrTile>,
}

/// A single level
#[derive(Debug, Clone, PartialEq)]
pub struct IrLevel {
    /// Level identifier
    pub identifier: String,
    /// Level width in pixels
    pub width: u32,
    /// Level height in pixels
    pub height: u32,
    /// Layers as authored: index 0 is the topmost
    pub layers: Vec<IrLayer>,
}

/// A decoded project: tileset definitions plus all levels
#[derive(Debug, Clone, PartialEq)]
pub struct IrProject {
    /// Format version string written by the editor
    pub json_version: String,
    /// Tileset definitions
    pub tilesets: Vec<IrTilesetDef>,
    /// Levels in project order
    pub levels: Vec<IrLevel>,
}

impl IrProject {
    /// Level by index
    pub fn level(&self, index: usize) -> Option<&IrLevel> {
        self.levels.get(index)
    }
}
