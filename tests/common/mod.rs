// tests/common/mod.rs
#![allow(dead_code)]

use goblit::{
    Error, IrLayer, IrLayerKind, IrLevel, IrProject, IrTile, IrTilesetRef, Surface, TilesetLoader,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const GRID: u32 = 16;
pub const ATLAS_PATH: &str = "../tilesets/atlas.png";

pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const BLUE: [u8; 4] = [0, 0, 255, 255];
pub const GREEN: [u8; 4] = [0, 255, 0, 255];
pub const PLACEHOLDER: [u8; 4] = [255, 128, 128, 255];

/// Source origins of the tiles on the fixture atlas
pub const SRC_RED: [u32; 2] = [0, 0];
pub const SRC_GRADIENT: [u32; 2] = [16, 0];
pub const SRC_BLUE: [u32; 2] = [32, 0];
pub const SRC_GREEN: [u32; 2] = [0, 16];

fn fill_tile(s: &mut Surface, origin: [u32; 2], rgba: [u8; 4]) {
    for y in 0..GRID {
        for x in 0..GRID {
            s.set_pixel(origin[0] + x, origin[1] + y, rgba);
        }
    }
}

/// 48x32 atlas: red, gradient, blue on the first row, green below red.
/// The gradient is asymmetric on both axes so any flip is visible.
pub fn atlas() -> Surface {
    let mut s = Surface::new(48, 32);
    fill_tile(&mut s, SRC_RED, RED);
    fill_tile(&mut s, SRC_BLUE, BLUE);
    fill_tile(&mut s, SRC_GREEN, GREEN);
    for y in 0..GRID {
        for x in 0..GRID {
            s.set_pixel(
                SRC_GRADIENT[0] + x,
                SRC_GRADIENT[1] + y,
                [(x * 15) as u8, (y * 15) as u8, 200, 255],
            );
        }
    }
    s
}

/// Serves atlases from memory and records every load
pub struct MemoryLoader {
    atlases: HashMap<PathBuf, Surface>,
    pub loads: RefCell<Vec<PathBuf>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        let mut atlases = HashMap::new();
        atlases.insert(PathBuf::from("tilesets/atlas.png"), atlas());
        MemoryLoader {
            atlases,
            loads: RefCell::new(Vec::new()),
        }
    }

    pub fn load_count(&self) -> usize {
        self.loads.borrow().len()
    }
}

impl TilesetLoader for MemoryLoader {
    fn load_tileset(&self, path: &Path) -> goblit::Result<Surface> {
        self.loads.borrow_mut().push(path.to_path_buf());
        self.atlases.get(path).cloned().ok_or_else(|| Error::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such atlas"),
        })
    }
}

pub fn tile(position: [i32; 2], src: [u32; 2]) -> IrTile {
    IrTile {
        id: 0,
        position,
        src,
        flip_x: false,
        flip_y: false,
    }
}

pub fn flipped(position: [i32; 2], src: [u32; 2], flip_x: bool, flip_y: bool) -> IrTile {
    IrTile {
        flip_x,
        flip_y,
        ..tile(position, src)
    }
}

pub fn layer(name: &str, tiles: Vec<IrTile>) -> IrLayer {
    layer_with_path(name, ATLAS_PATH, tiles)
}

pub fn layer_with_path(name: &str, path: &str, tiles: Vec<IrTile>) -> IrLayer {
    IrLayer {
        identifier: name.to_owned(),
        kind: IrLayerKind::Tiles,
        grid_size: GRID,
        cell_width: 4,
        cell_height: 2,
        offset: [0, 0],
        opacity: 1.0,
        visible: true,
        tileset: Some(IrTilesetRef {
            uid: 1,
            identifier: "Atlas".to_owned(),
            path: path.to_owned(),
        }),
        tiles,
    }
}

pub fn level(width: u32, height: u32, layers: Vec<IrLayer>) -> IrLevel {
    IrLevel {
        identifier: "Level_0".to_owned(),
        width,
        height,
        layers,
    }
}

pub fn project(levels: Vec<IrLevel>) -> IrProject {
    IrProject {
        json_version: "1.5.3".to_owned(),
        tilesets: Vec::new(),
        levels,
    }
}
