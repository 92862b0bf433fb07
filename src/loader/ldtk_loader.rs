// src/loader/ldtk_loader.rs
use crate::error::Error;
use crate::ir_level::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const FLIP_X: u8 = 0b01;
const FLIP_Y: u8 = 0b10;

#[derive(Deserialize)]
struct JsonProject {
    #[serde(rename = "jsonVersion", default)]
    json_version: String,
    #[serde(default)]
    defs: JsonDefs,
    #[serde(default)]
    levels: Vec<JsonLevel>,
}

#[derive(Deserialize, Default)]
struct JsonDefs {
    #[serde(default)]
    tilesets: Vec<JsonTilesetDef>,
}

#[derive(Deserialize)]
struct JsonTilesetDef {
    uid: i64,
    #[serde(default)]
    identifier: String,
    #[serde(rename = "relPath", default)]
    rel_path: Option<String>,
    #[serde(rename = "tileGridSize")]
    tile_grid_size: u32,
}

#[derive(Deserialize)]
struct JsonLevel {
    #[serde(default)]
    identifier: String,
    #[serde(rename = "pxWid")]
    px_wid: i64,
    #[serde(rename = "pxHei")]
    px_hei: i64,
    #[serde(rename = "layerInstances", default)]
    layer_instances: Option<Vec<JsonLayer>>,
}

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(rename = "__identifier", default)]
    identifier: String,
    #[serde(rename = "__type")]
    kind: String,
    #[serde(rename = "__gridSize")]
    grid_size: u32,
    #[serde(rename = "__cWid", default)]
    c_wid: u32,
    #[serde(rename = "__cHei", default)]
    c_hei: u32,
    #[serde(rename = "__pxTotalOffsetX", default)]
    offset_x: i32,
    #[serde(rename = "__pxTotalOffsetY", default)]
    offset_y: i32,
    #[serde(rename = "__opacity", default = "one")]
    opacity: f32,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(rename = "__tilesetDefUid", default)]
    tileset_uid: Option<i64>,
    #[serde(rename = "__tilesetRelPath", default)]
    tileset_rel_path: Option<String>,
    #[serde(rename = "gridTiles", default)]
    grid_tiles: Vec<JsonTile>,
    #[serde(rename = "autoLayerTiles", default)]
    auto_layer_tiles: Vec<JsonTile>,
}

#[derive(Deserialize)]
struct JsonTile {
    px: [i32; 2],
    src: [u32; 2],
    #[serde(default)]
    f: u8,
    #[serde(default)]
    t: i64,
}

fn default_true() -> bool {
    true
}
fn one() -> f32 {
    1.0
}

fn layer_kind(layer: &str, kind: &str) -> Result<IrLayerKind, Error> {
    match kind {
        "Tiles" => Ok(IrLayerKind::Tiles),
        "AutoLayer" => Ok(IrLayerKind::AutoLayer),
        "IntGrid" => Ok(IrLayerKind::IntGrid),
        "Entities" => Ok(IrLayerKind::Entities),
        other => Err(Error::UnsupportedLayerType {
            layer: layer.to_owned(),
            kind: other.to_owned(),
        }),
    }
}

fn tile_to_ir(t: JsonTile, offset: [i32; 2]) -> IrTile {
    IrTile {
        id: t.t,
        position: [t.px[0] + offset[0], t.px[1] + offset[1]],
        src: t.src,
        flip_x: t.f & FLIP_X != 0,
        flip_y: t.f & FLIP_Y != 0,
    }
}

fn layer_to_ir(l: JsonLayer, defs: &[IrTilesetDef]) -> Result<IrLayer, Error> {
    let kind = layer_kind(&l.identifier, &l.kind)?;
    let offset = [l.offset_x, l.offset_y];

    let tileset = match (l.tileset_uid, l.tileset_rel_path) {
        (Some(uid), Some(path)) => Some(IrTilesetRef {
            uid,
            identifier: defs
                .iter()
                .find(|d| d.uid == uid)
                .map(|d| d.identifier.clone())
                .unwrap_or_default(),
            path,
        }),
        _ => None,
    };

    // Tiles layers use gridTiles, rule-based layers autoLayerTiles
    let tiles = l
        .grid_tiles
        .into_iter()
        .chain(l.auto_layer_tiles)
        .map(|t| tile_to_ir(t, offset))
        .collect();

    Ok(IrLayer {
        identifier: l.identifier,
        kind,
        grid_size: l.grid_size,
        cell_width: l.c_wid,
        cell_height: l.c_hei,
        offset,
        opacity: l.opacity,
        visible: l.visible,
        tileset,
        tiles,
    })
}

fn level_to_ir(lvl: JsonLevel, defs: &[IrTilesetDef]) -> Result<IrLevel, Error> {
    let size = |px: i64| u32::try_from(px).ok().filter(|v| *v > 0);
    let (Some(width), Some(height)) = (size(lvl.px_wid), size(lvl.px_hei)) else {
        return Err(Error::InvalidLevel(format!(
            "level '{}' has size {}x{}",
            lvl.identifier, lvl.px_wid, lvl.px_hei
        )));
    };
    let layers = lvl
        .layer_instances
        .unwrap_or_default()
        .into_iter()
        .map(|l| layer_to_ir(l, defs))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(IrLevel {
        identifier: lvl.identifier,
        width,
        height,
        layers,
    })
}

fn project_to_ir(j: JsonProject) -> Result<IrProject, Error> {
    let tilesets: Vec<IrTilesetDef> = j
        .defs
        .tilesets
        .into_iter()
        .map(|t| IrTilesetDef {
            uid: t.uid,
            identifier: t.identifier,
            path: t.rel_path,
            grid_size: t.tile_grid_size,
        })
        .collect();

    let levels = j
        .levels
        .into_iter()
        .map(|lvl| level_to_ir(lvl, &tilesets))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(IrProject {
        json_version: j.json_version,
        tilesets,
        levels,
    })
}

/// Decode an LDtk project held in memory
pub fn decode_project_str(json: &str) -> Result<IrProject, Error> {
    let j: JsonProject = serde_json::from_str(json).map_err(|source| Error::Json {
        path: PathBuf::new(),
        source,
    })?;
    project_to_ir(j)
}

/// Decode an LDtk project file (`.ldtk` or `.json`)
pub fn decode_project_file(path: impl AsRef<Path>) -> Result<IrProject, Error> {
    let p = path.as_ref();
    match p.extension().and_then(|e| e.to_str()) {
        Some("ldtk") | Some("json") => {}
        _ => return Err(Error::UnsupportedFormat(p.display().to_string())),
    }

    let txt = std::fs::read_to_string(p).map_err(|source| Error::Io {
        path: p.to_path_buf(),
        source,
    })?;
    let j: JsonProject = serde_json::from_str(&txt).map_err(|source| Error::Json {
        path: p.to_path_buf(),
        source,
    })?;

    log::info!("decoded project {} (format {})", p.display(), j.json_version);
    project_to_ir(j)
}
