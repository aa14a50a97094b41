//! Map file format
//!
//! A map file is the file version followed by the bincode-encoded map. The
//! seed is stored inside the map, so loading a save is enough to reproduce
//! the session it came from.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::Map;

pub const MAP_FILE_VERSION: u32 = 1;

fn format_error(path: &Path, reason: impl Into<String>) -> EngineError {
    EngineError::MapFormat {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

pub fn save_map(map: &Map, path: &Path) -> EngineResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, &MAP_FILE_VERSION)
        .map_err(|e| format_error(path, e.to_string()))?;
    bincode::serialize_into(&mut writer, map).map_err(|e| format_error(path, e.to_string()))?;
    log::info!(
        "saved {}x{} map to {}",
        map.width(),
        map.height(),
        path.display()
    );
    Ok(())
}

pub fn load_map(path: &Path) -> EngineResult<Map> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let version: u32 = bincode::deserialize_from(&mut reader)
        .map_err(|e| format_error(path, e.to_string()))?;
    if version != MAP_FILE_VERSION {
        return Err(format_error(
            path,
            format!("unsupported version {} (expected {})", version, MAP_FILE_VERSION),
        ));
    }

    let map: Map =
        bincode::deserialize_from(&mut reader).map_err(|e| format_error(path, e.to_string()))?;
    if map.width() == 0 || map.height() == 0 || map.tile_count() != map.width() * map.height() {
        return Err(format_error(path, "tile data does not match dimensions"));
    }

    log::info!(
        "loaded {}x{} map from {}",
        map.width(),
        map.height(),
        path.display()
    );
    Ok(map)
}
