use serde::{Deserialize, Serialize};

use super::tile::{features, Moisture, Rockiness, Tile, ELEVATION_MAX, ELEVATION_MIN};
use super::Map;

/// Elevation change of one editor stroke.
const ELEVATION_STEP: i16 = 500;

/// What property of a tile the editor is drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    Elevation,
    Moisture,
    Rockiness,
    /// Adds or removes fungus.
    Features,
}

/// Shape of the stroke around the target tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Brush {
    /// The target tile only.
    Dot,
    /// The target tile and its four orthogonal neighbors.
    Cross,
    /// A 3x3 square centered on the target tile.
    Square3,
    /// A 5x5 square centered on the target tile.
    Square5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawMode {
    Inc,
    Dec,
}

/// Map editor tool dispatch. Owns no map state; the worker hands it the map
/// one stroke at a time.
#[derive(Debug, Default)]
pub struct MapEditor;

impl MapEditor {
    pub fn new() -> Self {
        Self
    }

    /// Applies one stroke and returns the coordinates of every tile that
    /// changed, plus each changed tile's eight neighbors: surrounding tiles
    /// have to be reloaded too so their textures blend correctly.
    pub fn draw(
        &self,
        map: &mut Map,
        x: usize,
        y: usize,
        tool: Tool,
        brush: Brush,
        mode: DrawMode,
    ) -> Vec<(usize, usize)> {
        let mut changed = Vec::new();
        for (tx, ty) in brush_targets(map, x, y, brush) {
            if apply_tool(map.tile_mut(tx, ty), tool, mode) && !changed.contains(&(tx, ty)) {
                changed.push((tx, ty));
            }
        }

        let mut affected = changed.clone();
        for &(cx, cy) in &changed {
            for coords in map.neighborhood(cx, cy) {
                if !affected.contains(&coords) {
                    affected.push(coords);
                }
            }
        }
        affected
    }
}

/// Tiles covered by `brush` centered on `(x, y)`, wrap/clamp rules of the
/// map applied. May contain duplicates at the poles; `draw` dedups.
fn brush_targets(map: &Map, x: usize, y: usize, brush: Brush) -> Vec<(usize, usize)> {
    let radius: isize = match brush {
        Brush::Dot => 0,
        Brush::Cross => 1,
        Brush::Square3 => 1,
        Brush::Square5 => 2,
    };

    let mut targets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if matches!(brush, Brush::Cross) && dx != 0 && dy != 0 {
                continue;
            }
            let tx = (x as isize + dx).rem_euclid(map.width() as isize) as usize;
            let ty = (y as isize + dy).clamp(0, map.height() as isize - 1) as usize;
            targets.push((tx, ty));
        }
    }
    targets
}

/// Applies `tool` to one tile. Returns false when the tile was already at the
/// end of the tool's range and nothing changed.
fn apply_tool(tile: &mut Tile, tool: Tool, mode: DrawMode) -> bool {
    match tool {
        Tool::Elevation => {
            let target = match mode {
                DrawMode::Inc => tile.elevation.saturating_add(ELEVATION_STEP),
                DrawMode::Dec => tile.elevation.saturating_sub(ELEVATION_STEP),
            }
            .clamp(ELEVATION_MIN, ELEVATION_MAX);
            if target == tile.elevation {
                return false;
            }
            tile.elevation = target;
            true
        }
        Tool::Moisture => step_moisture(tile, mode),
        Tool::Rockiness => step_rockiness(tile, mode),
        Tool::Features => match mode {
            DrawMode::Inc => {
                if tile.has_feature(features::FUNGUS) {
                    return false;
                }
                tile.add_feature(features::FUNGUS);
                true
            }
            DrawMode::Dec => {
                if !tile.has_feature(features::FUNGUS) {
                    return false;
                }
                tile.remove_feature(features::FUNGUS);
                true
            }
        },
    }
}

fn step_moisture(tile: &mut Tile, mode: DrawMode) -> bool {
    tile.moisture = match (tile.moisture, mode) {
        (Moisture::Arid, DrawMode::Inc) => Moisture::Moist,
        (Moisture::Moist, DrawMode::Inc) => Moisture::Rainy,
        (Moisture::Rainy, DrawMode::Dec) => Moisture::Moist,
        (Moisture::Moist, DrawMode::Dec) => Moisture::Arid,
        // Already at the end of the range.
        _ => return false,
    };
    true
}

fn step_rockiness(tile: &mut Tile, mode: DrawMode) -> bool {
    tile.rockiness = match (tile.rockiness, mode) {
        (Rockiness::Flat, DrawMode::Inc) => Rockiness::Rolling,
        (Rockiness::Rolling, DrawMode::Inc) => Rockiness::Rocky,
        (Rockiness::Rocky, DrawMode::Dec) => Rockiness::Rolling,
        (Rockiness::Rolling, DrawMode::Dec) => Rockiness::Flat,
        _ => return false,
    };
    true
}
