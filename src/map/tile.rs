use serde::{Deserialize, Serialize};

/// Tile elevation in meters relative to sea level.
pub type Elevation = i16;

pub const ELEVATION_MIN: Elevation = -10000;
pub const ELEVATION_MAX: Elevation = 10000;
/// Everything above this is land.
pub const ELEVATION_LEVEL_COAST: Elevation = 0;
pub const ELEVATION_LEVEL_OCEAN: Elevation = -1000;
pub const ELEVATION_LEVEL_TRENCH: Elevation = -2000;

/// Tile feature bitflags.
pub mod features {
    pub const FUNGUS: u8 = 1 << 0;
    pub const RIVER: u8 = 1 << 1;
}

/// Compass direction to one of a tile's eight neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileDirection {
    W,
    NW,
    N,
    NE,
    E,
    SE,
    S,
    SW,
}

impl TileDirection {
    pub const ALL: [TileDirection; 8] = [
        TileDirection::W,
        TileDirection::NW,
        TileDirection::N,
        TileDirection::NE,
        TileDirection::E,
        TileDirection::SE,
        TileDirection::S,
        TileDirection::SW,
    ];

    /// (dx, dy) offset of this direction; north is negative y.
    pub fn offset(self) -> (isize, isize) {
        match self {
            TileDirection::W => (-1, 0),
            TileDirection::NW => (-1, -1),
            TileDirection::N => (0, -1),
            TileDirection::NE => (1, -1),
            TileDirection::E => (1, 0),
            TileDirection::SE => (1, 1),
            TileDirection::S => (0, 1),
            TileDirection::SW => (-1, 1),
        }
    }
}

/// Moisture band of a land tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Moisture {
    Arid,
    Moist,
    Rainy,
}

/// Rockiness band of a land tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rockiness {
    Flat,
    Rolling,
    Rocky,
}

/// One map tile. Plain copyable data; tiles live in the map's arena and are
/// addressed by coordinates, never by reference from other tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub elevation: Elevation,
    pub moisture: Moisture,
    pub rockiness: Rockiness,
    pub features: u8,
}

impl Tile {
    pub fn is_land(&self) -> bool {
        self.elevation > ELEVATION_LEVEL_COAST
    }

    pub fn has_feature(&self, feature: u8) -> bool {
        self.features & feature != 0
    }

    pub fn add_feature(&mut self, feature: u8) {
        self.features |= feature;
    }

    pub fn remove_feature(&mut self, feature: u8) {
        self.features &= !feature;
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            elevation: ELEVATION_LEVEL_OCEAN,
            moisture: Moisture::Arid,
            rockiness: Rockiness::Flat,
            features: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tile_is_ocean() {
        let tile = Tile::default();
        assert!(!tile.is_land());
        assert_eq!(tile.features, 0);
    }

    #[test]
    fn feature_flags_toggle_independently() {
        let mut tile = Tile::default();
        tile.add_feature(features::FUNGUS);
        tile.add_feature(features::RIVER);
        assert!(tile.has_feature(features::FUNGUS));

        tile.remove_feature(features::FUNGUS);
        assert!(!tile.has_feature(features::FUNGUS));
        assert!(tile.has_feature(features::RIVER));
    }

    #[test]
    fn opposite_directions_cancel() {
        for direction in TileDirection::ALL {
            let (dx, dy) = direction.offset();
            assert!(dx != 0 || dy != 0);
        }
        let (wx, wy) = TileDirection::W.offset();
        let (ex, ey) = TileDirection::E.offset();
        assert_eq!((wx + ex, wy + ey), (0, 0));
    }
}
