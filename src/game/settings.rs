//! Session settings
//!
//! Split the way the original engine splits them: [`GlobalSettings`] are
//! synced between players (the host has authority), [`LocalSettings`] stay on
//! this machine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    SinglePlayer,
    MultiPlayer,
    Scenario,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapType {
    /// Generate from the session seed.
    Random,
    /// Generate with custom dimensions.
    Custom,
    /// Load from a map file.
    MapFile,
}

/// Named map size classes and their dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapSize {
    Custom,
    Tiny,
    Small,
    Standard,
    Large,
    Huge,
}

impl MapSize {
    /// `(width, height)` for the named classes; `None` for `Custom`.
    pub fn dimensions(self) -> Option<(usize, usize)> {
        match self {
            MapSize::Custom => None,
            MapSize::Tiny => Some((24, 48)),
            MapSize::Small => Some((32, 64)),
            MapSize::Standard => Some((40, 80)),
            MapSize::Large => Some((44, 90)),
            MapSize::Huge => Some((64, 128)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OceanCoverage {
    Small,
    Average,
    Large,
}

/// Strength of erosive forces; stronger erosion means flatter terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Erosion {
    Strong,
    Average,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifeforms {
    Rare,
    Average,
    Abundant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudCover {
    Sparse,
    Average,
    Dense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Citizen,
    Specialist,
    Talent,
    Librarian,
    Thinker,
    Transcend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameRules {
    Standard,
    Current,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkType {
    None,
    SimpleTcp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NetworkRole {
    #[default]
    None,
    Server,
    Client,
}

/// Parameters of the map to generate or load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSettings {
    pub map_type: MapType,
    pub size: MapSize,
    pub custom_width: usize,
    pub custom_height: usize,
    pub ocean: OceanCoverage,
    pub erosion: Erosion,
    pub lifeforms: Lifeforms,
    pub clouds: CloudCover,
}

impl MapSettings {
    /// Effective `(width, height)`, resolving the size class.
    pub fn dimensions(&self) -> (usize, usize) {
        self.size
            .dimensions()
            .unwrap_or((self.custom_width, self.custom_height))
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            map_type: MapType::Random,
            size: MapSize::Standard,
            custom_width: 20,
            custom_height: 40,
            ocean: OceanCoverage::Average,
            erosion: Erosion::Average,
            lifeforms: Lifeforms::Average,
            clouds: CloudCover::Average,
        }
    }
}

/// Settings that are synced between players; the host has authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub game_mode: GameMode,
    pub map: MapSettings,
    pub difficulty: Difficulty,
    pub game_rules: GameRules,
    pub network_type: NetworkType,
    pub game_name: String,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            game_mode: GameMode::SinglePlayer,
            map: MapSettings::default(),
            difficulty: Difficulty::Citizen,
            game_rules: GameRules::Standard,
            network_type: NetworkType::None,
            game_name: String::new(),
        }
    }
}

/// Settings that are not synced between players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LocalSettings {
    pub network_role: NetworkRole,
    pub player_name: String,
    pub remote_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    pub global: GlobalSettings,
    pub local: LocalSettings,
}
