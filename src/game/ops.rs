use std::path::PathBuf;

use crate::dispatch::TaskResult;
use crate::map::{Brush, DrawMode, Tile, TileDirection, Tool};

use super::settings::MapSettings;

/// Operation tags of the game module's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOp {
    Ping,
    Init,
    Reset,
    SelectTile,
    SaveMap,
    EditMap,
}

/// A request handed to the game worker.
#[derive(Debug)]
pub enum GameRequest {
    /// Answers as soon as the worker is idle; used to detect that the game
    /// thread is not busy with previous requests.
    Ping,
    /// Generates a map from `settings`, or loads one when `load_from` is set.
    Init {
        settings: MapSettings,
        load_from: Option<PathBuf>,
    },
    /// Drops the current map and editor state.
    Reset,
    /// Resolves a tile (optionally moving one step in `direction` first) and
    /// returns a snapshot of it and its neighborhood.
    SelectTile {
        x: usize,
        y: usize,
        direction: Option<TileDirection>,
    },
    /// Serializes the current map into a map file.
    SaveMap { path: PathBuf },
    /// Applies one editor stroke to the map.
    EditMap {
        x: usize,
        y: usize,
        tool: Tool,
        brush: Brush,
        mode: DrawMode,
    },
}

impl GameRequest {
    pub fn op(&self) -> GameOp {
        match self {
            GameRequest::Ping => GameOp::Ping,
            GameRequest::Init { .. } => GameOp::Init,
            GameRequest::Reset => GameOp::Reset,
            GameRequest::SelectTile { .. } => GameOp::SelectTile,
            GameRequest::SaveMap { .. } => GameOp::SaveMap,
            GameRequest::EditMap { .. } => GameOp::EditMap,
        }
    }
}

/// Success payload of `INIT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapInfo {
    pub width: usize,
    pub height: usize,
    /// Session seed the map came from; logged so a session can be reproduced.
    pub seed: u64,
    /// Set when the map was loaded from a file rather than generated.
    pub source_path: Option<PathBuf>,
}

/// Success payload of `SELECT_TILE`: a copy of the resolved tile and its
/// neighborhood, in `TileDirection::ALL` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSelection {
    pub x: usize,
    pub y: usize,
    pub tile: Tile,
    pub neighborhood: [Tile; 8],
}

/// Success payload of `SAVE_MAP`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedMap {
    pub path: PathBuf,
}

/// Success payload of `EDIT_MAP`: every tile the stroke touched, with its
/// post-edit state, including the neighbors that have to re-blend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEdits {
    pub tiles: Vec<(usize, usize, Tile)>,
}

/// A finished response, tagged by operation. An aborted or failed operation
/// still identifies which operation it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResponse {
    Ping(TaskResult<()>),
    Init(TaskResult<MapInfo>),
    Reset(TaskResult<()>),
    SelectTile(TaskResult<TileSelection>),
    SaveMap(TaskResult<SavedMap>),
    EditMap(TaskResult<MapEdits>),
}

impl GameResponse {
    pub fn op(&self) -> GameOp {
        match self {
            GameResponse::Ping(_) => GameOp::Ping,
            GameResponse::Init(_) => GameOp::Init,
            GameResponse::Reset(_) => GameOp::Reset,
            GameResponse::SelectTile(_) => GameOp::SelectTile,
            GameResponse::SaveMap(_) => GameOp::SaveMap,
            GameResponse::EditMap(_) => GameOp::EditMap,
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            GameResponse::Ping(r) | GameResponse::Reset(r) => r.is_success(),
            GameResponse::Init(r) => r.is_success(),
            GameResponse::SelectTile(r) => r.is_success(),
            GameResponse::SaveMap(r) => r.is_success(),
            GameResponse::EditMap(r) => r.is_success(),
        }
    }
}
