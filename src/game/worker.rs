use std::path::PathBuf;

use crate::dispatch::{CancelToken, ModuleWorker, TaskResult};
use crate::error::EngineError;
use crate::map::{io, Brush, DrawMode, Map, MapEditor, MapGenerator, TileDirection, Tool};
use crate::util::SessionRandom;

use super::error::{tile_out_of_bounds, GameResult};
use super::ops::{GameRequest, GameResponse, MapEdits, MapInfo, SavedMap, TileSelection};
use super::settings::MapSettings;

/// The game thread's side of the module: owns the map, the editor and the
/// session RNG. Moved into the worker thread at start; the caller only ever
/// sees copies carried by responses.
pub struct GameWorker {
    map: Option<Map>,
    editor: MapEditor,
    random: SessionRandom,
}

impl GameWorker {
    pub fn new() -> Self {
        Self::with_random(SessionRandom::new())
    }

    /// Reproduces an earlier session from its logged seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_random(SessionRandom::from_seed(seed))
    }

    fn with_random(random: SessionRandom) -> Self {
        Self {
            map: None,
            editor: MapEditor::new(),
            random,
        }
    }

    fn init(
        &mut self,
        settings: MapSettings,
        load_from: Option<PathBuf>,
        cancel: &CancelToken,
    ) -> TaskResult<MapInfo> {
        let map = match &load_from {
            Some(path) => match io::load_map(path) {
                Ok(map) => map,
                Err(e) => return TaskResult::Error(e.to_string()),
            },
            None => {
                log::info!("game seed: {}", self.random.seed());
                let generator = MapGenerator::new(self.random.seed());
                match generator.generate(&settings, &mut self.random, cancel) {
                    Some(map) => map,
                    // No partial map is left behind on abort.
                    None => return TaskResult::Aborted,
                }
            }
        };

        let info = MapInfo {
            width: map.width(),
            height: map.height(),
            seed: map.seed(),
            source_path: load_from,
        };
        self.map = Some(map);
        TaskResult::Success(info)
    }

    fn reset(&mut self) {
        self.map = None;
        self.editor = MapEditor::new();
    }

    fn select_tile(
        &self,
        x: usize,
        y: usize,
        direction: Option<TileDirection>,
    ) -> GameResult<TileSelection> {
        let map = self.map.as_ref().ok_or(EngineError::NoMap)?;
        if !map.contains(x, y) {
            return Err(tile_out_of_bounds(x, y));
        }
        let (x, y) = match direction {
            Some(direction) => map.neighbor_coords(x, y, direction),
            None => (x, y),
        };
        Ok(TileSelection {
            x,
            y,
            tile: *map.tile(x, y),
            neighborhood: map.neighborhood_tiles(x, y),
        })
    }

    fn save_map(&self, path: PathBuf) -> GameResult<SavedMap> {
        let map = self.map.as_ref().ok_or(EngineError::NoMap)?;
        io::save_map(map, &path)?;
        Ok(SavedMap { path })
    }

    fn edit_map(
        &mut self,
        x: usize,
        y: usize,
        tool: Tool,
        brush: Brush,
        mode: DrawMode,
    ) -> GameResult<MapEdits> {
        let map = self.map.as_mut().ok_or(EngineError::NoMap)?;
        if !map.contains(x, y) {
            return Err(tile_out_of_bounds(x, y));
        }
        let affected = self.editor.draw(map, x, y, tool, brush, mode);
        let tiles = affected
            .into_iter()
            .map(|(tx, ty)| (tx, ty, *map.tile(tx, ty)))
            .collect();
        Ok(MapEdits { tiles })
    }
}

impl Default for GameWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleWorker for GameWorker {
    type Request = GameRequest;
    type Response = GameResponse;

    fn process(&mut self, request: GameRequest, cancel: &CancelToken) -> GameResponse {
        match request {
            GameRequest::Ping => GameResponse::Ping(TaskResult::Success(())),
            GameRequest::Init {
                settings,
                load_from,
            } => GameResponse::Init(self.init(settings, load_from, cancel)),
            GameRequest::Reset => {
                self.reset();
                GameResponse::Reset(TaskResult::Success(()))
            }
            GameRequest::SelectTile { x, y, direction } => {
                GameResponse::SelectTile(into_result(self.select_tile(x, y, direction)))
            }
            GameRequest::SaveMap { path } => {
                GameResponse::SaveMap(into_result(self.save_map(path)))
            }
            GameRequest::EditMap {
                x,
                y,
                tool,
                brush,
                mode,
            } => GameResponse::EditMap(into_result(self.edit_map(x, y, tool, brush, mode))),
        }
    }
}

/// Handler faults become error responses; the dispatcher itself never
/// interprets them.
fn into_result<T>(result: GameResult<T>) -> TaskResult<T> {
    match result {
        Ok(value) => TaskResult::Success(value),
        Err(e) => TaskResult::Error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker_with_map() -> GameWorker {
        let mut worker = GameWorker::with_seed(11);
        let settings = MapSettings {
            size: crate::game::settings::MapSize::Tiny,
            ..MapSettings::default()
        };
        let result = worker.init(settings, None, &CancelToken::new());
        assert!(result.is_success());
        worker
    }

    #[test]
    fn operations_without_a_map_report_errors() {
        let worker = GameWorker::with_seed(1);
        assert!(worker.select_tile(0, 0, None).is_err());
        assert!(worker.save_map(PathBuf::from("/tmp/unused.map")).is_err());
    }

    #[test]
    fn select_tile_moves_in_the_requested_direction() {
        let worker = worker_with_map();
        let here = worker.select_tile(5, 5, None).unwrap();
        let west = worker.select_tile(5, 5, Some(TileDirection::W)).unwrap();
        assert_eq!((west.x, west.y), (4, 5));
        assert_eq!(here.neighborhood[0], west.tile);
    }

    #[test]
    fn select_tile_out_of_bounds_is_an_error() {
        let worker = worker_with_map();
        assert!(worker.select_tile(1000, 0, None).is_err());
    }

    #[test]
    fn edit_map_returns_post_edit_tiles() {
        let mut worker = worker_with_map();
        let before = worker.select_tile(4, 4, None).unwrap().tile;
        let edits = worker
            .edit_map(4, 4, Tool::Elevation, Brush::Dot, DrawMode::Inc)
            .unwrap();
        let (_, _, edited) = edits
            .tiles
            .iter()
            .find(|&&(x, y, _)| (x, y) == (4, 4))
            .expect("stroke target reported");
        assert!(edited.elevation > before.elevation);
    }

    #[test]
    fn reset_drops_the_map() {
        let mut worker = worker_with_map();
        worker.reset();
        assert!(worker.select_tile(0, 0, None).is_err());
    }
}
