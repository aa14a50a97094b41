//! Game-logic module
//!
//! The game thread owns everything expensive and stateful about the session:
//! the map tile arena, the map editor and the session RNG. The render/UI
//! thread talks to it exclusively through [`GameModule`] — enqueue an
//! operation, keep the returned id, poll it once per frame tick until the
//! response arrives.

pub mod error;
pub mod ops;
pub mod settings;
pub mod worker;

pub use error::GameResult;
pub use ops::{GameOp, GameRequest, GameResponse, MapEdits, MapInfo, SavedMap, TileSelection};
pub use settings::{
    GameMode, GlobalSettings, LocalSettings, MapSettings, MapSize, MapType, Settings,
};
pub use worker::GameWorker;

use std::path::PathBuf;

use crate::dispatch::{Dispatcher, RequestId};
use crate::map::{Brush, DrawMode, TileDirection, Tool};

/// Caller-facing façade of the game-logic module.
///
/// Every method returning a [`RequestId`] is non-blocking; pair it with
/// [`poll`](Self::poll) from the per-frame update.
pub struct GameModule {
    dispatcher: Dispatcher<GameWorker>,
}

impl GameModule {
    /// Starts the game worker thread with a fresh session seed.
    pub fn start() -> Self {
        Self::with_worker(GameWorker::new())
    }

    /// Starts the game worker thread reproducing the session for `seed`.
    pub fn start_with_seed(seed: u64) -> Self {
        Self::with_worker(GameWorker::with_seed(seed))
    }

    fn with_worker(worker: GameWorker) -> Self {
        Self {
            dispatcher: Dispatcher::start("game", worker),
        }
    }

    /// Answers as soon as the worker is idle.
    pub fn ping(&self) -> RequestId {
        self.dispatcher.enqueue(GameRequest::Ping)
    }

    /// Generates a map in the game thread.
    pub fn init(&self, settings: MapSettings) -> RequestId {
        self.dispatcher.enqueue(GameRequest::Init {
            settings,
            load_from: None,
        })
    }

    /// Loads a map file in the game thread.
    pub fn init_from_file(&self, settings: MapSettings, path: impl Into<PathBuf>) -> RequestId {
        self.dispatcher.enqueue(GameRequest::Init {
            settings,
            load_from: Some(path.into()),
        })
    }

    /// Drops the current map and editor state.
    pub fn reset(&self) -> RequestId {
        self.dispatcher.enqueue(GameRequest::Reset)
    }

    /// Returns a snapshot of a tile and its neighborhood.
    pub fn select_tile(&self, x: usize, y: usize, direction: Option<TileDirection>) -> RequestId {
        self.dispatcher
            .enqueue(GameRequest::SelectTile { x, y, direction })
    }

    /// Saves the current map into a file.
    pub fn save_map(&self, path: impl Into<PathBuf>) -> RequestId {
        self.dispatcher
            .enqueue(GameRequest::SaveMap { path: path.into() })
    }

    /// Performs an edit operation on map tile(s).
    pub fn edit_map(
        &self,
        x: usize,
        y: usize,
        tool: Tool,
        brush: Brush,
        mode: DrawMode,
    ) -> RequestId {
        self.dispatcher.enqueue(GameRequest::EditMap {
            x,
            y,
            tool,
            brush,
            mode,
        })
    }

    /// Single-consumption poll; `None` until the operation finishes.
    pub fn poll(&self, id: RequestId) -> Option<GameResponse> {
        self.dispatcher.poll(id)
    }

    /// Requests cooperative cancellation of an outstanding operation.
    pub fn cancel(&self, id: RequestId) {
        self.dispatcher.cancel(id)
    }

    /// Blocks until the worker thread has exited. Pending requests are
    /// discarded and never produce responses.
    pub fn stop(&mut self) {
        self.dispatcher.stop()
    }
}
