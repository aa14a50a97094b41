//! Tessera Engine
//!
//! Concurrency core of a tile-based strategy game engine. The render/UI
//! thread must never block, so every expensive, stateful operation — world
//! generation, map load/save, tile editing, connecting to a host — runs on a
//! dedicated worker thread behind the [`dispatch`] module's asynchronous
//! dispatcher: enqueue an operation, keep the returned [`RequestId`], poll it
//! once per frame until the typed response arrives.
//!
//! Two domain modules plug into that core: [`game`] (map state, generation,
//! editing, saving) and [`network`] (connection establishment). Each owns its
//! worker thread and all the state its handlers touch; the caller only ever
//! sees response payloads.

pub mod dispatch;
pub mod error;
pub mod game;
pub mod map;
pub mod network;
pub mod util;

pub use dispatch::{CancelToken, Dispatcher, ModuleWorker, RequestId, TaskResult};
pub use error::{EngineError, EngineResult};
pub use game::{GameModule, GameRequest, GameResponse, MapSettings, Settings};
pub use map::{Map, Tile};
pub use network::{ConnectionMode, NetworkModule, NetworkRequest, NetworkResponse};
