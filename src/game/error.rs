//! Game-module error handling

use crate::error::{EngineError, EngineResult};

/// Type alias for game-module results
pub type GameResult<T> = EngineResult<T>;

/// Error for a tile reference outside the current map.
pub fn tile_out_of_bounds(x: usize, y: usize) -> EngineError {
    EngineError::TileOutOfBounds { x, y }
}
