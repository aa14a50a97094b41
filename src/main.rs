//! Headless demo run
//!
//! Drives a short session through the public module façades the way the
//! render loop would: enqueue, then poll once per tick until the response
//! arrives. Useful as a smoke run without a window.

use std::thread;
use std::time::Duration;

use anyhow::{bail, Result};

use tessera_engine::game::{GameModule, GameResponse, MapSettings, MapSize};
use tessera_engine::map::{Brush, DrawMode, Tool};
use tessera_engine::RequestId;

/// One simulated frame.
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    env_logger::init();

    let mut game = GameModule::start();

    let settings = MapSettings {
        size: MapSize::Tiny,
        ..MapSettings::default()
    };
    let info = match wait(&game, game.init(settings))? {
        GameResponse::Init(result) => result
            .success()
            .ok_or_else(|| anyhow::anyhow!("map init did not succeed"))?,
        other => bail!("unexpected response {:?}", other.op()),
    };
    log::info!(
        "map ready: {}x{} (seed {})",
        info.width,
        info.height,
        info.seed
    );

    let center = (info.width / 2, info.height / 2);
    match wait(&game, game.select_tile(center.0, center.1, None))? {
        GameResponse::SelectTile(result) => {
            let selection = result
                .success()
                .ok_or_else(|| anyhow::anyhow!("tile selection did not succeed"))?;
            log::info!(
                "selected tile ({}, {}): elevation {}",
                selection.x,
                selection.y,
                selection.tile.elevation
            );
        }
        other => bail!("unexpected response {:?}", other.op()),
    }

    // Raise a small hill, then save the result.
    let edit = game.edit_map(center.0, center.1, Tool::Elevation, Brush::Square3, DrawMode::Inc);
    match wait(&game, edit)? {
        GameResponse::EditMap(result) => {
            let edits = result
                .success()
                .ok_or_else(|| anyhow::anyhow!("map edit did not succeed"))?;
            log::info!("edited {} tiles", edits.tiles.len());
        }
        other => bail!("unexpected response {:?}", other.op()),
    }

    let save_path = std::env::temp_dir().join("tessera-demo.map");
    match wait(&game, game.save_map(&save_path))? {
        GameResponse::SaveMap(result) => {
            let saved = result
                .success()
                .ok_or_else(|| anyhow::anyhow!("map save did not succeed"))?;
            log::info!("map saved to {}", saved.path.display());
        }
        other => bail!("unexpected response {:?}", other.op()),
    }

    game.stop();
    Ok(())
}

/// Polls once per tick until the response for `id` arrives.
fn wait(game: &GameModule, id: RequestId) -> Result<GameResponse> {
    loop {
        if let Some(response) = game.poll(id) {
            return Ok(response);
        }
        thread::sleep(TICK);
    }
}
