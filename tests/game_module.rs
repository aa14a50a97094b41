//! A full editing session through the public game module façade:
//! generate, inspect, edit, save, reload, reset.

use std::thread;
use std::time::{Duration, Instant};

use tessera_engine::game::{GameModule, GameResponse, MapSettings, MapSize};
use tessera_engine::map::{Brush, DrawMode, Tool};
use tessera_engine::{RequestId, TaskResult};

const POLL_TIMEOUT: Duration = Duration::from_secs(30);

fn poll_until(game: &GameModule, id: RequestId) -> GameResponse {
    let deadline = Instant::now() + POLL_TIMEOUT;
    loop {
        if let Some(response) = game.poll(id) {
            return response;
        }
        assert!(Instant::now() < deadline, "no response for {} in time", id);
        thread::sleep(Duration::from_millis(1));
    }
}

fn tiny_settings() -> MapSettings {
    MapSettings {
        size: MapSize::Tiny,
        ..MapSettings::default()
    }
}

#[test]
fn generate_edit_save_reload_session() {
    let dir = tempfile::tempdir().unwrap();
    let save_path = dir.path().join("session.map");

    let mut game = GameModule::start_with_seed(0x7e55e7a);

    // Generate.
    let info = match poll_until(&game, game.init(tiny_settings())) {
        GameResponse::Init(TaskResult::Success(info)) => info,
        other => panic!("init failed: {:?}", other),
    };
    assert_eq!((info.width, info.height), (24, 48));
    assert_eq!(info.seed, 0x7e55e7a);

    // Inspect a tile.
    let selection = match poll_until(&game, game.select_tile(12, 24, None)) {
        GameResponse::SelectTile(TaskResult::Success(selection)) => selection,
        other => panic!("select failed: {:?}", other),
    };
    assert_eq!((selection.x, selection.y), (12, 24));

    // Raise terrain and confirm the edit is visible in a later selection.
    let edits = match poll_until(
        &game,
        game.edit_map(12, 24, Tool::Elevation, Brush::Dot, DrawMode::Inc),
    ) {
        GameResponse::EditMap(TaskResult::Success(edits)) => edits,
        other => panic!("edit failed: {:?}", other),
    };
    assert!(!edits.tiles.is_empty());

    let after_edit = match poll_until(&game, game.select_tile(12, 24, None)) {
        GameResponse::SelectTile(TaskResult::Success(selection)) => selection,
        other => panic!("re-select failed: {:?}", other),
    };
    assert!(after_edit.tile.elevation > selection.tile.elevation);

    // Save, then load the file back into a fresh session.
    match poll_until(&game, game.save_map(&save_path)) {
        GameResponse::SaveMap(TaskResult::Success(saved)) => {
            assert_eq!(saved.path, save_path);
        }
        other => panic!("save failed: {:?}", other),
    }
    game.stop();

    let mut reloaded = GameModule::start();
    let info = match poll_until(&reloaded, reloaded.init_from_file(tiny_settings(), &save_path)) {
        GameResponse::Init(TaskResult::Success(info)) => info,
        other => panic!("reload failed: {:?}", other),
    };
    assert_eq!((info.width, info.height), (24, 48));
    assert_eq!(info.seed, 0x7e55e7a);
    assert_eq!(info.source_path.as_deref(), Some(save_path.as_path()));

    // The edited tile survived the round trip.
    let restored = match poll_until(&reloaded, reloaded.select_tile(12, 24, None)) {
        GameResponse::SelectTile(TaskResult::Success(selection)) => selection,
        other => panic!("post-reload select failed: {:?}", other),
    };
    assert_eq!(restored.tile, after_edit.tile);

    reloaded.stop();
}

#[test]
fn loading_a_missing_file_reports_an_error() {
    let mut game = GameModule::start();
    let id = game.init_from_file(tiny_settings(), "/nonexistent/lost.map");
    match poll_until(&game, id) {
        GameResponse::Init(TaskResult::Error(message)) => {
            assert!(!message.is_empty());
        }
        other => panic!("expected an error response, got {:?}", other),
    }
    game.stop();
}

#[test]
fn saving_without_a_map_reports_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut game = GameModule::start();
    let id = game.save_map(dir.path().join("empty.map"));
    match poll_until(&game, id) {
        GameResponse::SaveMap(TaskResult::Error(message)) => {
            assert!(message.contains("no map"));
        }
        other => panic!("expected an error response, got {:?}", other),
    }
    game.stop();
}

#[test]
fn reset_discards_the_session_map() {
    let mut game = GameModule::start();
    assert!(poll_until(&game, game.init(tiny_settings())).is_success());
    assert!(poll_until(&game, game.reset()).is_success());

    // Selections need a map again.
    match poll_until(&game, game.select_tile(0, 0, None)) {
        GameResponse::SelectTile(TaskResult::Error(_)) => {}
        other => panic!("expected an error response, got {:?}", other),
    }
    game.stop();
}

#[test]
fn same_seed_generates_the_same_map() {
    let mut first = GameModule::start_with_seed(1234);
    let mut second = GameModule::start_with_seed(1234);

    let a = poll_until(&first, first.init(tiny_settings()));
    let b = poll_until(&second, second.init(tiny_settings()));
    assert_eq!(a, b);

    let tile_a = poll_until(&first, first.select_tile(10, 10, None));
    let tile_b = poll_until(&second, second.select_tile(10, 10, None));
    assert_eq!(tile_a, tile_b);

    first.stop();
    second.stop();
}
