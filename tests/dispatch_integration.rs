//! End-to-end dispatcher behavior through the public game module façade:
//! id allocation, response ordering, single consumption, cancellation and
//! shutdown semantics as the render loop would observe them.

use std::thread;
use std::time::{Duration, Instant};

use tessera_engine::game::{GameModule, GameOp, GameResponse, MapSettings, MapSize};
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

fn huge_settings() -> MapSettings {
    MapSettings {
        size: MapSize::Huge,
        ..MapSettings::default()
    }
}

#[test]
fn ping_round_trip() {
    let mut game = GameModule::start();
    let id = game.ping();
    assert_eq!(id.get(), 1);

    // Zero or more not-ready polls, then exactly one success.
    let response = poll_until(&game, id);
    assert_eq!(response.op(), GameOp::Ping);
    assert!(matches!(response, GameResponse::Ping(TaskResult::Success(()))));

    // Consumed: the same id never answers again.
    assert_eq!(game.poll(id), None);

    game.stop();
}

#[test]
fn ids_are_unique_and_never_zero() {
    let mut game = GameModule::start();
    let mut seen = Vec::new();
    for _ in 0..50 {
        let id = game.ping();
        assert!(id.get() > 0);
        assert!(!seen.contains(&id));
        seen.push(id);
    }
    game.stop();
}

#[test]
fn cancelled_generation_reports_aborted_for_its_op() {
    let mut game = GameModule::start();
    let id = game.init(huge_settings());
    game.cancel(id);

    let response = poll_until(&game, id);
    assert_eq!(response.op(), GameOp::Init);
    assert!(matches!(response, GameResponse::Init(TaskResult::Aborted)));

    game.stop();
}

#[test]
fn responses_become_ready_in_enqueue_order() {
    let mut game = GameModule::start();
    let ids = [game.ping(), game.init(tiny_settings()), game.ping()];

    // A response for a later request is never visible before the responses
    // of the requests enqueued ahead of it: whenever a poll for id N
    // answers, every id M < N that nobody consumed yet must answer too.
    let last = poll_until(&game, ids[2]);
    assert_eq!(last.op(), GameOp::Ping);
    assert_eq!(game.poll(ids[0]).map(|r| r.op()), Some(GameOp::Ping));
    assert_eq!(game.poll(ids[1]).map(|r| r.op()), Some(GameOp::Init));

    game.stop();
}

#[test]
fn requests_pending_at_stop_are_never_answered() {
    let mut game = GameModule::start();

    // Keep the worker busy long enough for the trailing ping to still be
    // queued when the shutdown signal lands.
    game.init(huge_settings());
    game.init(huge_settings());
    let orphan = game.ping();

    game.stop();

    // Discarded at shutdown: no response now, no response ever.
    for _ in 0..20 {
        assert_eq!(game.poll(orphan), None);
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn responses_unconsumed_at_stop_are_reclaimed() {
    let mut game = GameModule::start();
    let id = game.init(tiny_settings());

    // stop() joins the worker; by the time it returns, the response either
    // never existed (request discarded) or was reclaimed unconsumed. Either
    // way nothing is leaked and nothing answers afterwards.
    game.stop();
    assert_eq!(game.poll(id), None);
}
