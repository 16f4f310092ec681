//! Game flow integration tests.
//!
//! Full sessions driven through `Game`: events from the host and scenes,
//! timers advanced with `tick`, listeners observing from the outside.

mod common;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use common::*;
use parity_games::core::{GameStateName, Player};
use parity_games::data::GameData;
use parity_games::flow::{FlowEvent, FlowEventKind};
use parity_games::Gameflow;
use parity_games::games::bowling::{BowlingEvent, BowlingEventKind, BowlingOutcome, ThrowPayload};
use parity_games::games::rps::{Move, RpsEvent, RpsEventKind, RpsOutcome, RpsRoundPayload};

fn states(history: impl IntoIterator<Item = GameStateName>) -> Vec<GameStateName> {
    history.into_iter().collect()
}

/// Entering `Init` shows the start screen; nothing else happens until start.
#[test]
fn test_init_shows_start_screen() {
    let mut game: BowlingGame = parity_games::Game::new();
    game.init(|_| parity_games::games::bowling::BowlingGameflow::new(Default::default()));

    assert_eq!(game.current_state(), Some(GameStateName::Init));
    assert_eq!(bowling_scene(&game).calls, vec!["show_start_screen"]);
}

/// A one-frame bowling game from start to the end screen.
#[test]
fn test_bowling_session() {
    let mut game = bowling_game(1);
    assert_eq!(game.current_state(), Some(GameStateName::Round));

    bowl(&mut game, 4);
    bowl(&mut game, 3);
    assert_eq!(game.current_state(), Some(GameStateName::Round));

    // player two: strike, strike, bonus strike
    bowl(&mut game, 10);
    bowl(&mut game, 10);
    assert_eq!(game.current_state(), Some(GameStateName::Round));

    bowl(&mut game, 10);
    assert_eq!(game.current_state(), Some(GameStateName::End));
    assert_eq!(game.pending_timers(), 0);

    let scene = bowling_scene(&game);
    assert_eq!(scene.outcome, Some(BowlingOutcome::Player2Wins));
    assert!(scene.calls.contains(&"show_end_game Player 2 wins!".to_string()));
    assert_eq!(
        scene.results.iter().map(|r| r.pins_knocked_down).collect::<Vec<_>>(),
        vec![4, 3, 10, 10, 10]
    );

    let last_board = scene.scoreboards.last().unwrap();
    assert_eq!(last_board.player1_total_score, 7);
    assert_eq!(last_board.player2_total_score, 30);
}

/// Rounds announce the acting player and whether the rack is fresh.
#[test]
fn test_bowling_show_round_commands() {
    let mut game = bowling_game(2);
    bowl(&mut game, 6);
    bowl(&mut game, 4);

    let rounds: Vec<_> = bowling_scene(&game)
        .calls
        .iter()
        .filter(|call| call.starts_with("show_round "))
        .cloned()
        .collect();
    assert_eq!(
        rounds,
        vec![
            "show_round 1 Player 1 true",
            "show_round 1 Player 1 false",
            "show_round 1 Player 2 true",
        ]
    );
}

/// Restarting while the delayed game end is pending never lets it fire.
#[test]
fn test_restart_cancels_pending_game_end() {
    let mut game = bowling_game(1);
    for pins in [1, 1, 2] {
        bowl(&mut game, pins);
    }
    game.emit(BowlingEvent::PinsSettled {
        pins_knocked_down: 2,
        total_knocked_down: 2,
    });
    assert_eq!(game.pending_timers(), 1);

    game.emit(BowlingEvent::Flow(FlowEvent::GameRestarted));
    assert_eq!(game.current_state(), Some(GameStateName::Start));
    assert_eq!(game.pending_timers(), 0);

    game.tick(Duration::from_secs(10));
    assert_eq!(game.current_state(), Some(GameStateName::Start));

    let flow = game.flow().unwrap();
    assert_eq!(flow.scene().outcome, None);
    assert_eq!(flow.data().total_score(Player::One), 0);
    let history = states(flow.data().states().history().iter().map(|r| r.name));
    assert!(!history.contains(&GameStateName::End));
    assert_eq!(
        &history[history.len() - 3..],
        &[GameStateName::RoundResult, GameStateName::Restart, GameStateName::Start]
    );
}

/// A result arriving after the game ended changes nothing and the end
/// screen comes back after the pause.
#[test]
fn test_out_of_turn_result_ignored() {
    let mut game = bowling_game(1);
    for pins in [2, 2, 3, 3] {
        bowl(&mut game, pins);
    }
    assert_eq!(game.current_state(), Some(GameStateName::End));
    let before = game.flow().unwrap().data().scoreboard();

    game.emit(BowlingEvent::Flow(FlowEvent::RoundCompleted(ThrowPayload::pins(5))));

    assert_eq!(game.current_state(), Some(GameStateName::RoundResult));
    assert_eq!(game.pending_timers(), 1);
    assert_eq!(game.flow().unwrap().data().scoreboard(), before);

    game.tick(PAUSE);
    assert_eq!(game.current_state(), Some(GameStateName::End));
    assert_eq!(bowling_scene(&game).outcome, Some(BowlingOutcome::Player2Wins));
}

/// A repeated final result while `GAME_END` is pending still ends the game.
#[test]
fn test_repeated_final_result_still_ends_game() {
    let mut game = bowling_game(1);
    for pins in [2, 2, 3] {
        bowl(&mut game, pins);
    }
    game.emit(BowlingEvent::PinsSettled {
        pins_knocked_down: 3,
        total_knocked_down: 3,
    });
    assert_eq!(game.pending_timers(), 1);

    game.emit(BowlingEvent::Flow(FlowEvent::RoundCompleted(ThrowPayload::pins(3))));
    assert_eq!(game.pending_timers(), 1);
    assert_eq!(game.flow().unwrap().data().total_score(Player::Two), 6);

    game.tick(Duration::from_secs(60));
    assert_eq!(game.current_state(), Some(GameStateName::End));
    assert_eq!(bowling_scene(&game).outcome, Some(BowlingOutcome::Player2Wins));
}

/// Re-initializing drops the previous session's listeners.
#[test]
fn test_reinit_drops_listeners() {
    let mut game = bowling_game(3);
    let hits = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&hits);
    game.on(BowlingEventKind::Flow(FlowEventKind::GameStarted), move |_| {
        *counter.borrow_mut() += 1;
    });

    game.init(|_| parity_games::games::bowling::BowlingGameflow::new(Default::default()));
    game.start_game();

    assert_eq!(*hits.borrow(), 0);
    assert_eq!(game.current_state(), Some(GameStateName::Start));
    assert_eq!(game.pending_timers(), 0);
}

/// A second `PinsSettled` in the same round is absorbed.
#[test]
fn test_pins_settled_debounce() {
    let mut game = bowling_game(3);
    let completed = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&completed);
    game.on(BowlingEventKind::Flow(FlowEventKind::RoundCompleted), move |_| {
        *counter.borrow_mut() += 1;
    });

    for _ in 0..3 {
        game.emit(BowlingEvent::PinsSettled {
            pins_knocked_down: 4,
            total_knocked_down: 4,
        });
    }

    assert_eq!(*completed.borrow(), 1);
    let flow = game.flow().unwrap();
    assert!(flow.round_completed_emitted());
    assert_eq!(flow.data().frames(Player::One)[0].throw1, Some(4));
    assert_eq!(flow.data().frames(Player::One)[0].throw2, None);
}

/// Launch requests and ball stops only count once per round.
#[test]
fn test_ball_launch_debounce() {
    let mut game = bowling_game(3);

    game.emit(BowlingEvent::BallStopped);
    assert_eq!(bowling_scene(&game).ball_stops, 0, "ball not launched yet");

    game.emit(BowlingEvent::UserInputBallLaunch { angle: 0.2 });
    game.emit(BowlingEvent::BallLaunched);
    game.emit(BowlingEvent::UserInputBallLaunch { angle: 0.4 });
    assert_eq!(bowling_scene(&game).launches, 1);

    game.emit(BowlingEvent::BallStopped);
    assert_eq!(bowling_scene(&game).ball_stops, 1);

    game.emit(BowlingEvent::PinsSettled {
        pins_knocked_down: 9,
        total_knocked_down: 9,
    });
    game.emit(BowlingEvent::BallStopped);
    assert_eq!(bowling_scene(&game).ball_stops, 1, "round already completed");

    game.tick(PAUSE);
    assert!(!game.flow().unwrap().ball_was_launched());
    assert!(!game.flow().unwrap().round_completed_emitted());
}

/// A round result with no pin count only refreshes the display.
#[test]
fn test_round_result_without_pins() {
    let mut game = bowling_game(3);
    game.emit(BowlingEvent::Flow(FlowEvent::RoundCompleted(ThrowPayload::default())));

    assert_eq!(game.current_state(), Some(GameStateName::RoundResult));
    assert_eq!(game.pending_timers(), 0);
    assert!(!game.flow().unwrap().data().frames(Player::One)[0].is_started());
}

/// The next round waits for the full display pause.
#[test]
fn test_round_pause() {
    let mut game = bowling_game(3);
    game.emit(BowlingEvent::PinsSettled {
        pins_knocked_down: 3,
        total_knocked_down: 3,
    });

    game.tick(Duration::from_millis(1999));
    assert_eq!(game.current_state(), Some(GameStateName::RoundResult));
    game.tick(Duration::from_millis(1));
    assert_eq!(game.current_state(), Some(GameStateName::Round));
}

/// Invalid settings leave the game untouched.
#[test]
fn test_invalid_settings_ignored() {
    let mut game = bowling_game(4);

    assert!(!game.set_game_settings(&serde_json::json!({ "numberOfFrames": 0 })));
    assert!(!game.set_game_settings(&serde_json::json!({ "numberOfFrames": 2.5 })));
    assert!(!game.set_game_settings(&serde_json::json!("ten")));
    assert!(!game.set_game_settings(&serde_json::json!({ "numberOfFrames": 4_000_000_000u32 })));

    let data = game.flow().unwrap().data();
    assert_eq!(data.settings().number_of_frames, 4);
    assert_eq!(data.number_of_frames(), 4);
}

/// Listeners: `on` fires every time, `once` only once, `off` stops delivery.
#[test]
fn test_listeners() {
    let mut game = bowling_game(5);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let log = Rc::clone(&seen);
    let every = game.on(BowlingEventKind::Flow(FlowEventKind::RoundStarted), move |_| {
        log.borrow_mut().push("on");
    });
    let log = Rc::clone(&seen);
    game.once(BowlingEventKind::Flow(FlowEventKind::RoundStarted), move |_| {
        log.borrow_mut().push("once");
    });

    bowl(&mut game, 1);
    bowl(&mut game, 1);
    assert!(game.off(every));
    bowl(&mut game, 1);

    assert_eq!(*seen.borrow(), vec!["on", "once", "on"]);
}

/// Listeners may emit back into the queue; their events run afterwards.
#[test]
fn test_listener_emits_are_queued() {
    let mut game = bowling_game(5);
    let emitter = game.emitter();
    game.once(BowlingEventKind::BallLaunched, move |_| {
        emitter.emit(BowlingEvent::PinsSettled {
            pins_knocked_down: 7,
            total_knocked_down: 7,
        });
    });

    game.emit(BowlingEvent::BallLaunched);

    assert_eq!(game.current_state(), Some(GameStateName::RoundResult));
    assert_eq!(game.pending_timers(), 1);
}

/// Destroy cancels timers, unsubscribes and releases the scene; twice is fine.
#[test]
fn test_destroy() {
    let mut game = bowling_game(3);
    game.emit(BowlingEvent::PinsSettled {
        pins_knocked_down: 5,
        total_knocked_down: 5,
    });
    assert_eq!(game.pending_timers(), 1);

    game.destroy();
    game.destroy();

    assert_eq!(game.pending_timers(), 0);
    assert!(!game.is_initialized());
    assert_eq!(game.current_state(), None);

    game.emit(BowlingEvent::Flow(FlowEvent::RoundStarted));
    game.tick(PAUSE);
    assert_eq!(game.current_state(), None);
}

/// RPS plays out with the scene reporting animation completion.
#[test]
fn test_rps_session() {
    let mut game = rps_game(11, 3);
    game.start_game();
    assert_eq!(game.current_state(), Some(GameStateName::Round));

    let mut rounds = 0;
    while game.current_state() != Some(GameStateName::End) {
        game.emit(RpsEvent::Flow(FlowEvent::RoundCompleted(RpsRoundPayload::new(Move::Paper))));
        rounds += 1;
        assert!(rounds < 200, "match never ended");
    }

    let scene = rps_scene(&game);
    let last = scene.results.last().unwrap();
    let outcome = scene.outcome.unwrap();
    assert_eq!(last.result, Some(outcome));
    match outcome {
        RpsOutcome::PlayerWins => assert_eq!(last.player_score, 2),
        RpsOutcome::OpponentWins => assert_eq!(last.opponent_score, 2),
    }
    assert_eq!(scene.results.len(), rounds);
    assert!(scene.results.iter().all(|r| r.player_move == Move::Paper));
}

/// Queued events run in emission order.
#[test]
fn test_rps_events_run_in_order() {
    let mut game = rps_game(5, 101);
    game.start_game();
    game.emit(RpsEvent::Flow(FlowEvent::RoundCompleted(RpsRoundPayload::new(Move::Rock))));

    let history = states(
        game.flow()
            .unwrap()
            .data()
            .states()
            .history()
            .iter()
            .map(|r| r.name),
    );
    assert_eq!(
        history,
        vec![
            GameStateName::Init,
            GameStateName::Start,
            GameStateName::Round,
            GameStateName::RoundResult,
            GameStateName::Round,
        ]
    );

    let calls = &rps_scene(&game).calls;
    assert_eq!(calls[0], "show_start_screen");
    assert_eq!(calls[1], "init_hud 0-0");
    assert_eq!(calls[2], "show_start_game");
    assert_eq!(calls[3], "show_round 1");
    assert_eq!(calls[5], "show_round 2");
}

/// A missing move in the round payload counts as rock.
#[test]
fn test_rps_missing_move_defaults_to_rock() {
    let mut game = rps_game(5, 101);
    game.start_game();
    game.emit(RpsEvent::Flow(FlowEvent::RoundCompleted(RpsRoundPayload::default())));

    assert_eq!(rps_scene(&game).results[0].player_move, Move::Rock);
}

/// Restart resets scores and starts a fresh match.
#[test]
fn test_rps_restart() {
    let mut game = rps_game(8, 1);
    game.start_game();
    while game.current_state() != Some(GameStateName::End) {
        game.emit(RpsEvent::Flow(FlowEvent::RoundCompleted(RpsRoundPayload::new(Move::Scissors))));
    }

    let started = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&started);
    game.once(RpsEventKind::Flow(FlowEventKind::GameStarted), move |_| {
        *flag.borrow_mut() = true;
    });

    game.emit(RpsEvent::Flow(FlowEvent::GameRestarted));

    assert!(*started.borrow(), "restart emits GAME_STARTED");
    assert_eq!(game.current_state(), Some(GameStateName::Round));
    let flow = game.flow().unwrap();
    assert_eq!(flow.data().round_data(), 1);
    assert_eq!(flow.data().player_score() + flow.data().opponent_score(), 0);
    assert!(flow.scene().calls.contains(&"restart_game".to_string()));
}
