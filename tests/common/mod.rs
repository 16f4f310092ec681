//! Shared fixtures: recording scenes and session helpers.

#![allow(dead_code)]

use std::time::Duration;

use parity_games::core::Player;
use parity_games::flow::{Emitter, FlowEvent};
use parity_games::games::bowling::{
    BowlingEvent, BowlingGameflow, BowlingOutcome, BowlingScene, BowlingSummary, ScoreboardData,
    ThrowResult,
};
use parity_games::games::rps::{
    RoundResultData, RpsEvent, RpsGameData, RpsGameflow, RpsOutcome, RpsScene, RpsSummary,
};
use parity_games::Game;

/// Default display pause of both flows.
pub const PAUSE: Duration = Duration::from_secs(2);

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// === Bowling ===

/// Bowling scene that records every command it receives.
#[derive(Default)]
pub struct RecordingBowlingScene {
    pub calls: Vec<String>,
    pub results: Vec<ThrowResult>,
    pub scoreboards: Vec<ScoreboardData>,
    pub outcome: Option<BowlingOutcome>,
    pub launches: u32,
    pub ball_stops: u32,
    pub destroyed: bool,
}

impl BowlingScene for RecordingBowlingScene {
    fn show_start_screen(&mut self) {
        self.calls.push("show_start_screen".into());
    }

    fn init_hud(&mut self, summary: &BowlingSummary) {
        self.calls.push(format!("init_hud {}", summary.number_of_frames));
    }

    fn show_start_game(&mut self) {
        self.calls.push("show_start_game".into());
    }

    fn show_round(&mut self, round: u32, player: Player, reset_all_pins: bool) {
        self.calls.push(format!("show_round {round} {player} {reset_all_pins}"));
    }

    fn show_round_result(&mut self, result: &ThrowResult) {
        self.calls.push(format!("show_round_result {}", result.pins_knocked_down));
        self.results.push(result.clone());
    }

    fn update_scoreboard(&mut self, scoreboard: &ScoreboardData) {
        self.scoreboards.push(scoreboard.clone());
    }

    fn show_end_game(&mut self, result: &BowlingOutcome, _timescale: Option<f64>) {
        self.calls.push(format!("show_end_game {result}"));
        self.outcome = Some(*result);
    }

    fn restart_game(&mut self) {
        self.calls.push("restart_game".into());
    }

    fn launch_ball(&mut self, _angle: f64) {
        self.launches += 1;
    }

    fn on_ball_stopped(&mut self) {
        self.ball_stops += 1;
    }

    fn stop_game_loop(&mut self) {
        self.calls.push("stop_game_loop".into());
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}

pub type BowlingGame = Game<BowlingGameflow<RecordingBowlingScene>>;

/// Bowling session with `frames` frames, sitting in the first round.
pub fn bowling_game(frames: u32) -> BowlingGame {
    init_tracing();
    let mut game = Game::new();
    game.init(|_| BowlingGameflow::new(RecordingBowlingScene::default()));
    assert!(game.set_game_settings(&serde_json::json!({ "numberOfFrames": frames })));
    game.start_game();
    game.emit(BowlingEvent::Flow(FlowEvent::RoundStarted));
    game
}

/// One throw the way the physics layer reports it, then the result pause.
pub fn bowl(game: &mut BowlingGame, pins: i32) {
    game.emit(BowlingEvent::UserInputBallLaunch { angle: 0.0 });
    game.emit(BowlingEvent::BallLaunched);
    game.emit(BowlingEvent::BallStopped);
    game.emit(BowlingEvent::PinsSettled {
        pins_knocked_down: pins,
        total_knocked_down: pins,
    });
    game.tick(PAUSE);
}

pub fn bowling_scene(game: &BowlingGame) -> &RecordingBowlingScene {
    game.flow().expect("game initialized").scene()
}

// === Rock-paper-scissors ===

/// RPS scene that records commands and, like the animated scene, reports
/// back through the queue when its animations finish.
pub struct RecordingRpsScene {
    pub calls: Vec<String>,
    pub results: Vec<RoundResultData>,
    pub outcome: Option<RpsOutcome>,
    pub destroyed: bool,
    emitter: Emitter<RpsEvent>,
}

impl RecordingRpsScene {
    pub fn new(emitter: Emitter<RpsEvent>) -> Self {
        Self {
            calls: Vec::new(),
            results: Vec::new(),
            outcome: None,
            destroyed: false,
            emitter,
        }
    }
}

impl RpsScene for RecordingRpsScene {
    fn show_start_screen(&mut self) {
        self.calls.push("show_start_screen".into());
    }

    fn init_hud(&mut self, summary: &RpsSummary) {
        self.calls.push(format!(
            "init_hud {}-{}",
            summary.player_score, summary.opponent_score
        ));
    }

    fn show_start_game(&mut self) {
        self.calls.push("show_start_game".into());
        self.emitter.emit_flow(FlowEvent::RoundStarted);
    }

    fn show_round(&mut self, round: u32) {
        self.calls.push(format!("show_round {round}"));
    }

    fn show_round_result(&mut self, result: &RoundResultData) {
        self.calls.push(format!("show_round_result {:?}", result.round_winner));
        self.results.push(result.clone());
        self.emitter.emit(RpsEvent::AnimationCompleted(result.clone()));
    }

    fn show_end_game(&mut self, result: &RpsOutcome) {
        self.calls.push(format!("show_end_game {result}"));
        self.outcome = Some(*result);
    }

    fn restart_game(&mut self) {
        self.calls.push("restart_game".into());
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}

pub type RpsGame = Game<RpsGameflow<RecordingRpsScene>>;

/// Seeded RPS session that has not started yet.
pub fn rps_game(seed: u64, best_of: u32) -> RpsGame {
    init_tracing();
    let mut game = Game::new();
    game.init(|emitter| {
        RpsGameflow::with_data(RpsGameData::with_seed(seed), RecordingRpsScene::new(emitter))
    });
    assert!(game.set_game_settings(&serde_json::json!({ "bestOf": best_of })));
    game
}

pub fn rps_scene(game: &RpsGame) -> &RecordingRpsScene {
    game.flow().expect("game initialized").scene()
}
