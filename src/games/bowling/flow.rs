//! Bowling events, scene contract and flow.
//!
//! ## Debouncing
//!
//! Physics reports the same moment more than once (a ball can "stop"
//! repeatedly, pins settle in waves). The flow keeps two flags, reset every
//! round:
//!
//! - `ball_was_launched`: set by `BallLaunched`; further launch requests are
//!   ignored and `BallStopped` is only forwarded once it is set
//! - `round_completed_emitted`: set by the first `PinsSettled`; later ones
//!   are dropped so each round completes exactly once

use serde::{Deserialize, Serialize};

use super::data::{BowlingGameData, BowlingOutcome, BowlingSummary, ScoreboardData, ThrowResult};
use crate::core::{FlowTiming, Player};
use crate::data::GameData;
use crate::flow::{FlowContext, FlowEvent, FlowEventKind, GameEvent, Gameflow};

/// Payload of a completed bowling round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrowPayload {
    /// Raw count from the physics layer; validated when recorded.
    pub pins_knocked_down: Option<i32>,
}

impl ThrowPayload {
    #[must_use]
    pub fn pins(pins: i32) -> Self {
        Self {
            pins_knocked_down: Some(pins),
        }
    }
}

/// Bowling event vocabulary.
#[derive(Clone, Debug, PartialEq)]
pub enum BowlingEvent {
    Flow(FlowEvent<ThrowPayload, BowlingOutcome>),

    /// The player released the ball at `angle`.
    UserInputBallLaunch { angle: f64 },

    /// The scene put the ball in motion.
    BallLaunched,

    /// The ball came to rest.
    BallStopped,

    /// Pins stopped moving after a throw.
    PinsSettled {
        pins_knocked_down: i32,
        total_knocked_down: i32,
    },
}

/// Tag of a [`BowlingEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BowlingEventKind {
    Flow(FlowEventKind),
    UserInputBallLaunch,
    BallLaunched,
    BallStopped,
    PinsSettled,
}

impl BowlingEventKind {
    /// Wire name used by the hosting UI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            BowlingEventKind::Flow(kind) => kind.name(),
            BowlingEventKind::UserInputBallLaunch => "USER_INPUT_BALL_LAUNCH",
            BowlingEventKind::BallLaunched => "BALL_LAUNCHED",
            BowlingEventKind::BallStopped => "BALL_STOPPED",
            BowlingEventKind::PinsSettled => "PINS_SETTLED",
        }
    }
}

impl From<FlowEventKind> for BowlingEventKind {
    fn from(kind: FlowEventKind) -> Self {
        BowlingEventKind::Flow(kind)
    }
}

impl GameEvent for BowlingEvent {
    type Kind = BowlingEventKind;
    type RoundPayload = ThrowPayload;
    type Outcome = BowlingOutcome;

    fn kind(&self) -> BowlingEventKind {
        match self {
            BowlingEvent::Flow(event) => BowlingEventKind::Flow(event.kind()),
            BowlingEvent::UserInputBallLaunch { .. } => BowlingEventKind::UserInputBallLaunch,
            BowlingEvent::BallLaunched => BowlingEventKind::BallLaunched,
            BowlingEvent::BallStopped => BowlingEventKind::BallStopped,
            BowlingEvent::PinsSettled { .. } => BowlingEventKind::PinsSettled,
        }
    }

    fn from_flow(event: FlowEvent<ThrowPayload, BowlingOutcome>) -> Self {
        BowlingEvent::Flow(event)
    }

    fn into_flow(self) -> Result<FlowEvent<ThrowPayload, BowlingOutcome>, Self> {
        match self {
            BowlingEvent::Flow(event) => Ok(event),
            other => Err(other),
        }
    }
}

/// Display commands the bowling flow issues.
pub trait BowlingScene {
    fn show_start_screen(&mut self);

    fn init_hud(&mut self, summary: &BowlingSummary);

    fn show_start_game(&mut self);

    /// Set up frame `round` for `player`, re-racking all pins when asked.
    fn show_round(&mut self, round: u32, player: Player, reset_all_pins: bool);

    fn show_round_result(&mut self, result: &ThrowResult);

    fn update_scoreboard(&mut self, scoreboard: &ScoreboardData);

    fn show_end_game(&mut self, result: &BowlingOutcome, timescale: Option<f64>);

    fn restart_game(&mut self);

    /// Start the physics simulation of a throw.
    fn launch_ball(&mut self, angle: f64);

    /// Begin waiting for the pins to settle.
    fn on_ball_stopped(&mut self);

    /// Pause the physics loop.
    fn stop_game_loop(&mut self);

    fn destroy(&mut self) {}
}

/// Bowling flow over a scene `S`.
pub struct BowlingGameflow<S> {
    data: BowlingGameData,
    scene: S,
    timing: FlowTiming,
    round_completed_emitted: bool,
    ball_was_launched: bool,
}

impl<S: BowlingScene> BowlingGameflow<S> {
    #[must_use]
    pub fn new(scene: S) -> Self {
        Self {
            data: BowlingGameData::new(),
            scene,
            timing: FlowTiming::default(),
            round_completed_emitted: false,
            ball_was_launched: false,
        }
    }

    /// Override the display pauses.
    #[must_use]
    pub fn with_timing(mut self, timing: FlowTiming) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    #[must_use]
    pub fn timing(&self) -> &FlowTiming {
        &self.timing
    }

    #[must_use]
    pub fn ball_was_launched(&self) -> bool {
        self.ball_was_launched
    }

    #[must_use]
    pub fn round_completed_emitted(&self) -> bool {
        self.round_completed_emitted
    }

    fn update_scoreboard(&mut self) {
        let scoreboard = self.data.scoreboard();
        self.scene.update_scoreboard(&scoreboard);
    }

    /// Next round, or the end screen once both final frames are complete.
    fn schedule_follow_up(&mut self, ctx: &mut FlowContext<'_, BowlingEvent>) {
        match self.data.check_end_game() {
            Some(outcome) => {
                tracing::info!(%outcome, "bowling game over");
                self.scene.stop_game_loop();
                ctx.schedule_flow(self.timing.end_pause, FlowEvent::game_end(outcome));
            }
            None => {
                ctx.schedule_flow(self.timing.round_pause, FlowEvent::RoundStarted);
            }
        }
    }

    fn show_throw(&mut self) {
        let result = self.data.throw_result();
        self.scene.show_round_result(&result);
        self.update_scoreboard();
    }
}

impl<S: BowlingScene> Gameflow for BowlingGameflow<S> {
    type Data = BowlingGameData;
    type Event = BowlingEvent;

    fn data(&self) -> &BowlingGameData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut BowlingGameData {
        &mut self.data
    }

    fn show_start_screen(&mut self) {
        self.scene.show_start_screen();
    }

    fn start_game(&mut self, _ctx: &mut FlowContext<'_, BowlingEvent>) {
        let summary = self.data.game_data();
        self.scene.init_hud(&summary);
        self.scene.show_start_game();
        self.update_scoreboard();
    }

    fn start_round(&mut self, round: u32, _ctx: &mut FlowContext<'_, BowlingEvent>) {
        let player = self.data.current_player();
        let reset_all_pins = self.data.should_reset_all_pins();
        self.scene.show_round(round, player, reset_all_pins);
        self.update_scoreboard();

        self.round_completed_emitted = false;
        self.ball_was_launched = false;
    }

    fn show_round_result(&mut self, payload: ThrowPayload, ctx: &mut FlowContext<'_, BowlingEvent>) {
        let Some(pins) = payload.pins_knocked_down else {
            self.show_throw();
            return;
        };

        if self.data.can_process_throw_result() {
            self.data.set_throw_result(pins);
            self.show_throw();
        } else {
            tracing::warn!(pins, cursor = %self.data.cursor(), "ignoring throw for a filled slot");
        }

        // the transition into RoundResult dropped any pending follow-up
        self.schedule_follow_up(ctx);
    }

    fn show_end_game(
        &mut self,
        result: BowlingOutcome,
        timescale: Option<f64>,
        _ctx: &mut FlowContext<'_, BowlingEvent>,
    ) {
        self.scene.stop_game_loop();
        self.scene.show_end_game(&result, timescale);
        self.update_scoreboard();
    }

    fn restart_game(&mut self, _ctx: &mut FlowContext<'_, BowlingEvent>) {
        self.scene.stop_game_loop();
        self.data.reset_data();
        self.scene.restart_game();
        self.update_scoreboard();
    }

    fn custom_events(&self) -> Vec<BowlingEventKind> {
        vec![
            BowlingEventKind::UserInputBallLaunch,
            BowlingEventKind::BallLaunched,
            BowlingEventKind::BallStopped,
            BowlingEventKind::PinsSettled,
        ]
    }

    fn handle_custom(&mut self, event: BowlingEvent, ctx: &mut FlowContext<'_, BowlingEvent>) {
        match event {
            BowlingEvent::UserInputBallLaunch { angle } => {
                if !self.ball_was_launched {
                    self.scene.launch_ball(angle);
                }
            }
            BowlingEvent::BallLaunched => self.ball_was_launched = true,
            BowlingEvent::BallStopped => {
                if self.ball_was_launched && !self.round_completed_emitted {
                    self.scene.on_ball_stopped();
                }
            }
            BowlingEvent::PinsSettled {
                pins_knocked_down, ..
            } => {
                if self.round_completed_emitted {
                    tracing::trace!("duplicate pins-settled ignored");
                    return;
                }
                self.round_completed_emitted = true;
                self.ball_was_launched = false;
                ctx.emit_flow(FlowEvent::RoundCompleted(ThrowPayload::pins(pins_knocked_down)));
            }
            BowlingEvent::Flow(_) => {}
        }
    }

    fn destroy(&mut self) {
        self.scene.destroy();
    }
}
