//! RPS events, scene contract and flow.

use serde::{Deserialize, Serialize};

use super::data::{Move, RoundResultData, RpsGameData, RpsOutcome, RpsSummary};
use crate::data::GameData;
use crate::flow::{FlowContext, FlowEvent, FlowEventKind, GameEvent, Gameflow};

/// Payload of a completed RPS round: the move the player picked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpsRoundPayload {
    #[serde(rename = "move")]
    pub player_move: Option<Move>,
}

impl RpsRoundPayload {
    #[must_use]
    pub fn new(player_move: Move) -> Self {
        Self {
            player_move: Some(player_move),
        }
    }
}

/// RPS event vocabulary.
#[derive(Clone, Debug, PartialEq)]
pub enum RpsEvent {
    Flow(FlowEvent<RpsRoundPayload, RpsOutcome>),

    /// The scene finished animating a round result.
    AnimationCompleted(RoundResultData),
}

/// Tag of an [`RpsEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RpsEventKind {
    Flow(FlowEventKind),
    AnimationCompleted,
}

impl RpsEventKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            RpsEventKind::Flow(kind) => kind.name(),
            RpsEventKind::AnimationCompleted => "ANIMATION_COMPLETED",
        }
    }
}

impl From<FlowEventKind> for RpsEventKind {
    fn from(kind: FlowEventKind) -> Self {
        RpsEventKind::Flow(kind)
    }
}

impl GameEvent for RpsEvent {
    type Kind = RpsEventKind;
    type RoundPayload = RpsRoundPayload;
    type Outcome = RpsOutcome;

    fn kind(&self) -> RpsEventKind {
        match self {
            RpsEvent::Flow(event) => RpsEventKind::Flow(event.kind()),
            RpsEvent::AnimationCompleted(_) => RpsEventKind::AnimationCompleted,
        }
    }

    fn from_flow(event: FlowEvent<RpsRoundPayload, RpsOutcome>) -> Self {
        RpsEvent::Flow(event)
    }

    fn into_flow(self) -> Result<FlowEvent<RpsRoundPayload, RpsOutcome>, Self> {
        match self {
            RpsEvent::Flow(event) => Ok(event),
            other => Err(other),
        }
    }
}

/// Display commands the RPS flow issues.
pub trait RpsScene {
    fn show_start_screen(&mut self);

    fn init_hud(&mut self, summary: &RpsSummary);

    fn show_start_game(&mut self);

    fn show_round(&mut self, round: u32);

    /// Animate the round; emit `AnimationCompleted` when done.
    fn show_round_result(&mut self, result: &RoundResultData);

    fn show_end_game(&mut self, result: &RpsOutcome);

    fn restart_game(&mut self);

    fn destroy(&mut self) {}
}

/// RPS flow over a scene `S`.
pub struct RpsGameflow<S> {
    data: RpsGameData,
    scene: S,
}

impl<S: RpsScene> RpsGameflow<S> {
    #[must_use]
    pub fn new(scene: S) -> Self {
        Self::with_data(RpsGameData::new(), scene)
    }

    /// Flow over prepared data (e.g. a seeded opponent).
    #[must_use]
    pub fn with_data(data: RpsGameData, scene: S) -> Self {
        Self { data, scene }
    }

    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
}

impl<S: RpsScene> Gameflow for RpsGameflow<S> {
    type Data = RpsGameData;
    type Event = RpsEvent;

    fn data(&self) -> &RpsGameData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut RpsGameData {
        &mut self.data
    }

    fn show_start_screen(&mut self) {
        self.scene.show_start_screen();
    }

    fn start_game(&mut self, _ctx: &mut FlowContext<'_, RpsEvent>) {
        tracing::info!(
            seed = self.data.opponent_seed(),
            best_of = self.data.settings().best_of,
            "rps match started"
        );
        let summary = self.data.game_data();
        self.scene.init_hud(&summary);
        self.scene.show_start_game();
    }

    fn start_round(&mut self, round: u32, _ctx: &mut FlowContext<'_, RpsEvent>) {
        self.scene.show_round(round);
    }

    fn show_round_result(&mut self, payload: RpsRoundPayload, _ctx: &mut FlowContext<'_, RpsEvent>) {
        self.data.set_player_move(payload.player_move.unwrap_or(Move::Rock));

        match self.data.round_result_data() {
            Ok(result) => {
                tracing::debug!(
                    player = %result.player_move,
                    opponent = %result.opponent_move,
                    winner = ?result.round_winner,
                    "round resolved"
                );
                self.scene.show_round_result(&result);
            }
            Err(err) => tracing::warn!(%err, "round result unavailable"),
        }
    }

    fn show_end_game(
        &mut self,
        result: RpsOutcome,
        _timescale: Option<f64>,
        _ctx: &mut FlowContext<'_, RpsEvent>,
    ) {
        tracing::info!(%result, "rps match over");
        self.scene.show_end_game(&result);
    }

    fn restart_game(&mut self, _ctx: &mut FlowContext<'_, RpsEvent>) {
        self.data.reset_data();
        self.scene.restart_game();
    }

    fn custom_events(&self) -> Vec<RpsEventKind> {
        vec![RpsEventKind::AnimationCompleted]
    }

    fn handle_custom(&mut self, event: RpsEvent, ctx: &mut FlowContext<'_, RpsEvent>) {
        let RpsEvent::AnimationCompleted(round) = event else {
            return;
        };

        match round.result {
            Some(result) => ctx.emit_flow(FlowEvent::game_end(result)),
            None => ctx.emit_flow(FlowEvent::RoundStarted),
        }
    }

    fn destroy(&mut self) {
        self.scene.destroy();
    }
}
