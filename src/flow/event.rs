//! Game event types.
//!
//! Every game defines one closed event enum. The five lifecycle events are
//! shared and live in [`FlowEvent`]; games wrap it and add their own
//! intermediate signals (ball launched, animation completed, ...).
//!
//! ## Dispatch
//!
//! Each event reports a `Kind`: a payload-free tag used as the key of the
//! flow's handler table and of the listener registry. Matching on the kind
//! enum is exhaustive, so adding an event variant forces every dispatch site
//! to handle it.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::core::GameStateName;

/// Lifecycle events shared by every game.
///
/// - `P`: payload of a completed round (pins knocked down, chosen move)
/// - `R`: final result of a game
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowEvent<P, R> {
    /// Start (or restart) a game.
    GameStarted,

    /// Begin the next round.
    RoundStarted,

    /// A round finished; the payload carries its raw outcome.
    RoundCompleted(P),

    /// The game is over.
    GameEnd {
        result: R,
        /// Playback speed for the end-of-game animation.
        timescale: Option<f64>,
    },

    /// Leave the end screen and reset.
    GameRestarted,
}

impl<P, R> FlowEvent<P, R> {
    /// Payload-free tag of this event.
    #[must_use]
    pub fn kind(&self) -> FlowEventKind {
        match self {
            FlowEvent::GameStarted => FlowEventKind::GameStarted,
            FlowEvent::RoundStarted => FlowEventKind::RoundStarted,
            FlowEvent::RoundCompleted(_) => FlowEventKind::RoundCompleted,
            FlowEvent::GameEnd { .. } => FlowEventKind::GameEnd,
            FlowEvent::GameRestarted => FlowEventKind::GameRestarted,
        }
    }

    /// Game end without an animation timescale.
    pub fn game_end(result: R) -> Self {
        FlowEvent::GameEnd {
            result,
            timescale: None,
        }
    }
}

/// Tag of a [`FlowEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowEventKind {
    GameStarted,
    RoundStarted,
    RoundCompleted,
    GameEnd,
    GameRestarted,
}

impl FlowEventKind {
    /// All lifecycle event kinds.
    pub const ALL: [FlowEventKind; 5] = [
        FlowEventKind::GameStarted,
        FlowEventKind::RoundStarted,
        FlowEventKind::RoundCompleted,
        FlowEventKind::GameEnd,
        FlowEventKind::GameRestarted,
    ];

    /// Wire name used by the hosting UI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            FlowEventKind::GameStarted => "GAME_STARTED",
            FlowEventKind::RoundStarted => "ROUND_STARTED",
            FlowEventKind::RoundCompleted => "ROUND_COMPLETED",
            FlowEventKind::GameEnd => "GAME_END",
            FlowEventKind::GameRestarted => "GAME_RESTARTED",
        }
    }

    /// State the machine enters when this event is received.
    #[must_use]
    pub const fn target_state(self) -> GameStateName {
        match self {
            FlowEventKind::GameStarted => GameStateName::Start,
            FlowEventKind::RoundStarted => GameStateName::Round,
            FlowEventKind::RoundCompleted => GameStateName::RoundResult,
            FlowEventKind::GameEnd => GameStateName::End,
            FlowEventKind::GameRestarted => GameStateName::Restart,
        }
    }
}

impl std::fmt::Display for FlowEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A game's closed event vocabulary.
///
/// ## Implementation Notes
///
/// - `Kind` must map every lifecycle kind (`From<FlowEventKind>`)
/// - `into_flow` returns lifecycle events unwrapped and hands every
///   game-specific event back unchanged; `from_flow` is its inverse
pub trait GameEvent: Clone + Debug + 'static {
    /// Payload-free tag type.
    type Kind: Copy + Eq + Hash + Debug + From<FlowEventKind> + 'static;

    /// Payload of `RoundCompleted`.
    type RoundPayload: Clone + Debug + Serialize;

    /// Payload of `GameEnd`.
    type Outcome: Clone + Debug + Serialize;

    /// Tag of this event.
    fn kind(&self) -> Self::Kind;

    /// Wrap a lifecycle event.
    fn from_flow(event: FlowEvent<Self::RoundPayload, Self::Outcome>) -> Self;

    /// Split off the lifecycle part of the vocabulary.
    fn into_flow(self) -> Result<FlowEvent<Self::RoundPayload, Self::Outcome>, Self>;
}

/// Lifecycle event type of a game event vocabulary.
pub type FlowEventOf<E> = FlowEvent<<E as GameEvent>::RoundPayload, <E as GameEvent>::Outcome>;
