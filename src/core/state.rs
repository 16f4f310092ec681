//! Game-flow state names and the append-only transition history.
//!
//! ## GameStateName
//!
//! The six lifecycle states every game moves through:
//! `Init -> Start -> Round <-> RoundResult -> End -> Restart -> Start ...`
//!
//! ## StateTracker
//!
//! Current state plus every transition taken so far. History entries are
//! never mutated once recorded and only serve diagnostics.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStateName {
    /// Waiting on the start screen.
    Init,
    /// HUD initialized, first round not yet shown.
    Start,
    /// A round (bowling throw, RPS choice) is in progress.
    Round,
    /// The round outcome is being displayed.
    RoundResult,
    /// Final result displayed.
    End,
    /// Data reset, bouncing back into `Start`.
    Restart,
}

impl GameStateName {
    /// All states in lifecycle order.
    pub const ALL: [GameStateName; 6] = [
        GameStateName::Init,
        GameStateName::Start,
        GameStateName::Round,
        GameStateName::RoundResult,
        GameStateName::End,
        GameStateName::Restart,
    ];

    /// Stable lowercase name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameStateName::Init => "init",
            GameStateName::Start => "start",
            GameStateName::Round => "round",
            GameStateName::RoundResult => "round-result",
            GameStateName::End => "end",
            GameStateName::Restart => "restart",
        }
    }
}

impl std::fmt::Display for GameStateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the transition history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    /// State entered.
    pub name: GameStateName,

    /// State left. `None` only for the initial record.
    pub previous_state: Option<GameStateName>,

    /// Wall-clock time the state was entered.
    pub entered_at: DateTime<Utc>,

    /// The event that caused the transition, serialized.
    pub metadata: Option<serde_json::Value>,
}

/// Current state and transition history.
///
/// Uses an `im` vector so snapshots of a long session stay cheap to clone.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateTracker {
    current: GameStateName,
    history: Vector<StateRecord>,
}

impl StateTracker {
    /// Create a tracker sitting in `initial`, with one history record.
    #[must_use]
    pub fn new(initial: GameStateName) -> Self {
        let mut history = Vector::new();
        history.push_back(StateRecord {
            name: initial,
            previous_state: None,
            entered_at: Utc::now(),
            metadata: None,
        });

        Self {
            current: initial,
            history,
        }
    }

    /// The state the game is currently in.
    #[must_use]
    pub fn current(&self) -> GameStateName {
        self.current
    }

    /// Move to `new_state` and append a history record linking back to the
    /// state being left.
    pub fn change_state(&mut self, new_state: GameStateName, metadata: Option<serde_json::Value>) {
        let previous_state = self.current;
        self.current = new_state;

        self.history.push_back(StateRecord {
            name: new_state,
            previous_state: Some(previous_state),
            entered_at: Utc::now(),
            metadata,
        });
    }

    /// Every record in the order it was entered.
    #[must_use]
    pub fn history(&self) -> &Vector<StateRecord> {
        &self.history
    }

    /// The state left by the most recent transition.
    #[must_use]
    pub fn previous_state(&self) -> Option<GameStateName> {
        self.history.last().and_then(|record| record.previous_state)
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new(GameStateName::Init)
    }
}
