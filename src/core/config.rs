//! Game configuration types.
//!
//! - `GameSettings`: per-game settings submitted by the hosting UI. Settings
//!   arrive untyped and pass a guard before a game accepts them.
//! - `FlowTiming`: display pauses the flows wait before advancing.

use std::fmt::Debug;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Settings a game accepts from its host.
///
/// ## Guard
///
/// `from_value` is the only way untyped input becomes settings: it must
/// deserialize into `Self` *and* pass `is_valid`. Anything else yields
/// `None` and the caller leaves its state untouched.
///
/// ```
/// use parity_games::core::GameSettings;
/// use parity_games::games::bowling::BowlingSettings;
/// use serde_json::json;
///
/// assert!(BowlingSettings::from_value(&json!({ "numberOfFrames": 5 })).is_some());
/// assert!(BowlingSettings::from_value(&json!({ "numberOfFrames": 0 })).is_none());
/// assert!(BowlingSettings::from_value(&json!("ten")).is_none());
/// ```
pub trait GameSettings: Clone + Debug + Default + Serialize + DeserializeOwned {
    /// Semantic check beyond shape (e.g. counts must be positive).
    fn is_valid(&self) -> bool;

    /// Convert untyped settings, rejecting anything malformed or invalid.
    fn from_value(value: &serde_json::Value) -> Option<Self> {
        let settings = Self::deserialize(value).ok()?;
        settings.is_valid().then_some(settings)
    }
}

/// Display pauses between a round result and the next transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowTiming {
    /// Pause before the next round starts.
    pub round_pause: Duration,

    /// Pause before the end-of-game screen.
    pub end_pause: Duration,
}

impl Default for FlowTiming {
    fn default() -> Self {
        Self {
            round_pause: Duration::from_secs(2),
            end_pause: Duration::from_secs(2),
        }
    }
}

impl FlowTiming {
    /// Set the pause before the next round.
    #[must_use]
    pub fn with_round_pause(mut self, pause: Duration) -> Self {
        self.round_pause = pause;
        self
    }

    /// Set the pause before the end-of-game screen.
    #[must_use]
    pub fn with_end_pause(mut self, pause: Duration) -> Self {
        self.end_pause = pause;
        self
    }
}
