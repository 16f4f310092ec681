//! Whose throw it is.

use serde::{Deserialize, Serialize};

use crate::core::Player;

/// Position of the next throw: player, 0-based frame index, 1-based throw.
///
/// Player one completes frame `i`, then player two completes frame `i`, then
/// the cursor moves on to frame `i + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnCursor {
    pub player: Player,
    pub frame: usize,
    pub throw: u8,
}

impl TurnCursor {
    /// First throw of the game.
    #[must_use]
    pub const fn start() -> Self {
        Self {
            player: Player::One,
            frame: 0,
            throw: 1,
        }
    }

    /// Same frame, next throw.
    #[must_use]
    pub const fn with_throw(self, throw: u8) -> Self {
        Self { throw, ..self }
    }

    /// Cursor after the current player completed their frame.
    #[must_use]
    pub const fn next_turn(self) -> Self {
        let frame = match self.player {
            Player::One => self.frame,
            Player::Two => self.frame + 1,
        };
        Self {
            player: self.player.other(),
            frame,
            throw: 1,
        }
    }
}

impl Default for TurnCursor {
    fn default() -> Self {
        Self::start()
    }
}

impl std::fmt::Display for TurnCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} frame {} throw {}", self.player, self.frame + 1, self.throw)
    }
}
