//! Two-player bowling session data.

use serde::{Deserialize, Serialize};

use super::cursor::TurnCursor;
use super::frame::{empty_frames, Frame, PINS};
use super::scoring::{apply_throw, is_frame_completed, total_score};
use crate::core::{GameError, GameSettings, GameStateName, Player, PlayerPair, StateTracker};
use crate::data::GameData;

/// Largest frame count the settings guard accepts.
pub const MAX_FRAMES: u32 = 100;

/// Bowling settings submitted by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlingSettings {
    pub number_of_frames: u32,
}

impl Default for BowlingSettings {
    fn default() -> Self {
        Self {
            number_of_frames: 10,
        }
    }
}

impl GameSettings for BowlingSettings {
    fn is_valid(&self) -> bool {
        (1..=MAX_FRAMES).contains(&self.number_of_frames)
    }
}

/// Outcome of the throw just recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrowResult {
    pub pins_knocked_down: u8,
    /// Pins standing before the throw.
    pub total_pins: u8,
    pub is_strike: bool,
    pub is_spare: bool,
}

impl Default for ThrowResult {
    fn default() -> Self {
        Self {
            pins_knocked_down: 0,
            total_pins: PINS,
            is_strike: false,
            is_spare: false,
        }
    }
}

/// Snapshot pushed to the scoreboard after every step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardData {
    pub player1_frames: Vec<Frame>,
    pub player2_frames: Vec<Frame>,
    pub current_player: u8,
    pub current_frame: usize,
    pub current_throw: u8,
    pub player1_total_score: u32,
    pub player2_total_score: u32,
}

/// HUD summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlingSummary {
    pub number_of_frames: u32,
    pub player_score: u32,
    pub opponent_score: u32,
}

/// Final result of a bowling game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BowlingOutcome {
    #[serde(rename = "Player 1 wins!")]
    Player1Wins,
    #[serde(rename = "Player 2 wins!")]
    Player2Wins,
    #[serde(rename = "Tie game!")]
    Tie,
}

impl std::fmt::Display for BowlingOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BowlingOutcome::Player1Wins => write!(f, "Player 1 wins!"),
            BowlingOutcome::Player2Wins => write!(f, "Player 2 wins!"),
            BowlingOutcome::Tie => write!(f, "Tie game!"),
        }
    }
}

/// Frames, turn cursor and settings of one bowling session.
#[derive(Clone, Debug)]
pub struct BowlingGameData {
    states: StateTracker,
    settings: BowlingSettings,
    frames: PlayerPair<Vec<Frame>>,
    cursor: TurnCursor,
    last_throw: Option<ThrowResult>,
}

impl BowlingGameData {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(BowlingSettings::default())
    }

    /// Data with already-validated settings.
    #[must_use]
    pub fn with_settings(settings: BowlingSettings) -> Self {
        let mut data = Self {
            states: StateTracker::new(GameStateName::Init),
            settings,
            frames: PlayerPair::default(),
            cursor: TurnCursor::start(),
            last_throw: None,
        };
        data.initialize_frames();
        data
    }

    /// Replace both rows with empty frames sized by the settings.
    pub fn initialize_frames(&mut self) {
        let count = self.number_of_frames();
        self.frames = PlayerPair::new(|_| empty_frames(count));
    }

    #[must_use]
    pub fn number_of_frames(&self) -> usize {
        self.settings.number_of_frames as usize
    }

    #[must_use]
    pub fn frames(&self, player: Player) -> &[Frame] {
        &self.frames[player]
    }

    #[must_use]
    pub fn cursor(&self) -> TurnCursor {
        self.cursor
    }

    #[must_use]
    pub fn current_player(&self) -> Player {
        self.cursor.player
    }

    /// Running total of `player`; pending frames count as zero.
    #[must_use]
    pub fn total_score(&self, player: Player) -> u32 {
        total_score(&self.frames[player])
    }

    fn current_frame(&self) -> Option<&Frame> {
        self.frames[self.cursor.player].get(self.cursor.frame)
    }

    fn is_last_frame(&self) -> bool {
        self.cursor.frame + 1 == self.number_of_frames()
    }

    /// Record a throw for the player at the cursor.
    ///
    /// Out-of-range pin counts and throws into an already filled slot are
    /// ignored. Returns whether the throw was recorded.
    pub fn set_throw_result(&mut self, pins: i32) -> bool {
        let Ok(pins) = u8::try_from(pins) else {
            return false;
        };
        if pins > PINS || !self.can_process_throw_result() {
            return false;
        }

        let fresh_rack = self.should_reset_all_pins();
        let previous = match self.cursor.throw {
            2 => self.current_frame().and_then(|frame| frame.throw1),
            3 => self.current_frame().and_then(|frame| frame.throw2),
            _ => None,
        }
        .unwrap_or(0);

        let total_pins = if fresh_rack { PINS } else { PINS.saturating_sub(previous) };
        self.last_throw = Some(ThrowResult {
            pins_knocked_down: pins,
            total_pins,
            is_strike: fresh_rack && pins == PINS,
            is_spare: !fresh_rack && previous + pins == PINS,
        });

        let player = self.cursor.player;
        self.cursor = apply_throw(&mut self.frames[player], self.cursor, pins);
        true
    }

    /// Result of the most recent throw (an untouched rack if none yet).
    #[must_use]
    pub fn throw_result(&self) -> ThrowResult {
        self.last_throw.clone().unwrap_or_default()
    }

    /// Check if the slot under the cursor is still empty.
    #[must_use]
    pub fn can_process_throw_result(&self) -> bool {
        self.current_frame()
            .is_some_and(|frame| frame.throw(self.cursor.throw).is_none())
    }

    /// Check if the next throw faces a full rack.
    #[must_use]
    pub fn should_reset_all_pins(&self) -> bool {
        match self.cursor.throw {
            1 => true,
            2 => {
                self.is_last_frame()
                    && self.current_frame().is_some_and(|frame| frame.throw1 == Some(PINS))
            }
            3 => self.is_last_frame(),
            _ => false,
        }
    }

    /// Forget the last throw so the next result starts from a full rack.
    pub fn reset_pins(&mut self) {
        self.last_throw = None;
    }

    /// Final result once both players completed the final frame.
    #[must_use]
    pub fn check_end_game(&self) -> Option<BowlingOutcome> {
        let last = self.number_of_frames().checked_sub(1)?;
        let completed = Player::ALL.iter().all(|&player| {
            self.frames[player]
                .get(last)
                .is_some_and(|frame| is_frame_completed(frame, true))
        });
        if !completed {
            return None;
        }

        let (one, two) = (self.total_score(Player::One), self.total_score(Player::Two));
        Some(match one.cmp(&two) {
            std::cmp::Ordering::Greater => BowlingOutcome::Player1Wins,
            std::cmp::Ordering::Less => BowlingOutcome::Player2Wins,
            std::cmp::Ordering::Equal => BowlingOutcome::Tie,
        })
    }

    #[must_use]
    pub fn scoreboard(&self) -> ScoreboardData {
        ScoreboardData {
            player1_frames: self.frames[Player::One].clone(),
            player2_frames: self.frames[Player::Two].clone(),
            current_player: self.cursor.player.number(),
            current_frame: self.cursor.frame,
            current_throw: self.cursor.throw,
            player1_total_score: self.total_score(Player::One),
            player2_total_score: self.total_score(Player::Two),
        }
    }
}

impl Default for BowlingGameData {
    fn default() -> Self {
        Self::new()
    }
}

impl GameData for BowlingGameData {
    type Settings = BowlingSettings;
    type Summary = BowlingSummary;
    type RoundResult = ThrowResult;

    fn states(&self) -> &StateTracker {
        &self.states
    }

    fn states_mut(&mut self) -> &mut StateTracker {
        &mut self.states
    }

    fn set_game_settings(&mut self, settings: BowlingSettings) {
        self.settings = settings;
        self.initialize_frames();
        self.cursor = TurnCursor::start();
    }

    fn settings(&self) -> &BowlingSettings {
        &self.settings
    }

    fn game_data(&self) -> BowlingSummary {
        BowlingSummary {
            number_of_frames: self.settings.number_of_frames,
            player_score: self.total_score(Player::One),
            opponent_score: self.total_score(Player::Two),
        }
    }

    /// 1-based frame number.
    fn round_data(&self) -> u32 {
        u32::try_from(self.cursor.frame + 1).unwrap_or(u32::MAX)
    }

    fn round_result_data(&mut self) -> Result<ThrowResult, GameError> {
        Ok(self.throw_result())
    }

    fn reset_data(&mut self) {
        self.cursor = TurnCursor::start();
        self.last_throw = None;
        self.initialize_frames();
    }
}
