//! Rock-paper-scissors session data.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameRng, GameSettings, GameStateName, StateTracker};
use crate::data::GameData;

/// A hand shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Check if `self` defeats `other`.
    #[must_use]
    pub const fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors) | (Move::Scissors, Move::Paper) | (Move::Paper, Move::Rock)
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Move {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::ALL
            .into_iter()
            .find(|mv| mv.as_str() == s)
            .ok_or_else(|| GameError::UnknownMove(s.to_string()))
    }
}

/// Who took a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundWinner {
    Player,
    Opponent,
    Tie,
}

/// Final result of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RpsOutcome {
    #[serde(rename = "Player wins!")]
    PlayerWins,
    #[serde(rename = "Opponent wins!")]
    OpponentWins,
}

impl std::fmt::Display for RpsOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RpsOutcome::PlayerWins => write!(f, "Player wins!"),
            RpsOutcome::OpponentWins => write!(f, "Opponent wins!"),
        }
    }
}

/// Resolved round, with the scores after it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResultData {
    pub player_move: Move,
    pub opponent_move: Move,
    pub player_score: u32,
    pub opponent_score: u32,
    pub round_winner: RoundWinner,
    /// Set when this round ended the match.
    pub result: Option<RpsOutcome>,
}

/// RPS settings submitted by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpsSettings {
    pub best_of: u32,
}

impl Default for RpsSettings {
    fn default() -> Self {
        Self { best_of: 3 }
    }
}

impl GameSettings for RpsSettings {
    fn is_valid(&self) -> bool {
        self.best_of > 0
    }
}

/// HUD summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpsSummary {
    pub player_score: u32,
    pub opponent_score: u32,
}

/// Scores, round counter and pending move of one RPS match.
#[derive(Clone, Debug)]
pub struct RpsGameData {
    states: StateTracker,
    settings: RpsSettings,
    player_score: u32,
    opponent_score: u32,
    round_number: u32,
    player_move: Option<Move>,
    rng: GameRng,
}

impl RpsGameData {
    /// Data whose opponent draws from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(GameRng::from_entropy())
    }

    /// Data with a reproducible opponent.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(GameRng::new(seed))
    }

    fn with_rng(rng: GameRng) -> Self {
        Self {
            states: StateTracker::new(GameStateName::Init),
            settings: RpsSettings::default(),
            player_score: 0,
            opponent_score: 0,
            round_number: 1,
            player_move: None,
            rng,
        }
    }

    pub fn set_player_move(&mut self, player_move: Move) {
        self.player_move = Some(player_move);
    }

    #[must_use]
    pub fn player_move(&self) -> Option<Move> {
        self.player_move
    }

    /// Seed of the opponent's move sequence. `with_seed` on it replays the
    /// same opponent.
    #[must_use]
    pub fn opponent_seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    #[must_use]
    pub fn opponent_score(&self) -> u32 {
        self.opponent_score
    }

    /// Score a round and advance the round counter, ties included.
    pub fn check_round_result(&mut self, player_move: Move, opponent_move: Move) -> RoundWinner {
        self.round_number += 1;

        if player_move == opponent_move {
            RoundWinner::Tie
        } else if player_move.beats(opponent_move) {
            self.player_score += 1;
            RoundWinner::Player
        } else {
            self.opponent_score += 1;
            RoundWinner::Opponent
        }
    }

    /// Match result once either side reached a majority of `best_of`.
    #[must_use]
    pub fn check_end_game(&self) -> Option<RpsOutcome> {
        let wins_needed = self.settings.best_of.div_ceil(2);

        if self.player_score >= wins_needed {
            Some(RpsOutcome::PlayerWins)
        } else if self.opponent_score >= wins_needed {
            Some(RpsOutcome::OpponentWins)
        } else {
            None
        }
    }

    fn draw_opponent_move(&mut self) -> Move {
        self.rng.choose(&Move::ALL).copied().unwrap_or(Move::Rock)
    }
}

impl Default for RpsGameData {
    fn default() -> Self {
        Self::new()
    }
}

impl GameData for RpsGameData {
    type Settings = RpsSettings;
    type Summary = RpsSummary;
    type RoundResult = RoundResultData;

    fn states(&self) -> &StateTracker {
        &self.states
    }

    fn states_mut(&mut self) -> &mut StateTracker {
        &mut self.states
    }

    fn set_game_settings(&mut self, settings: RpsSettings) {
        self.settings = settings;
    }

    fn settings(&self) -> &RpsSettings {
        &self.settings
    }

    fn game_data(&self) -> RpsSummary {
        RpsSummary {
            player_score: self.player_score,
            opponent_score: self.opponent_score,
        }
    }

    fn round_data(&self) -> u32 {
        self.round_number
    }

    /// Draw the opponent's move and resolve the round.
    fn round_result_data(&mut self) -> Result<RoundResultData, GameError> {
        let player_move = self.player_move.ok_or(GameError::MoveNotSet)?;
        let opponent_move = self.draw_opponent_move();
        let round_winner = self.check_round_result(player_move, opponent_move);

        Ok(RoundResultData {
            player_move,
            opponent_move,
            player_score: self.player_score,
            opponent_score: self.opponent_score,
            round_winner,
            result: self.check_end_game(),
        })
    }

    fn reset_data(&mut self) {
        self.player_score = 0;
        self.opponent_score = 0;
        self.round_number = 1;
        self.player_move = None;
    }
}
