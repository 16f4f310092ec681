//! Two-player ten-pin bowling.
//!
//! Players alternate frames; the physics layer reports knocked-down pins
//! through `PinsSettled`, which the flow turns into exactly one
//! `RoundCompleted` per throw.

pub mod frame;
pub mod cursor;
pub mod scoring;
pub mod data;
pub mod flow;

pub use frame::{Frame, PINS};
pub use cursor::TurnCursor;
pub use data::{
    BowlingGameData, BowlingOutcome, BowlingSettings, BowlingSummary, ScoreboardData, ThrowResult,
    MAX_FRAMES,
};
pub use flow::{BowlingEvent, BowlingEventKind, BowlingGameflow, BowlingScene, ThrowPayload};
