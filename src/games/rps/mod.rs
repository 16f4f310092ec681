//! Rock-paper-scissors against a random opponent, best of N.
//!
//! The scene animates each round and reports back with
//! `AnimationCompleted`; the flow then either starts the next round or ends
//! the match.

pub mod data;
pub mod flow;

pub use data::{
    Move, RoundResultData, RoundWinner, RpsGameData, RpsOutcome, RpsSettings, RpsSummary,
};
pub use flow::{RpsEvent, RpsEventKind, RpsGameflow, RpsRoundPayload, RpsScene};
