//! Crate error type.
//!
//! Invalid input from the UI (bad settings, out-of-range throws) is not an
//! error here: it is dropped silently by the operation receiving it. Errors
//! are reserved for broken flow wiring and preference storage failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Round result requested before the player picked a move.
    #[error("player move must be set before getting round result")]
    MoveNotSet,

    #[error("unknown move: {0:?}")]
    UnknownMove(String),

    #[error("preference storage failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference encoding failed: {0}")]
    Serde(#[from] serde_json::Error),
}
