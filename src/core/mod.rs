//! Core types shared by every game: players, state history, RNG,
//! configuration and errors.
//!
//! Nothing in here knows about pins or moves. Games build on these types
//! rather than modifying them.

pub mod player;
pub mod rng;
pub mod config;
pub mod state;
pub mod error;

pub use player::{Player, PlayerPair};
pub use rng::GameRng;
pub use config::{FlowTiming, GameSettings};
pub use state::{GameStateName, StateRecord, StateTracker};
pub use error::GameError;
