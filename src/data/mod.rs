//! Game data trait for game implementations.
//!
//! Each game keeps its scores, cursors and settings behind `GameData`. The
//! generic flow reads round numbers and records transitions through it but
//! never interprets pins or moves directly.

pub mod game_data;

pub use game_data::GameData;
