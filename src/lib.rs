//! # parity-games
//!
//! Game logic for small two-player arcade games (ten-pin bowling,
//! rock-paper-scissors) built on one shared, event-driven game flow.
//!
//! ## Design Principles
//!
//! 1. **Rendering Is Someone Else's Job**: Games command a `Scene` trait
//!    (show round, update scoreboard) and hear back through events. Physics,
//!    animation and audio live outside the crate.
//!
//! 2. **One Lifecycle**: Every game moves through
//!    `Init -> Start -> Round <-> RoundResult -> End -> Restart -> Start`.
//!    Games only supply what happens on entering each state.
//!
//! 3. **Closed Event Vocabularies**: Each game has one event enum; dispatch
//!    goes through a handler table keyed by the event's kind.
//!
//! ## Architecture
//!
//! - **Single-threaded queue**: events emitted while another is handled are
//!   processed afterwards, in FIFO order.
//!
//! - **Explicit clock**: delayed follow-ups (next round, game end) are timers
//!   advanced by `Game::tick`. Every state transition cancels pending timers.
//!
//! - **Persistent history**: state transitions are appended to an `im`
//!   vector with timestamps and the triggering event.
//!
//! ## Modules
//!
//! - `core`: players, state history, RNG, settings, errors
//! - `data`: the `GameData` trait
//! - `flow`: events, queue, timers and the state machine
//! - `game`: the `Game` command surface for hosts
//! - `games`: bowling and rock-paper-scissors
//! - `prefs`: persisted sound preferences

pub mod core;
pub mod data;
pub mod flow;
pub mod game;
pub mod games;
pub mod prefs;

// Re-export commonly used types
pub use crate::core::{
    Player, PlayerPair,
    GameRng,
    FlowTiming, GameSettings,
    GameStateName, StateRecord, StateTracker,
    GameError,
};

pub use crate::data::GameData;

pub use crate::flow::{
    FlowEvent, FlowEventKind, FlowEventOf, GameEvent,
    Emitter, EventBus, ListenerId,
    Scheduler, TimerId,
    FlowContext, FlowMachine, Gameflow,
};

pub use crate::game::Game;

pub use crate::prefs::{
    FileStore, MemoryStore, PreferenceStore,
    SoundPreferences, SoundSettings, SOUND_SETTINGS_KEY,
};
