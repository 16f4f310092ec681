//! Game data trait for game implementations.
//!
//! Games implement `GameData` to define:
//! - What a round produces (throw result, RPS round result)
//! - How the round counter is derived
//! - How the data resets between sessions

use crate::core::{GameError, GameSettings, GameStateName, StateTracker};

/// Authoritative per-session data.
///
/// ## Implementation Notes
///
/// - Only the paired `Gameflow` mutates game data
/// - `reset_data` restores initial values in place; the session keeps the
///   same data instance across restarts
/// - `round_result_data` may fail only when the flow forgot a precondition
pub trait GameData {
    /// Settings this game accepts.
    type Settings: GameSettings;

    /// Summary used to initialize the HUD.
    type Summary;

    /// Result of the most recent round.
    type RoundResult;

    /// State tracker holding the current state and its history.
    fn states(&self) -> &StateTracker;

    /// Mutable state tracker.
    fn states_mut(&mut self) -> &mut StateTracker;

    /// Replace the settings. Callers have already validated them.
    fn set_game_settings(&mut self, settings: Self::Settings);

    /// Currently applied settings.
    fn settings(&self) -> &Self::Settings;

    /// HUD summary of the whole game.
    fn game_data(&self) -> Self::Summary;

    /// 1-based number of the round about to be played.
    fn round_data(&self) -> u32;

    /// Resolve (or report) the current round.
    fn round_result_data(&mut self) -> Result<Self::RoundResult, GameError>;

    /// Reset scores and cursors to their initial values.
    fn reset_data(&mut self);

    // === Convenience Methods ===

    /// Current lifecycle state.
    fn current_state(&self) -> GameStateName {
        self.states().current()
    }

    /// Record a transition.
    fn change_state(&mut self, new_state: GameStateName, metadata: Option<serde_json::Value>) {
        self.states_mut().change_state(new_state, metadata);
    }

    /// State left by the most recent transition.
    fn previous_state(&self) -> Option<GameStateName> {
        self.states().previous_state()
    }
}
