//! The generic game-flow state machine.
//!
//! ## Transitions
//!
//! | Event            | Enters        | Hook                                  |
//! |------------------|---------------|---------------------------------------|
//! | `GameStarted`    | `Start`       | [`Gameflow::start_game`]              |
//! | `RoundStarted`   | `Round`       | [`Gameflow::start_round`]             |
//! | `RoundCompleted` | `RoundResult` | [`Gameflow::show_round_result`]       |
//! | `GameEnd`        | `End`         | [`Gameflow::show_end_game`]           |
//! | `GameRestarted`  | `Restart`     | [`Gameflow::restart_game`], then `GameStarted` is emitted |
//!
//! Transitions are unconditional: receiving an event enters its state no
//! matter which state the machine is in. Games that must reject out-of-turn
//! input do so inside their hooks.
//!
//! Entering any state cancels every pending timer, so a delayed event
//! scheduled for an earlier state can never fire into a later one.
//!
//! ## Handler Table
//!
//! Event kinds map to plain function pointers, registered once in
//! [`FlowMachine::new`]. Lifecycle kinds share the transition handler; the
//! kinds a game lists in [`Gameflow::custom_events`] route to
//! [`Gameflow::handle_custom`].

use std::time::Duration;

use rustc_hash::FxHashMap;

use super::bus::Emitter;
use super::event::{FlowEvent, FlowEventKind, FlowEventOf, GameEvent};
use super::timer::{Scheduler, TimerId};
use crate::core::{GameSettings, GameStateName};
use crate::data::GameData;

/// What a flow hook may do besides touching its own data and scene.
pub struct FlowContext<'a, E> {
    emitter: &'a Emitter<E>,
    timers: &'a mut Scheduler<E>,
}

impl<'a, E: GameEvent> FlowContext<'a, E> {
    pub fn new(emitter: &'a Emitter<E>, timers: &'a mut Scheduler<E>) -> Self {
        Self { emitter, timers }
    }

    /// Queue an event behind the one being handled.
    pub fn emit(&mut self, event: E) {
        self.emitter.emit(event);
    }

    /// Queue a lifecycle event.
    pub fn emit_flow(&mut self, event: FlowEventOf<E>) {
        self.emitter.emit_flow(event);
    }

    /// Emit `event` after `delay`.
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerId {
        self.timers.schedule(delay, event)
    }

    /// Emit a lifecycle event after `delay`.
    pub fn schedule_flow(&mut self, delay: Duration, event: FlowEventOf<E>) -> TimerId {
        self.timers.schedule(delay, E::from_flow(event))
    }

    pub fn cancel_all(&mut self) -> usize {
        self.timers.cancel_all()
    }

    /// Number of timers still waiting.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }
}

/// A game's reaction to each lifecycle state.
///
/// ## Implementation Notes
///
/// - The flow exclusively owns its `GameData` and its scene
/// - Hooks run synchronously; anything that should happen later goes
///   through `ctx.schedule*`, anything that should happen next through
///   `ctx.emit*`
/// - `restart_game` must reset the game data; the machine emits
///   `GameStarted` right after it returns
pub trait Gameflow {
    type Data: GameData;
    type Event: GameEvent;

    fn data(&self) -> &Self::Data;

    fn data_mut(&mut self) -> &mut Self::Data;

    /// Entering `Init`: show the start screen.
    fn show_start_screen(&mut self);

    /// Entering `Start`: initialize the HUD and show the start of the game.
    fn start_game(&mut self, ctx: &mut FlowContext<'_, Self::Event>);

    /// Entering `Round`: show round `round` (1-based).
    fn start_round(&mut self, round: u32, ctx: &mut FlowContext<'_, Self::Event>);

    /// Entering `RoundResult`: resolve and display the round outcome.
    fn show_round_result(
        &mut self,
        payload: <Self::Event as GameEvent>::RoundPayload,
        ctx: &mut FlowContext<'_, Self::Event>,
    );

    /// Entering `End`: display the final result.
    fn show_end_game(
        &mut self,
        result: <Self::Event as GameEvent>::Outcome,
        timescale: Option<f64>,
        ctx: &mut FlowContext<'_, Self::Event>,
    );

    /// Entering `Restart`: reset the data and the scene.
    fn restart_game(&mut self, ctx: &mut FlowContext<'_, Self::Event>);

    /// Apply untyped settings from the host.
    ///
    /// Invalid payloads are ignored. Returns whether the settings were applied.
    fn set_game_settings(&mut self, settings: &serde_json::Value) -> bool {
        match <<Self::Data as GameData>::Settings as GameSettings>::from_value(settings) {
            Some(settings) => {
                tracing::debug!(?settings, "game settings applied");
                self.data_mut().set_game_settings(settings);
                true
            }
            None => {
                tracing::warn!(%settings, "ignoring invalid game settings");
                false
            }
        }
    }

    /// Game-specific event kinds this flow handles.
    fn custom_events(&self) -> Vec<<Self::Event as GameEvent>::Kind> {
        Vec::new()
    }

    /// Handle one of the kinds listed in `custom_events`.
    fn handle_custom(&mut self, _event: Self::Event, _ctx: &mut FlowContext<'_, Self::Event>) {}

    /// Release scene resources. Called once when the game is destroyed.
    fn destroy(&mut self) {}
}

type EventOf<F> = <F as Gameflow>::Event;
type KindOf<F> = <EventOf<F> as GameEvent>::Kind;
type Handler<F> = fn(&mut FlowMachine<F>, EventOf<F>, &mut FlowContext<'_, EventOf<F>>);

/// Drives a [`Gameflow`] through the lifecycle.
pub struct FlowMachine<F: Gameflow> {
    flow: F,
    handlers: FxHashMap<KindOf<F>, Handler<F>>,
}

impl<F: Gameflow> FlowMachine<F> {
    /// Register the handler table and enter the flow's current state.
    pub fn new(flow: F) -> Self {
        let mut machine = Self {
            flow,
            handlers: FxHashMap::default(),
        };
        machine.setup_event_handlers();

        if machine.current_state() == GameStateName::Init {
            machine.flow.show_start_screen();
        }
        machine
    }

    fn setup_event_handlers(&mut self) {
        for kind in FlowEventKind::ALL {
            self.handlers
                .insert(<KindOf<F>>::from(kind), Self::handle_lifecycle as Handler<F>);
        }
        for kind in self.flow.custom_events() {
            self.handlers.insert(kind, Self::handle_custom as Handler<F>);
        }
    }

    /// Route an event through the handler table.
    ///
    /// Returns false when no handler is registered for its kind.
    pub fn dispatch(&mut self, event: EventOf<F>, ctx: &mut FlowContext<'_, EventOf<F>>) -> bool {
        let kind = event.kind();
        let Some(&handler) = self.handlers.get(&kind) else {
            tracing::trace!(?kind, "no handler registered");
            return false;
        };

        tracing::trace!(?kind, "dispatching event");
        handler(self, event, ctx);
        true
    }

    /// Remove every handler. Safe to call more than once.
    pub fn cleanup_event_handlers(&mut self) {
        self.handlers.clear();
    }

    /// Check if events of `kind` are currently handled.
    #[must_use]
    pub fn is_subscribed(&self, kind: KindOf<F>) -> bool {
        self.handlers.contains_key(&kind)
    }

    #[must_use]
    pub fn flow(&self) -> &F {
        &self.flow
    }

    pub fn flow_mut(&mut self) -> &mut F {
        &mut self.flow
    }

    #[must_use]
    pub fn current_state(&self) -> GameStateName {
        self.flow.data().current_state()
    }

    fn handle_lifecycle(&mut self, event: EventOf<F>, ctx: &mut FlowContext<'_, EventOf<F>>) {
        match event.into_flow() {
            Ok(event) => self.change_state(event, ctx),
            Err(event) => tracing::warn!(kind = ?event.kind(), "not a lifecycle event"),
        }
    }

    fn handle_custom(&mut self, event: EventOf<F>, ctx: &mut FlowContext<'_, EventOf<F>>) {
        self.flow.handle_custom(event, ctx);
    }

    fn change_state(&mut self, event: FlowEventOf<EventOf<F>>, ctx: &mut FlowContext<'_, EventOf<F>>) {
        let kind = event.kind();
        let from = self.current_state();
        let to = kind.target_state();

        ctx.cancel_all();

        let metadata = serde_json::to_value(&event).ok();
        self.flow.data_mut().change_state(to, metadata);
        tracing::debug!(%from, %to, event = %kind, "state transition");

        self.enter_state(event, ctx);
    }

    fn enter_state(&mut self, event: FlowEventOf<EventOf<F>>, ctx: &mut FlowContext<'_, EventOf<F>>) {
        match event {
            FlowEvent::GameStarted => self.flow.start_game(ctx),
            FlowEvent::RoundStarted => {
                let round = self.flow.data().round_data();
                self.flow.start_round(round, ctx);
            }
            FlowEvent::RoundCompleted(payload) => self.flow.show_round_result(payload, ctx),
            FlowEvent::GameEnd { result, timescale } => {
                self.flow.show_end_game(result, timescale, ctx);
            }
            FlowEvent::GameRestarted => {
                self.flow.restart_game(ctx);
                ctx.emit_flow(FlowEvent::GameStarted);
            }
        }
    }
}
