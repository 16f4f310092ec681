//! The command surface a hosting UI drives.
//!
//! `Game` owns the event queue, the timer clock, the host listeners and the
//! flow machine. Every event, whether emitted by the host, by a scene or by
//! a fired timer, goes through the same queue: the flow handles it first,
//! then host listeners are notified.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use parity_games::games::rps::{Move, RpsEvent, RpsGameflow, RpsRoundPayload, RpsScene};
//! use parity_games::games::rps::{RoundResultData, RpsOutcome, RpsSummary};
//! use parity_games::{FlowEvent, Game, GameStateName};
//!
//! struct Headless;
//!
//! impl RpsScene for Headless {
//!     fn show_start_screen(&mut self) {}
//!     fn init_hud(&mut self, _summary: &RpsSummary) {}
//!     fn show_start_game(&mut self) {}
//!     fn show_round(&mut self, _round: u32) {}
//!     fn show_round_result(&mut self, _result: &RoundResultData) {}
//!     fn show_end_game(&mut self, _result: &RpsOutcome) {}
//!     fn restart_game(&mut self) {}
//! }
//!
//! let mut game = Game::new();
//! game.init(|_emitter| RpsGameflow::new(Headless));
//! game.start_game();
//! game.emit(RpsEvent::Flow(FlowEvent::RoundStarted));
//! game.emit(RpsEvent::Flow(FlowEvent::RoundCompleted(RpsRoundPayload::new(Move::Paper))));
//!
//! assert_eq!(game.current_state(), Some(GameStateName::RoundResult));
//! game.tick(Duration::from_secs(1));
//! game.destroy();
//! ```

use std::time::Duration;

use crate::core::GameStateName;
use crate::flow::{
    Emitter, EventBus, FlowContext, FlowEvent, FlowMachine, GameEvent, Gameflow, ListenerId,
    Scheduler,
};

type EventOf<F> = <F as Gameflow>::Event;

/// A game session driven by its host.
pub struct Game<F: Gameflow> {
    machine: Option<FlowMachine<F>>,
    emitter: Emitter<EventOf<F>>,
    scheduler: Scheduler<EventOf<F>>,
    listeners: EventBus<EventOf<F>>,
}

impl<F: Gameflow> Game<F> {
    /// Create a session with no flow attached.
    #[must_use]
    pub fn new() -> Self {
        Self {
            machine: None,
            emitter: Emitter::new(),
            scheduler: Scheduler::new(),
            listeners: EventBus::new(),
        }
    }

    /// Attach a flow. `build` receives the queue handle scenes emit into.
    ///
    /// A previously attached session is destroyed first, listeners included.
    pub fn init(&mut self, build: impl FnOnce(Emitter<EventOf<F>>) -> F) {
        if self.machine.is_some() {
            self.destroy();
        }

        let flow = build(self.emitter.clone());
        self.machine = Some(FlowMachine::new(flow));
        tracing::info!("game initialized");

        // scenes may emit while showing the start screen
        self.pump();
    }

    /// Apply untyped settings. Invalid payloads are ignored.
    pub fn set_game_settings(&mut self, settings: &serde_json::Value) -> bool {
        match self.machine.as_mut() {
            Some(machine) => machine.flow_mut().set_game_settings(settings),
            None => false,
        }
    }

    /// Emit `GameStarted`.
    pub fn start_game(&mut self) {
        tracing::info!("game started");
        self.emit(<F::Event as GameEvent>::from_flow(FlowEvent::GameStarted));
    }

    /// Queue an event and process the queue until it is empty.
    pub fn emit(&mut self, event: EventOf<F>) {
        self.emitter.emit(event);
        self.pump();
    }

    /// Advance the clock by `elapsed`, firing due timers in order.
    pub fn tick(&mut self, elapsed: Duration) {
        let deadline = self.scheduler.now() + elapsed;
        while let Some(event) = self.scheduler.pop_due(deadline) {
            self.emitter.emit(event);
            self.pump();
        }
        self.scheduler.advance_to(deadline);
    }

    /// Call `listener` for every event of `kind`, after the flow handled it.
    pub fn on(
        &mut self,
        kind: <EventOf<F> as GameEvent>::Kind,
        listener: impl FnMut(&EventOf<F>) + 'static,
    ) -> ListenerId {
        self.listeners.on(kind, listener)
    }

    /// Like [`Game::on`], for the next matching event only.
    pub fn once(
        &mut self,
        kind: <EventOf<F> as GameEvent>::Kind,
        listener: impl FnMut(&EventOf<F>) + 'static,
    ) -> ListenerId {
        self.listeners.once(kind, listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.listeners.off(id)
    }

    /// Queue handle for listeners that need to emit.
    #[must_use]
    pub fn emitter(&self) -> Emitter<EventOf<F>> {
        self.emitter.clone()
    }

    #[must_use]
    pub fn flow(&self) -> Option<&F> {
        self.machine.as_ref().map(FlowMachine::flow)
    }

    pub fn flow_mut(&mut self) -> Option<&mut F> {
        self.machine.as_mut().map(FlowMachine::flow_mut)
    }

    #[must_use]
    pub fn current_state(&self) -> Option<GameStateName> {
        self.machine.as_ref().map(FlowMachine::current_state)
    }

    /// Timers waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Check if a flow is attached.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.machine.is_some()
    }

    /// Tear the session down: cancel timers, unsubscribe the flow, release
    /// the scene and drop listeners. Safe to call more than once.
    pub fn destroy(&mut self) {
        self.teardown_flow();
        self.listeners.clear();
    }

    fn teardown_flow(&mut self) {
        self.scheduler.cancel_all();
        self.emitter.clear();
        if let Some(mut machine) = self.machine.take() {
            machine.cleanup_event_handlers();
            machine.flow_mut().destroy();
            tracing::info!("game destroyed");
        }
    }

    fn pump(&mut self) {
        while let Some(event) = self.emitter.pop() {
            let Some(machine) = self.machine.as_mut() else {
                self.emitter.clear();
                return;
            };

            let mut ctx = FlowContext::new(&self.emitter, &mut self.scheduler);
            machine.dispatch(event.clone(), &mut ctx);
            self.listeners.notify(&event);
        }
    }
}

impl<F: Gameflow> Default for Game<F> {
    fn default() -> Self {
        Self::new()
    }
}
