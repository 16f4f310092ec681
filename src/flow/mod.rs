//! Event-driven game lifecycle.
//!
//! - `event`: the shared lifecycle vocabulary and the `GameEvent` trait
//! - `bus`: the FIFO event queue and host listeners
//! - `timer`: cancellable delayed events on an explicit clock
//! - `gameflow`: the state machine and the per-game `Gameflow` contract

pub mod event;
pub mod bus;
pub mod timer;
pub mod gameflow;

pub use event::{FlowEvent, FlowEventKind, FlowEventOf, GameEvent};
pub use bus::{Emitter, EventBus, ListenerId};
pub use timer::{Scheduler, TimerId};
pub use gameflow::{FlowContext, FlowMachine, Gameflow};
