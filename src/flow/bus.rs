//! Event queue and listener registry.
//!
//! - [`Emitter`]: cloneable handle onto the game's FIFO event queue. Scenes
//!   and host listeners keep a clone and push completion events into it.
//! - [`EventBus`]: host-facing `on` / `once` / `off` listeners, indexed by
//!   event kind for direct lookup.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::event::{FlowEventOf, GameEvent};

/// Cloneable handle to a game's pending-event queue.
///
/// Events pushed while another event is being handled wait their turn: the
/// game drains the queue one event at a time, in push order.
pub struct Emitter<E> {
    queue: Rc<RefCell<VecDeque<E>>>,
}

impl<E> Emitter<E> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Queue an event.
    pub fn emit(&self, event: E) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Take the oldest queued event.
    pub fn pop(&self) -> Option<E> {
        self.queue.borrow_mut().pop_front()
    }

    /// Number of queued events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Check if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Drop every queued event.
    pub fn clear(&self) {
        self.queue.borrow_mut().clear();
    }
}

impl<E: GameEvent> Emitter<E> {
    /// Queue a lifecycle event.
    pub fn emit_flow(&self, event: FlowEventOf<E>) {
        self.emit(E::from_flow(event));
    }
}

impl<E> Clone for Emitter<E> {
    fn clone(&self) -> Self {
        Self {
            queue: Rc::clone(&self.queue),
        }
    }
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter").field("queued", &self.len()).finish()
    }
}

/// Unique identifier for a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

struct Listener<E> {
    callback: Box<dyn FnMut(&E)>,
    once: bool,
}

/// Host listeners keyed by event kind.
pub struct EventBus<E: GameEvent> {
    listeners: FxHashMap<ListenerId, Listener<E>>,

    /// Listener IDs per kind, in registration order.
    by_kind: FxHashMap<E::Kind, SmallVec<[ListenerId; 4]>>,

    next_id: u32,
}

impl<E: GameEvent> EventBus<E> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: FxHashMap::default(),
            by_kind: FxHashMap::default(),
            next_id: 0,
        }
    }

    /// Register a listener called for every event of `kind`.
    pub fn on(&mut self, kind: E::Kind, callback: impl FnMut(&E) + 'static) -> ListenerId {
        self.register(kind, Box::new(callback), false)
    }

    /// Register a listener removed after its first call.
    pub fn once(&mut self, kind: E::Kind, callback: impl FnMut(&E) + 'static) -> ListenerId {
        self.register(kind, Box::new(callback), true)
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        if self.listeners.remove(&id).is_none() {
            return false;
        }
        for ids in self.by_kind.values_mut() {
            ids.retain(|existing| *existing != id);
        }
        self.by_kind.retain(|_, ids| !ids.is_empty());
        true
    }

    /// Call every listener registered for the event's kind.
    ///
    /// Returns the number of listeners called.
    pub fn notify(&mut self, event: &E) -> usize {
        let Some(ids) = self.by_kind.get(&event.kind()).cloned() else {
            return 0;
        };

        let mut called = 0;
        for id in ids {
            let Some(listener) = self.listeners.get_mut(&id) else {
                continue;
            };
            (listener.callback)(event);
            called += 1;

            if listener.once {
                self.off(id);
            }
        }
        called
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Remove every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
        self.by_kind.clear();
    }

    fn register(&mut self, kind: E::Kind, callback: Box<dyn FnMut(&E)>, once: bool) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        self.listeners.insert(id, Listener { callback, once });
        self.by_kind.entry(kind).or_default().push(id);
        id
    }
}

impl<E: GameEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}
