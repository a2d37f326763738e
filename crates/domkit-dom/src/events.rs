//! DOM Events
//!
//! Event objects and the listener registry behind `addEventListener` /
//! `removeEventListener`. Dispatch itself lives on `Document`, since handlers
//! receive the document mutably.

use std::rc::Rc;

use crate::{Document, NodeId};

/// Listener callback; receives the document so it can mutate it
pub type EventHandler = Rc<dyn Fn(&mut Document, &mut Event)>;

/// Registration handle returned by `add_event_listener`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: String,
    pub target: NodeId,
    pub current_target: NodeId,
    pub bubbles: bool,
    pub cancelable: bool,
    pub timestamp: f64,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    /// Create an event of `event_type` aimed at nothing yet
    pub fn new(event_type: &str, bubbles: bool, cancelable: bool) -> Self {
        Self {
            event_type: event_type.to_string(),
            target: NodeId::NONE,
            current_target: NodeId::NONE,
            bubbles,
            cancelable,
            timestamp: 0.0,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// A bubbling, cancelable `click`
    pub fn click() -> Self {
        Self::new("click", true, true)
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

struct Registration {
    id: ListenerId,
    target: NodeId,
    event_type: String,
    handler: EventHandler,
}

/// Listeners for every target in a document, in registration order
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: Vec<Registration>,
    next_id: u64,
}

impl ListenerRegistry {
    /// Register; the same handler on the same target and type is not added twice
    pub(crate) fn add(
        &mut self,
        target: NodeId,
        event_type: &str,
        handler: EventHandler,
    ) -> (ListenerId, bool) {
        if let Some(existing) = self.listeners.iter().find(|r| {
            r.target == target && r.event_type == event_type && Rc::ptr_eq(&r.handler, &handler)
        }) {
            return (existing.id, false);
        }

        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push(Registration {
            id,
            target,
            event_type: event_type.to_string(),
            handler,
        });
        (id, true)
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|r| r.id != id);
        self.listeners.len() != before
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|r| r.id == id)
    }

    /// Snapshot of listeners for one target/type
    pub(crate) fn snapshot(
        &self,
        target: NodeId,
        event_type: &str,
    ) -> Vec<(ListenerId, EventHandler)> {
        self.listeners
            .iter()
            .filter(|r| r.target == target && r.event_type == event_type)
            .map(|r| (r.id, Rc::clone(&r.handler)))
            .collect()
    }

    pub(crate) fn count(&self, target: NodeId, event_type: &str) -> usize {
        self.listeners
            .iter()
            .filter(|r| r.target == target && r.event_type == event_type)
            .count()
    }
}
