//! Events published to the presentation layer
//!
//! Delivery is synchronous and in emission order: every listener sees every
//! event of a tick before the next tick runs.

use serde::{Deserialize, Serialize};

use crate::sim::Outcome;

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Budget estimate for the running level, sent every tick (may be negative)
    TimeUpdate { remaining: f64 },
    /// `true` swaps the card colors, `false` restores the defaults
    ColorChanged { inverted: bool },
    /// The level number changed (0 after a restart)
    LevelChanged { level: u32 },
    /// The run ended
    Finished { outcome: Outcome },
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Ordered list of event listeners
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it receives every event emitted from now on
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Deliver an event to every listener in subscription order
    pub fn emit(&mut self, event: &GameEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Shared recorder of delivered events
///
/// Subscribe `log.listener()` and read back with `take`.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct EventLog {
    events: std::rc::Rc<std::cell::RefCell<Vec<GameEvent>>>,
}

#[cfg(test)]
impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener(&self) -> impl FnMut(&GameEvent) + 'static {
        let events = std::rc::Rc::clone(&self.events);
        move |event: &GameEvent| events.borrow_mut().push(*event)
    }

    /// Drain everything recorded so far
    pub fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listeners_receive_in_order() {
        let mut bus = EventBus::new();
        let first = EventLog::new();
        let second = EventLog::new();
        bus.subscribe(first.listener());
        bus.subscribe(second.listener());

        bus.emit(&GameEvent::TimeUpdate { remaining: 6.95 });
        bus.emit(&GameEvent::ColorChanged { inverted: true });

        let expected = vec![
            GameEvent::TimeUpdate { remaining: 6.95 },
            GameEvent::ColorChanged { inverted: true },
        ];
        assert_eq!(first.take(), expected);
        assert_eq!(second.take(), expected);
        assert!(first.is_empty());
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut bus = EventBus::new();
        let log = EventLog::new();
        let id = bus.subscribe(log.listener());

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert!(bus.is_empty());

        bus.emit(&GameEvent::LevelChanged { level: 1 });
        assert!(log.is_empty());
    }

    #[test]
    fn test_listener_ids_are_unique() {
        let mut bus = EventBus::new();
        let a = bus.subscribe(|_| {});
        let b = bus.subscribe(|_| {});
        assert_ne!(a, b);
        assert_eq!(bus.len(), 2);
    }
}
