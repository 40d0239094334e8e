use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::console::domain::models::ContentEnvelope;

/// Dispatch keys for the message bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventName {
    ContentReceived,
    Play,
    Next,
    Previous,
}

#[derive(Clone, Debug)]
pub enum BusEvent {
    ContentReceived(ContentEnvelope),
    Play,
    Next,
    Previous,
}

impl BusEvent {
    pub fn name(&self) -> EventName {
        match self {
            BusEvent::ContentReceived(_) => EventName::ContentReceived,
            BusEvent::Play => EventName::Play,
            BusEvent::Next => EventName::Next,
            BusEvent::Previous => EventName::Previous,
        }
    }
}

pub trait Subscriber {
    fn on_event(&mut self, bus: &MessageBus, event: &BusEvent);
}

pub type SharedSubscriber = Rc<RefCell<dyn Subscriber>>;

/// Synchronous publish/subscribe channel between the keyboard, the console
/// controller, and whichever view is mounted.
///
/// Delivery is immediate and in registration order; publish is
/// fire-and-forget with no queue. `unsubscribe` removes every subscriber
/// registered for a name, not just the caller's own. A component that both
/// subscribes and tears down must therefore be the only subscriber to its
/// names while alive, or accept that its teardown evicts siblings.
#[derive(Default)]
pub struct MessageBus {
    subscribers: RefCell<HashMap<EventName, Vec<SharedSubscriber>>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, name: EventName, subscriber: SharedSubscriber) {
        self.subscribers
            .borrow_mut()
            .entry(name)
            .or_default()
            .push(subscriber);
    }

    /// Drops all subscribers for each of the given names.
    pub fn unsubscribe(&self, names: &[EventName]) {
        let mut subscribers = self.subscribers.borrow_mut();
        for name in names {
            subscribers.remove(name);
        }
    }

    pub fn publish(&self, event: &BusEvent) {
        // Snapshot the list before delivering so a handler may subscribe or
        // unsubscribe without holding the map borrow open.
        let current: Vec<SharedSubscriber> = self
            .subscribers
            .borrow()
            .get(&event.name())
            .cloned()
            .unwrap_or_default();
        for subscriber in current {
            subscriber.borrow_mut().on_event(self, event);
        }
    }

    pub fn subscriber_count(&self, name: EventName) -> usize {
        self.subscribers
            .borrow()
            .get(&name)
            .map_or(0, |list| list.len())
    }
}
