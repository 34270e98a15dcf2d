use std::collections::VecDeque;
use std::sync::Arc;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use parking_lot::Mutex;

use crate::event::{EventHandler, StoreEvent};

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type SharedHandler = Arc<Mutex<Box<dyn EventHandler>>>;

struct Registry {
    next_id: u64,
    handlers: Vec<(SubscriptionId, SharedHandler)>,
}

#[derive(Default)]
struct Dispatch {
    queue: VecDeque<StoreEvent>,
    running: bool,
}

/// Broadcasts store events to every registered handler, in subscription order.
///
/// No lock is held while a handler runs, so handlers may subscribe,
/// unsubscribe or trigger further events (a save-completed handler that
/// resets the store, say). Events are delivered one at a time in emit order:
/// an event emitted while another is being delivered is queued and handed
/// out by the emitter already dispatching, right after the current one.
/// A handler unsubscribed mid-delivery still sees the event in flight.
pub struct EventBus {
    registry: Mutex<Registry>,
    dispatch: Mutex<Dispatch>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            }),
            dispatch: Mutex::new(Dispatch::default()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: impl EventHandler + 'static) -> SubscriptionId {
        let mut registry = self.registry.lock();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry
            .handlers
            .push((id, Arc::new(Mutex::new(Box::new(handler)))));
        id
    }

    /// Subscribe an async consumer; events are queued on an unbounded channel
    pub fn channel(&self) -> (SubscriptionId, UnboundedReceiver<StoreEvent>) {
        let (sender, receiver) = mpsc::unbounded();
        (self.subscribe(ChannelHandler(sender)), receiver)
    }

    /// Remove a handler. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.lock();
        let before = registry.handlers.len();
        registry.handlers.retain(|(handler_id, _)| *handler_id != id);
        registry.handlers.len() != before
    }

    /// Emit an event to all registered handlers
    pub fn emit(&self, event: StoreEvent) {
        log::trace!("Emitting {:?}", event);
        {
            let mut dispatch = self.dispatch.lock();
            dispatch.queue.push_back(event);
            if dispatch.running {
                return;
            }
            dispatch.running = true;
        }

        loop {
            let event = {
                let mut dispatch = self.dispatch.lock();
                match dispatch.queue.pop_front() {
                    Some(event) => event,
                    None => {
                        dispatch.running = false;
                        return;
                    }
                }
            };
            for handler in self.handlers() {
                handler.lock().handle_event(&event);
            }
        }
    }

    fn handlers(&self) -> Vec<SharedHandler> {
        self.registry
            .lock()
            .handlers
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.registry.lock().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct ChannelHandler(UnboundedSender<StoreEvent>);

impl EventHandler for ChannelHandler {
    fn handle_event(&mut self, event: &StoreEvent) {
        // a dropped receiver just stops listening
        let _ = self.0.unbounded_send(event.clone());
    }
}
