use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tokio::sync::mpsc;
use tracing::trace;

use crate::events::RenderEvent;

/// Handle for a registered render subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Clone)]
enum Subscriber {
    Callback(Rc<dyn Fn(&RenderEvent)>),
    Channel(mpsc::UnboundedSender<RenderEvent>),
}

/// Ordered list of render subscribers.
#[derive(Default)]
pub(crate) struct RenderSubscribers {
    entries: RefCell<Vec<(SubscriptionId, Subscriber)>>,
    next_id: Cell<u64>,
}

impl RenderSubscribers {
    fn push(&self, subscriber: Subscriber) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.entries.borrow_mut().push((id, subscriber));
        id
    }

    pub(crate) fn add_callback(&self, handler: Rc<dyn Fn(&RenderEvent)>) -> SubscriptionId {
        self.push(Subscriber::Callback(handler))
    }

    pub(crate) fn add_channel(&self) -> (SubscriptionId, mpsc::UnboundedReceiver<RenderEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (self.push(Subscriber::Channel(tx)), rx)
    }

    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Invoke every subscriber registered at the time of the call, once each,
    /// in registration order. Returns how many received the event.
    pub(crate) fn dispatch(&self, event: &RenderEvent) -> usize {
        // Handlers may subscribe or unsubscribe re-entrantly.
        let snapshot: Vec<_> = self.entries.borrow().clone();
        let mut delivered = 0;
        let mut closed = Vec::new();

        for (id, subscriber) in snapshot {
            match subscriber {
                Subscriber::Callback(handler) => {
                    handler(event);
                    delivered += 1;
                }
                Subscriber::Channel(tx) => {
                    if tx.send(event.clone()).is_ok() {
                        delivered += 1;
                    } else {
                        closed.push(id);
                    }
                }
            }
        }

        for id in closed {
            trace!(?id, "pruning closed render channel");
            self.remove(id);
        }
        delivered
    }
}
