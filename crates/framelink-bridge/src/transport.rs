//! Channel between the component frame and its host.
//!
//! A transport posts JSON messages to the parent context and feeds every
//! inbound message to the listener the bridge installs. It does no
//! filtering of its own.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use framelink_common::TransportError;
use serde_json::Value;

/// Callback receiving every raw inbound message.
pub type InboundListener = Box<dyn Fn(Value)>;

pub trait HostTransport {
    /// Post a message to the parent context. Fire-and-forget: `Ok` means the
    /// message left, not that the host received it.
    fn post_to_parent(&self, message: &Value, target_origin: &str) -> Result<(), TransportError>;

    /// Install a listener for inbound messages. It stays installed for the
    /// life of the transport.
    fn install_listener(&self, listener: InboundListener) -> Result<(), TransportError>;
}

/// An outbound message recorded by `MemoryTransport`.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub message: Value,
    pub target_origin: String,
}

/// In-process transport. Clones share state, so a caller can keep one handle
/// to inspect outbound traffic and deliver inbound messages while the bridge
/// owns another.
#[derive(Clone, Default)]
pub struct MemoryTransport {
    inner: Rc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    sent: RefCell<Vec<SentMessage>>,
    listeners: RefCell<Vec<Rc<dyn Fn(Value)>>>,
    unavailable: Cell<bool>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything posted so far.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.inner.sent.borrow().clone()
    }

    /// Drain everything posted so far.
    pub fn take_sent(&self) -> Vec<SentMessage> {
        std::mem::take(&mut *self.inner.sent.borrow_mut())
    }

    /// Deliver an inbound message to every installed listener.
    /// Returns how many listeners saw it.
    pub fn deliver(&self, message: Value) -> usize {
        // Listeners may post while handling, so don't hold the borrow.
        let listeners: Vec<_> = self.inner.listeners.borrow().iter().cloned().collect();
        for listener in &listeners {
            listener(message.clone());
        }
        listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Make every subsequent post and listener install fail, as a detached
    /// frame would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.unavailable.set(unavailable);
    }
}

impl HostTransport for MemoryTransport {
    fn post_to_parent(&self, message: &Value, target_origin: &str) -> Result<(), TransportError> {
        if self.inner.unavailable.get() {
            return Err(TransportError::Unavailable(
                "memory transport detached".into(),
            ));
        }
        self.inner.sent.borrow_mut().push(SentMessage {
            message: message.clone(),
            target_origin: target_origin.to_string(),
        });
        Ok(())
    }

    fn install_listener(&self, listener: InboundListener) -> Result<(), TransportError> {
        if self.inner.unavailable.get() {
            return Err(TransportError::Listen("memory transport detached".into()));
        }
        self.inner.listeners.borrow_mut().push(Rc::from(listener));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_posts_with_origin() {
        let transport = MemoryTransport::new();
        transport.post_to_parent(&json!({"a": 1}), "*").unwrap();
        transport
            .post_to_parent(&json!({"b": 2}), "http://localhost:8501")
            .unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].message, json!({"a": 1}));
        assert_eq!(sent[0].target_origin, "*");
        assert_eq!(sent[1].target_origin, "http://localhost:8501");
    }

    #[test]
    fn take_sent_drains() {
        let transport = MemoryTransport::new();
        transport.post_to_parent(&json!(1), "*").unwrap();
        assert_eq!(transport.take_sent().len(), 1);
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn clones_share_state() {
        let transport = MemoryTransport::new();
        let handle = transport.clone();
        transport.post_to_parent(&json!(1), "*").unwrap();
        assert_eq!(handle.sent().len(), 1);
    }

    #[test]
    fn deliver_reaches_every_listener() {
        let transport = MemoryTransport::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for _ in 0..2 {
            let seen = Rc::clone(&seen);
            transport
                .install_listener(Box::new(move |msg| seen.borrow_mut().push(msg)))
                .unwrap();
        }

        assert_eq!(transport.deliver(json!({"type": "x"})), 2);
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(transport.listener_count(), 2);
    }

    #[test]
    fn listener_may_post_while_handling() {
        let transport = MemoryTransport::new();
        let echo = transport.clone();
        transport
            .install_listener(Box::new(move |msg| {
                echo.post_to_parent(&msg, "*").unwrap();
            }))
            .unwrap();

        transport.deliver(json!({"ping": true}));
        assert_eq!(transport.sent()[0].message, json!({"ping": true}));
    }

    #[test]
    fn unavailable_transport_fails() {
        let transport = MemoryTransport::new();
        transport.set_unavailable(true);
        assert!(matches!(
            transport.post_to_parent(&json!(1), "*"),
            Err(TransportError::Unavailable(_))
        ));
        assert!(matches!(
            transport.install_listener(Box::new(|_| {})),
            Err(TransportError::Listen(_))
        ));
        assert!(transport.sent().is_empty());
    }
}
