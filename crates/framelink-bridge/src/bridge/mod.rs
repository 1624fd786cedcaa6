//! The component side of the host messaging channel.
//!
//! `ComponentBridge` sends the three outbound notifications and fans host
//! render messages out to subscribers. Constructing it installs the one
//! inbound listener on the transport; dropping it stops dispatch.

use std::rc::{Rc, Weak};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, error, trace, warn};

use crate::events::RenderEvent;
use crate::height::ContentHeight;
use crate::protocol::OutboundMessage;
use crate::transport::HostTransport;

mod options;
mod subscribers;

pub use options::BridgeOptions;
pub use subscribers::SubscriptionId;

use subscribers::RenderSubscribers;

pub struct ComponentBridge<T: HostTransport> {
    transport: T,
    height: Box<dyn ContentHeight>,
    options: BridgeOptions,
    subscribers: Rc<RenderSubscribers>,
    listening: bool,
}

impl<T: HostTransport> ComponentBridge<T> {
    /// Create a bridge posting to any origin.
    pub fn new(transport: T, height: impl ContentHeight + 'static) -> Self {
        Self::with_options(transport, height, BridgeOptions::default())
    }

    /// Create a bridge and install its inbound listener.
    ///
    /// If the transport refuses the listener the bridge still sends; it just
    /// never sees render events.
    pub fn with_options(
        transport: T,
        height: impl ContentHeight + 'static,
        options: BridgeOptions,
    ) -> Self {
        let subscribers = Rc::new(RenderSubscribers::default());
        let weak = Rc::downgrade(&subscribers);

        let listening = match transport.install_listener(Box::new(move |message| {
            handle_inbound(&weak, message);
        })) {
            Ok(()) => true,
            Err(e) => {
                error!("failed to install inbound listener, render events disabled: {e}");
                false
            }
        };

        Self {
            transport,
            height: Box::new(height),
            options,
            subscribers,
            listening,
        }
    }

    /// Tell the host the component has initialized.
    pub fn announce_ready(&self) {
        self.send(OutboundMessage::component_ready());
    }

    /// Report the frame height. `None`, NaN or an infinite height reports the
    /// current content height instead. A non-finite content height is never
    /// sent.
    pub fn report_height(&self, height: Option<f64>) {
        let height = match height {
            Some(h) if h.is_finite() => h,
            _ => self.height.content_height(),
        };
        if !height.is_finite() {
            warn!(
                height,
                "frame height dropped, content height is not finite"
            );
            return;
        }
        self.send(OutboundMessage::set_frame_height(height));
    }

    /// Report the component's value, serialized as JSON.
    pub fn report_value<V: Serialize + ?Sized>(&self, value: &V) {
        match serde_json::to_value(value) {
            Ok(value) => self.report_json_value(value),
            Err(e) => warn!("component value dropped, not representable as JSON: {e}"),
        }
    }

    /// Report an already-built JSON value, verbatim.
    pub fn report_json_value(&self, value: Value) {
        self.send(OutboundMessage::set_component_value(value));
    }

    /// Register a handler for host render events.
    pub fn subscribe_to_render<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&RenderEvent) + 'static,
    {
        self.subscribers.add_callback(Rc::new(handler))
    }

    /// Receive render events through a channel. The subscription is dropped
    /// on the first dispatch after the receiver is closed.
    pub fn subscribe_channel(&self) -> mpsc::UnboundedReceiver<RenderEvent> {
        self.subscribers.add_channel().1
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether the inbound listener was installed.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn options(&self) -> &BridgeOptions {
        &self.options
    }

    fn send(&self, message: OutboundMessage) {
        let kind = message.message_type();
        let json = match message.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(kind, "outbound message dropped, encode failed: {e}");
                return;
            }
        };

        match self
            .transport
            .post_to_parent(&json, &self.options.target_origin)
        {
            Ok(()) => debug!(
                kind,
                origin = %self.options.target_origin,
                "outbound message"
            ),
            Err(e) => warn!(kind, "outbound message dropped: {e}"),
        }
    }
}

fn handle_inbound(subscribers: &Weak<RenderSubscribers>, message: Value) {
    let Some(subscribers) = subscribers.upgrade() else {
        return;
    };
    match RenderEvent::from_inbound(message) {
        Some(event) => {
            let delivered = subscribers.dispatch(&event);
            debug!(delivered, "render event");
        }
        None => trace!("ignoring inbound message without render tag"),
    }
}
