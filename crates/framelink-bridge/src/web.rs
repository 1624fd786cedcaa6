//! Browser transport: `window.parent.postMessage` out, `window` `message`
//! events in.

use serde::Serialize;
use serde_json::Value;
use tracing::trace;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MessageEvent, Window};

use framelink_common::TransportError;

use crate::height::ContentHeight;
use crate::transport::{HostTransport, InboundListener};

/// Route panics to the browser console.
pub fn install_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Transport over the current window and its parent frame.
pub struct WindowTransport {
    window: Window,
}

impl WindowTransport {
    pub fn new() -> Result<Self, TransportError> {
        let window = web_sys::window()
            .ok_or_else(|| TransportError::Unavailable("no global window".into()))?;
        Ok(Self { window })
    }

    fn parent(&self) -> Result<Window, TransportError> {
        self.window
            .parent()
            .map_err(|e| TransportError::Unavailable(format!("parent window: {e:?}")))?
            .ok_or_else(|| TransportError::Unavailable("frame has no parent".into()))
    }
}

impl HostTransport for WindowTransport {
    fn post_to_parent(&self, message: &Value, target_origin: &str) -> Result<(), TransportError> {
        // Plain objects, not Maps, so the host sees the same shape as JSON.
        let js = message
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| TransportError::Encode(e.to_string()))?;
        self.parent()?
            .post_message(&js, target_origin)
            .map_err(|e| TransportError::Post(format!("{e:?}")))
    }

    fn install_listener(&self, listener: InboundListener) -> Result<(), TransportError> {
        let onmessage: Closure<dyn Fn(MessageEvent)> = Closure::new(move |event: MessageEvent| {
            match serde_wasm_bindgen::from_value::<Value>(event.data()) {
                Ok(message) => listener(message),
                Err(e) => trace!("ignoring non-JSON message data: {e}"),
            }
        });
        self.window
            .add_event_listener_with_callback("message", onmessage.as_ref().unchecked_ref())
            .map_err(|e| TransportError::Listen(format!("{e:?}")))?;
        // Installed for the life of the page.
        onmessage.forget();
        Ok(())
    }
}

/// `document.body.scrollHeight`, or `0` before the body exists.
pub struct DocumentScrollHeight;

impl ContentHeight for DocumentScrollHeight {
    fn content_height(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .map(|body| f64::from(body.scroll_height()))
            .unwrap_or(0.0)
    }
}
