//! Line-delimited JSON transport: the simulated host reads outbound messages
//! from our stdout and writes its messages to our stdin.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use framelink_bridge::{HostTransport, InboundListener};
use framelink_common::TransportError;
use serde_json::Value;
use tracing::{debug, warn};

/// Clones share the writer and the listeners.
#[derive(Clone)]
pub struct StdioTransport {
    out: Rc<RefCell<Box<dyn Write>>>,
    listeners: Rc<RefCell<Vec<Rc<dyn Fn(Value)>>>>,
}

impl StdioTransport {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self {
            out: Rc::new(RefCell::new(out)),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Hand one line of host input to the listeners. Blank lines and lines
    /// that are not JSON are skipped. Returns whether the line was delivered.
    pub fn feed_line(&self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }

        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                warn!(
                    body_len = line.len(),
                    "host line rejected: invalid JSON: {e}"
                );
                return false;
            }
        };

        debug!(body_len = line.len(), "host message");
        let listeners: Vec<_> = self.listeners.borrow().iter().cloned().collect();
        for listener in &listeners {
            listener(message.clone());
        }
        true
    }
}

impl HostTransport for StdioTransport {
    fn post_to_parent(&self, message: &Value, _target_origin: &str) -> Result<(), TransportError> {
        let mut out = self.out.borrow_mut();
        serde_json::to_writer(&mut *out, message)
            .map_err(|e| TransportError::Encode(e.to_string()))?;
        writeln!(out)
            .map_err(|e| TransportError::Post(e.to_string()))?;
        out.flush().map_err(|e| TransportError::Post(e.to_string()))
    }

    fn install_listener(&self, listener: InboundListener) -> Result<(), TransportError> {
        self.listeners.borrow_mut().push(Rc::from(listener));
        Ok(())
    }
}
