//! Messaging bridge between an embedded component frame and its host page.
//!
//! Provides:
//! - Typed outbound notifications (ready, frame height, component value)
//! - Render events from the host, redispatched to typed subscribers
//! - A `HostTransport` seam with an in-memory implementation for tests and
//!   native hosts, and a `window.postMessage` implementation behind the
//!   `web` feature on wasm32
//! - An explicit `ContentHeight` source for height reports without a value

pub mod bridge;
pub mod events;
pub mod height;
pub mod protocol;
pub mod transport;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;

pub use bridge::{BridgeOptions, ComponentBridge, SubscriptionId};
pub use events::RenderEvent;
pub use height::{ContentHeight, FixedHeight};
pub use protocol::{OutboundKind, OutboundMessage, API_VERSION};
pub use transport::{HostTransport, InboundListener, MemoryTransport, SentMessage};
