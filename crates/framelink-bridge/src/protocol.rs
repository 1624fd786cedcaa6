//! Wire protocol between the component frame and the host page.
//!
//! Every outbound message is a flat JSON object carrying the fixed envelope
//! (`isStreamlitMessage: true`, `apiVersion: 1`), a `type` tag, and at most
//! one payload field. The only inbound message the bridge acts on is
//! `streamlit:render`.

use serde::{Deserialize, Serialize};

/// Protocol version stamped on every outbound message.
pub const API_VERSION: u32 = 1;

pub const COMPONENT_READY: &str = "streamlit:componentReady";
pub const SET_FRAME_HEIGHT: &str = "streamlit:setFrameHeight";
pub const SET_COMPONENT_VALUE: &str = "streamlit:setComponentValue";
pub const RENDER: &str = "streamlit:render";

/// A message from the component to its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub is_streamlit_message: bool,
    pub api_version: u32,
    #[serde(flatten)]
    pub kind: OutboundKind,
}

/// Type tag plus operation-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutboundKind {
    #[serde(rename = "streamlit:componentReady")]
    ComponentReady,
    #[serde(rename = "streamlit:setFrameHeight")]
    SetFrameHeight { height: f64 },
    #[serde(rename = "streamlit:setComponentValue")]
    SetComponentValue { value: serde_json::Value },
}

impl OutboundMessage {
    fn envelope(kind: OutboundKind) -> Self {
        Self {
            is_streamlit_message: true,
            api_version: API_VERSION,
            kind,
        }
    }

    pub fn component_ready() -> Self {
        Self::envelope(OutboundKind::ComponentReady)
    }

    pub fn set_frame_height(height: f64) -> Self {
        Self::envelope(OutboundKind::SetFrameHeight { height })
    }

    pub fn set_component_value(value: serde_json::Value) -> Self {
        Self::envelope(OutboundKind::SetComponentValue { value })
    }

    /// The `type` tag this message carries on the wire.
    pub fn message_type(&self) -> &'static str {
        match self.kind {
            OutboundKind::ComponentReady => COMPONENT_READY,
            OutboundKind::SetFrameHeight { .. } => SET_FRAME_HEIGHT,
            OutboundKind::SetComponentValue { .. } => SET_COMPONENT_VALUE,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Whether a raw inbound message is a render notification.
///
/// Anything that is not an object with `type == "streamlit:render"` is not.
pub fn is_render_message(message: &serde_json::Value) -> bool {
    message.get("type").and_then(|t| t.as_str()) == Some(RENDER)
}
