//! Render events redispatched to local subscribers.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::protocol;

/// A render notification from the host.
///
/// `detail` is the inbound message exactly as received. The host owns its
/// shape; the accessors below read the keys Streamlit hosts send without
/// requiring any of them.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderEvent {
    pub detail: Value,
}

impl RenderEvent {
    /// Wrap an inbound message if it carries the render tag.
    pub fn from_inbound(message: Value) -> Option<Self> {
        if protocol::is_render_message(&message) {
            Some(Self { detail: message })
        } else {
            None
        }
    }

    /// Component arguments (`args`), if present.
    pub fn args(&self) -> Option<&Value> {
        self.detail.get("args")
    }

    /// Deserialize `args` into a typed struct.
    pub fn args_as<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.args().map(|args| T::deserialize(args))
    }

    /// Whether the host marked the component disabled. Absent means enabled.
    pub fn disabled(&self) -> bool {
        self.detail
            .get("disabled")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Host theme object, if sent.
    pub fn theme(&self) -> Option<&Value> {
        self.detail.get("theme")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Args {
        width: u32,
        label: String,
    }

    #[test]
    fn wraps_only_render_messages() {
        let render = json!({"type": "streamlit:render", "args": {"width": 1}});
        let event = RenderEvent::from_inbound(render.clone()).unwrap();
        assert_eq!(event.detail, render);

        assert!(RenderEvent::from_inbound(json!({"type": "foo"})).is_none());
        assert!(RenderEvent::from_inbound(json!([1, 2, 3])).is_none());
    }

    #[test]
    fn typed_args() {
        let event = RenderEvent::from_inbound(json!({
            "type": "streamlit:render",
            "args": {"width": 800, "label": "date"},
        }))
        .unwrap();
        let args: Args = event.args_as().unwrap().unwrap();
        assert_eq!(
            args,
            Args {
                width: 800,
                label: "date".into()
            }
        );
    }

    #[test]
    fn mistyped_args_report_an_error() {
        let event = RenderEvent::from_inbound(json!({
            "type": "streamlit:render",
            "args": {"width": "wide"},
        }))
        .unwrap();
        assert!(event.args_as::<Args>().unwrap().is_err());
    }

    #[test]
    fn missing_keys_have_neutral_defaults() {
        let bare = json!({"type": "streamlit:render"});
        let event = RenderEvent::from_inbound(bare).unwrap();
        assert!(event.args().is_none());
        assert!(event.args_as::<Args>().is_none());
        assert!(!event.disabled());
        assert!(event.theme().is_none());
    }

    #[test]
    fn disabled_and_theme() {
        let event = RenderEvent::from_inbound(json!({
            "type": "streamlit:render",
            "disabled": true,
            "theme": {"base": "dark"},
        }))
        .unwrap();
        assert!(event.disabled());
        assert_eq!(event.theme().unwrap()["base"], "dark");
    }
}
