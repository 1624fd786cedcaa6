//! Mounts the rect selector on a bridge, with a scripted user.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use framelink_bridge::{ComponentBridge, HostTransport, RenderEvent};
use tracing::{debug, info, warn};

use crate::rect_selector::{Action, CanvasRect, RectSelector, RectSelectorArgs};

/// What the simulated user does on every render.
#[derive(Debug, Clone, Copy)]
pub struct UserScript {
    pub select: Option<CanvasRect>,
    pub action: Action,
}

/// Subscribe the selector to render events and announce readiness.
pub fn mount<T: HostTransport + 'static>(
    bridge: &Rc<ComponentBridge<T>>,
    selector: Rc<RefCell<RectSelector>>,
    script: UserScript,
) {
    let weak = Rc::downgrade(bridge);
    bridge.subscribe_to_render(move |event| on_render(&weak, &selector, script, event));
    bridge.announce_ready();
}

fn on_render<T: HostTransport>(
    bridge: &Weak<ComponentBridge<T>>,
    selector: &RefCell<RectSelector>,
    script: UserScript,
    event: &RenderEvent,
) {
    let Some(bridge) = bridge.upgrade() else {
        return;
    };

    let args: RectSelectorArgs = match event.args_as() {
        Some(Ok(args)) => args,
        Some(Err(e)) => {
            warn!("render args rejected: {e}");
            return;
        }
        None => {
            warn!("render event without args");
            return;
        }
    };

    debug!(
        width = args.width,
        height = args.height,
        image_len = args.image_base64.len(),
        "render args"
    );
    if let Err(e) = selector.borrow_mut().render(args) {
        warn!("render args rejected: {e}");
        return;
    }
    bridge.report_height(None);

    if event.disabled() {
        info!("component disabled, waiting for next render");
        return;
    }

    let value = {
        let mut selector = selector.borrow_mut();
        if let Some(rect) = script.select {
            if selector.select(rect).is_none() {
                warn!(?rect, "selection has no area on this canvas");
            }
        }
        if let Some(selection) = selector.selection() {
            debug!(?selection, "canvas selection");
        }
        selector.act(script.action)
    };

    match value {
        Some(value) => {
            info!(
                action = ?value.action,
                rect = ?value.rect,
                "reporting selection"
            );
            bridge.report_value(&value);
        }
        None => warn!(action = ?script.action, "action not available"),
    }
}
