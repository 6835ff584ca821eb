//! # Iframe-bound Relay
//!
//! Binds the core relay to a live checkout iframe: resize and forward
//! effects act on the iframe, everything else goes to the host handler.

use crate::dom::{js_err, to_js, window};
use crate::listener::ListenerGuard;
use embed_core::{route_effect, EmbedError, EmbedResult, MessageRelay, RelayCallbacks, RelayEffect, RelayHandler};
use serde_json::Value;
use tracing::{trace, warn};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlIFrameElement, MessageEvent};

/// Relay handler owning the checkout iframe
pub struct IframeRelay<H: RelayHandler = RelayCallbacks> {
    iframe: HtmlIFrameElement,
    handler: H,
}

impl<H: RelayHandler> IframeRelay<H> {
    pub fn new(iframe: HtmlIFrameElement, handler: H) -> Self {
        Self { iframe, handler }
    }

    pub fn iframe(&self) -> &HtmlIFrameElement {
        &self.iframe
    }
}

impl<H: RelayHandler> RelayHandler for IframeRelay<H> {
    fn on_effect(&self, effect: RelayEffect) {
        match effect {
            RelayEffect::Resize { .. } | RelayEffect::ForwardToIframe(_) => {
                route_effect(self, effect)
            }
            other => self.handler.on_effect(other),
        }
    }

    fn forward_to_iframe(&self, payload: Value) {
        if let Err(e) = post_message_to_iframe(&self.iframe, &payload) {
            warn!("Failed to forward message to checkout iframe: {}", e);
        }
    }

    fn resize(&self, height_px: f64) {
        if let Err(e) = set_iframe_height(&self.iframe, height_px) {
            warn!("Failed to resize checkout iframe: {}", e);
        }
    }
}

/// Post `payload` into the iframe's window
pub fn post_message_to_iframe(iframe: &HtmlIFrameElement, payload: &Value) -> EmbedResult<()> {
    let target = iframe
        .content_window()
        .ok_or_else(|| EmbedError::Dom("iframe has no content window".to_string()))?;
    target.post_message(&to_js(payload)?, "*").map_err(js_err)
}

/// Set both `height` and `max-height` of the iframe
pub fn set_iframe_height(iframe: &HtmlIFrameElement, height_px: f64) -> EmbedResult<()> {
    let value = format!("{}px", height_px);
    let style = iframe.style();
    style.set_property("height", &value).map_err(js_err)?;
    style.set_property("max-height", &value).map_err(js_err)?;
    Ok(())
}

/// Listen for window `message` events and feed them through `relay`.
///
/// The origin is checked before the message data is decoded. The listener
/// stays registered until the returned guard is dropped.
pub fn listen_for_messages(
    relay: MessageRelay,
    handler: impl RelayHandler + 'static,
) -> EmbedResult<ListenerGuard> {
    let window = window()?;
    ListenerGuard::listen(&window, "message", move |event: Event| {
        let Some(event) = event.dyn_ref::<MessageEvent>() else {
            return;
        };

        // `handle` checks the origin again; this early exit only spares
        // decoding data we would drop anyway
        let origin = event.origin();
        if !relay.accepts(&origin) {
            trace!("Ignoring message from foreign origin {}", origin);
            return;
        }

        let data: Value = match serde_wasm_bindgen::from_value(event.data()) {
            Ok(data) => data,
            Err(e) => {
                trace!("Ignoring undecodable message: {}", e);
                return;
            }
        };

        relay.handle(&origin, &data, &handler);
    })
}
