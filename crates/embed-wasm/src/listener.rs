//! # Event Listener Guard
//!
//! Registers a Rust closure as a DOM event listener and removes it again
//! when the guard is dropped or disposed.

use crate::dom::js_err;
use embed_core::EmbedResult;
use std::fmt;
use tracing::trace;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

/// A registered listener; dropping it unregisters the listener
pub struct ListenerGuard {
    target: EventTarget,
    event_type: &'static str,
    closure: Option<Closure<dyn FnMut(Event)>>,
}

impl ListenerGuard {
    /// Register `handler` for `event_type` on `target`
    pub fn listen(
        target: &EventTarget,
        event_type: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> EmbedResult<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
            .map_err(js_err)?;

        Ok(Self {
            target: target.clone(),
            event_type,
            closure: Some(closure),
        })
    }

    pub fn event_type(&self) -> &'static str {
        self.event_type
    }

    /// Unregister now
    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(closure) = self.closure.take() {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event_type, closure.as_ref().unchecked_ref());
            trace!("Removed '{}' listener", self.event_type);
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("event_type", &self.event_type)
            .field("active", &self.closure.is_some())
            .finish()
    }
}
