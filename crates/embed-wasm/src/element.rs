//! # Payment Element
//!
//! Creates (or reuses) the single checkout iframe under a mount target and
//! binds the message relay and the load callback to it.

use crate::dom::{create, document, js_err};
use crate::listener::ListenerGuard;
use crate::relay::listen_for_messages;
use embed_core::style::PAYMENT_IFRAME_STYLE;
use embed_core::{plan_iframe_upsert, EmbedError, EmbedResult, MessageRelay, RelayHandler, UpsertAction};
use std::fmt;
use std::rc::Rc;
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlIFrameElement};

/// Where the iframe is inserted
#[derive(Debug, Clone)]
pub enum MountTarget {
    Element(HtmlElement),
    /// Id of an element in the current document
    Id(String),
}

impl MountTarget {
    fn resolve(&self, document: &Document) -> EmbedResult<Element> {
        match self {
            MountTarget::Element(element) => Ok(element.clone().into()),
            MountTarget::Id(id) => document
                .get_element_by_id(id)
                .ok_or_else(|| EmbedError::InvalidMountTarget { id: id.clone() }),
        }
    }
}

impl From<HtmlElement> for MountTarget {
    fn from(element: HtmlElement) -> Self {
        MountTarget::Element(element)
    }
}

impl From<&str> for MountTarget {
    fn from(id: &str) -> Self {
        MountTarget::Id(id.to_string())
    }
}

impl From<String> for MountTarget {
    fn from(id: String) -> Self {
        MountTarget::Id(id)
    }
}

/// Load callback
pub type LoadCallback = Rc<dyn Fn(Event)>;

/// Factory for the checkout iframe
#[derive(Clone, Default)]
pub struct PaymentElement {
    mount: Option<MountTarget>,
    on_load: Option<LoadCallback>,
}

impl fmt::Debug for PaymentElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentElement")
            .field("mount", &self.mount)
            .field("on_load", &self.on_load.is_some())
            .finish()
    }
}

impl PaymentElement {
    /// Without a mount target the iframe is returned unattached
    pub fn new(mount: Option<MountTarget>) -> Self {
        Self {
            mount,
            on_load: None,
        }
    }

    /// Builder: callback invoked on every iframe `load` event
    pub fn with_on_load(mut self, on_load: impl Fn(Event) + 'static) -> Self {
        self.on_load = Some(Rc::new(on_load));
        self
    }

    pub(crate) fn with_on_load_rc(mut self, on_load: LoadCallback) -> Self {
        self.on_load = Some(on_load);
        self
    }

    /// Materialize the iframe and bind the relay to it.
    ///
    /// If the mount target already holds an iframe with `iframe_id`, that
    /// iframe is reused and only its `src` is updated when `link` differs.
    /// `bind` receives the iframe actually returned and produces the relay
    /// handler for it.
    pub fn create<H, F>(
        &self,
        link: &str,
        iframe_id: &str,
        relay: MessageRelay,
        bind: F,
    ) -> EmbedResult<MountedIframe>
    where
        H: RelayHandler + 'static,
        F: FnOnce(HtmlIFrameElement) -> H,
    {
        let document = document()?;
        let container = self
            .mount
            .as_ref()
            .map(|mount| mount.resolve(&document))
            .transpose()?;

        let (iframe, action) = match &container {
            None => (new_iframe(&document, link, iframe_id)?, UpsertAction::Append),
            Some(container) => {
                let existing = find_iframe(container, iframe_id)?;
                let action = plan_iframe_upsert(existing.as_ref().map(|f| f.src()).as_deref(), link);
                match (action, existing) {
                    (UpsertAction::Reuse, Some(iframe)) => (iframe, action),
                    (UpsertAction::Retarget, Some(iframe)) => {
                        iframe.set_src(link);
                        (iframe, action)
                    }
                    _ => {
                        let iframe = new_iframe(&document, link, iframe_id)?;
                        container.append_child(&iframe).map_err(js_err)?;
                        (iframe, UpsertAction::Append)
                    }
                }
            }
        };
        debug!("Checkout iframe ready: {:?}", action);

        let message_listener = listen_for_messages(relay, bind(iframe.clone()))?;

        let load_listener = match &self.on_load {
            Some(on_load) => {
                let on_load = on_load.clone();
                Some(ListenerGuard::listen(&iframe, "load", move |event| on_load(event))?)
            }
            None => None,
        };

        Ok(MountedIframe {
            iframe,
            action,
            attached: container.is_some(),
            message_listener,
            load_listener,
        })
    }
}

fn new_iframe(document: &Document, link: &str, iframe_id: &str) -> EmbedResult<HtmlIFrameElement> {
    let iframe: HtmlIFrameElement = create(document, "iframe")?;
    iframe.set_src(link);
    iframe.set_id(iframe_id);
    iframe
        .set_attribute("style", PAYMENT_IFRAME_STYLE)
        .map_err(js_err)?;
    Ok(iframe)
}

fn find_iframe(container: &Element, iframe_id: &str) -> EmbedResult<Option<HtmlIFrameElement>> {
    let found = container
        .query_selector(&format!("#{}", iframe_id))
        .map_err(js_err)?;
    match found {
        None => Ok(None),
        Some(element) => element.dyn_into::<HtmlIFrameElement>().map(Some).map_err(|_| {
            EmbedError::Dom(format!("element #{} exists but is not an iframe", iframe_id))
        }),
    }
}

/// The checkout iframe plus the listeners bound to it.
///
/// Dropping this unregisters the message and load listeners; the iframe
/// itself stays in the document.
#[derive(Debug)]
pub struct MountedIframe {
    iframe: HtmlIFrameElement,
    action: UpsertAction,
    attached: bool,
    message_listener: ListenerGuard,
    load_listener: Option<ListenerGuard>,
}

impl MountedIframe {
    pub fn iframe(&self) -> &HtmlIFrameElement {
        &self.iframe
    }

    /// How the iframe was obtained
    pub fn action(&self) -> UpsertAction {
        self.action
    }

    /// False when no mount target was given and the caller must insert it
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Unregister the listeners now and hand back the iframe
    pub fn dispose(self) -> HtmlIFrameElement {
        self.message_listener.dispose();
        if let Some(listener) = self.load_listener {
            listener.dispose();
        }
        self.iframe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_target_from_id() {
        assert!(matches!(MountTarget::from("checkout"), MountTarget::Id(id) if id == "checkout"));
        assert!(matches!(
            MountTarget::from("checkout".to_string()),
            MountTarget::Id(id) if id == "checkout"
        ));
    }

    #[test]
    fn test_payment_element_debug_hides_callback() {
        let element = PaymentElement::new(Some("checkout".into())).with_on_load(|_| {});
        let debug = format!("{:?}", element);
        assert!(debug.contains("on_load: true"));
    }
}
