//! # Checkout With Card
//!
//! Entry point composing the link builder, the payment element and the
//! message relay.

use crate::element::{LoadCallback, MountTarget, MountedIframe, PaymentElement};
use crate::relay::IframeRelay;
use embed_core::{
    build_checkout_link, CheckoutLinkArgs, EmbedConfig, EmbedResult, MessageRelay, RelayHandler,
    CHECKOUT_WITH_CARD_IFRAME_ID,
};
use std::rc::Rc;
use tracing::info;
use url::Url;
use web_sys::Event;

/// Everything needed to mount the checkout-with-card iframe
pub struct CheckoutWithCardArgs<H: RelayHandler> {
    pub link: CheckoutLinkArgs,
    pub handler: H,
    pub mount: Option<MountTarget>,
    pub on_load: Option<LoadCallback>,
    pub config: EmbedConfig,
}

impl<H: RelayHandler + 'static> CheckoutWithCardArgs<H> {
    pub fn new(link: CheckoutLinkArgs, handler: H) -> Self {
        Self {
            link,
            handler,
            mount: None,
            on_load: None,
            config: EmbedConfig::default(),
        }
    }

    /// Builder: mount target (element or element id)
    pub fn mount(mut self, mount: impl Into<MountTarget>) -> Self {
        self.mount = Some(mount.into());
        self
    }

    /// Builder: iframe load callback
    pub fn on_load(mut self, on_load: impl Fn(Event) + 'static) -> Self {
        self.on_load = Some(Rc::new(on_load));
        self
    }

    /// Builder: SDK configuration
    pub fn config(mut self, config: EmbedConfig) -> Self {
        self.config = config;
        self
    }
}

/// Build the checkout-with-card URL
pub fn create_checkout_with_card_link(
    config: &EmbedConfig,
    args: &CheckoutLinkArgs,
) -> EmbedResult<Url> {
    build_checkout_link(config, args)
}

/// Create (or update) the checkout iframe and start relaying its messages.
///
/// The returned handle owns the window `message` listener; keep it alive
/// for as long as the checkout is on the page.
pub fn create_checkout_with_card_element<H: RelayHandler + 'static>(
    args: CheckoutWithCardArgs<H>,
) -> EmbedResult<MountedIframe> {
    let CheckoutWithCardArgs {
        link,
        handler,
        mount,
        on_load,
        config,
    } = args;

    let url = create_checkout_with_card_link(&config, &link)?;
    let relay = MessageRelay::for_config(&config, link.use_alt_domain)?;

    let mut element = PaymentElement::new(mount);
    if let Some(on_load) = on_load {
        element = element.with_on_load_rc(on_load);
    }

    let mounted = element.create(url.as_str(), CHECKOUT_WITH_CARD_IFRAME_ID, relay, move |iframe| {
        IframeRelay::new(iframe, handler)
    })?;

    info!(
        "Checkout with card mounted ({:?}, origin {})",
        mounted.action(),
        config.domain(link.use_alt_domain)
    );
    Ok(mounted)
}
