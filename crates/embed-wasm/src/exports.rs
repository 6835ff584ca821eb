//! JavaScript-facing API.
//!
//! Mirrors the options-object style of the JS SDK:
//!
//! ```javascript
//! const checkout = createCheckoutWithCardElement({
//!   sdkClientSecret: secret,
//!   elementOrId: "checkout-container",
//!   locale: "en",
//!   options: { primaryColor: "#fff" },
//!   onPaymentSuccess: ({ id }) => console.log(id),
//!   onError: ({ code, error }) => console.error(code, error),
//! });
//! // later
//! checkout.dispose();
//! ```
//!
//! `onOpenKycModal` and `onCloseKycModal` are given together or not at all;
//! without them a built-in verification modal is used.

use crate::checkout::{create_checkout_with_card_element, CheckoutWithCardArgs};
use crate::dom::{to_js, to_js_error};
use crate::element::{MountTarget, MountedIframe};
use crate::modal::Modal;
use embed_core::{
    build_checkout_link, CheckoutLinkArgs, EmbedConfig, EmbedError, EmbedResult, ModalState,
    ModalStylesOverride, RelayCallbacks,
};
use serde::Serialize;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlIFrameElement};

fn parse_link_args(options: &JsValue) -> Result<CheckoutLinkArgs, JsValue> {
    serde_wasm_bindgen::from_value(options.clone())
        .map_err(|e| to_js_error(EmbedError::Serialization(format!("Invalid checkout options: {}", e))))
}

fn js_function(options: &JsValue, name: &str) -> Option<js_sys::Function> {
    js_sys::Reflect::get(options, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
}

fn mount_target(options: &JsValue) -> Result<Option<MountTarget>, JsValue> {
    let value = js_sys::Reflect::get(options, &JsValue::from_str("elementOrId"))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    if let Some(id) = value.as_string() {
        return Ok(Some(MountTarget::Id(id)));
    }
    value
        .dyn_into::<HtmlElement>()
        .map(|element| Some(MountTarget::Element(element)))
        .map_err(|_| {
            to_js_error(EmbedError::Dom(
                "elementOrId must be an element id or an HTMLElement".to_string(),
            ))
        })
}

/// Call a JS callback with a serialized payload, logging failures
fn call_with<T: Serialize>(f: &js_sys::Function, name: &str, payload: &T) {
    let result = to_js(payload)
        .map_err(to_js_error)
        .and_then(|arg| f.call1(&JsValue::NULL, &arg));
    if let Err(e) = result {
        warn!("{} callback failed: {:?}", name, e);
    }
}

/// The modal callbacks come as a pair: both (host renders the modal) or
/// neither (built-in modal)
fn modal_callback_pair<F>(open: Option<F>, close: Option<F>) -> EmbedResult<Option<(F, F)>> {
    match (open, close) {
        (Some(open), Some(close)) => Ok(Some((open, close))),
        (None, None) => Ok(None),
        (Some(_), None) => Err(EmbedError::Configuration(
            "onOpenKycModal was given without onCloseKycModal".to_string(),
        )),
        (None, Some(_)) => Err(EmbedError::Configuration(
            "onCloseKycModal was given without onOpenKycModal".to_string(),
        )),
    }
}

fn js_callbacks(options: &JsValue) -> Result<RelayCallbacks, JsValue> {
    let pair = modal_callback_pair(
        js_function(options, "onOpenKycModal"),
        js_function(options, "onCloseKycModal"),
    )
    .map_err(to_js_error)?;

    let mut callbacks = match pair {
        Some((open, close)) => RelayCallbacks::new(
            move |request| call_with(&open, "onOpenKycModal", &request),
            move || {
                if let Err(e) = close.call0(&JsValue::NULL) {
                    warn!("onCloseKycModal callback failed: {:?}", e);
                }
            },
        ),
        None => Modal::new(None, None)
            .map_err(to_js_error)?
            .verification_callbacks(),
    };

    if let Some(f) = js_function(options, "onError") {
        callbacks = callbacks.with_on_error(move |error| call_with(&f, "onError", &error));
    }
    if let Some(f) = js_function(options, "onPaymentSuccess") {
        callbacks =
            callbacks.with_on_payment_success(move |payment| call_with(&f, "onPaymentSuccess", &payment));
    }
    if let Some(f) = js_function(options, "onReview") {
        callbacks = callbacks.with_on_review(move |review| call_with(&f, "onReview", &review));
    }
    Ok(callbacks)
}

/// Build the checkout link from an options object
#[wasm_bindgen(js_name = createCheckoutWithCardLink)]
pub fn create_checkout_with_card_link_js(options: JsValue) -> Result<String, JsValue> {
    let args = parse_link_args(&options)?;
    build_checkout_link(&EmbedConfig::default(), &args)
        .map(String::from)
        .map_err(to_js_error)
}

/// Mounted checkout returned to JavaScript
#[wasm_bindgen]
pub struct CheckoutWithCardHandle {
    mounted: Option<MountedIframe>,
}

#[wasm_bindgen]
impl CheckoutWithCardHandle {
    /// The checkout iframe, until disposed
    #[wasm_bindgen(getter)]
    pub fn iframe(&self) -> Option<HtmlIFrameElement> {
        self.mounted.as_ref().map(|m| m.iframe().clone())
    }

    /// Stop relaying messages; the iframe stays in the page
    pub fn dispose(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            mounted.dispose();
        }
    }
}

/// Mount the checkout iframe and relay its messages to the callbacks in
/// `options`
#[wasm_bindgen(js_name = createCheckoutWithCardElement)]
pub fn create_checkout_with_card_element_js(
    options: JsValue,
) -> Result<CheckoutWithCardHandle, JsValue> {
    let link = parse_link_args(&options)?;
    let mut args = CheckoutWithCardArgs::new(link, js_callbacks(&options)?);

    if let Some(mount) = mount_target(&options)? {
        args = args.mount(mount);
    }
    if let Some(on_load) = js_function(&options, "onLoad") {
        args = args.on_load(move |event| {
            if let Err(e) = on_load.call1(&JsValue::NULL, &event) {
                warn!("onLoad callback failed: {:?}", e);
            }
        });
    }

    let mounted = create_checkout_with_card_element(args).map_err(to_js_error)?;
    Ok(CheckoutWithCardHandle {
        mounted: Some(mounted),
    })
}

/// Verification modal exposed to JavaScript
#[wasm_bindgen(js_name = VerificationModal)]
pub struct JsModal {
    modal: Modal,
}

#[wasm_bindgen(js_class = VerificationModal)]
impl JsModal {
    /// `styles` is an optional `{ main?, overlay?, body?, iframe? }` override
    #[wasm_bindgen(constructor)]
    pub fn new(container: Option<HtmlElement>, styles: JsValue) -> Result<JsModal, JsValue> {
        let overrides: Option<ModalStylesOverride> = if styles.is_undefined() || styles.is_null() {
            None
        } else {
            Some(serde_wasm_bindgen::from_value(styles).map_err(|e| {
                to_js_error(EmbedError::Serialization(format!("Invalid modal styles: {}", e)))
            })?)
        };
        let modal = Modal::new(container, overrides.as_ref()).map_err(to_js_error)?;
        Ok(JsModal { modal })
    }

    pub fn open(&self, iframe_url: Option<String>) -> Result<(), JsValue> {
        self.modal.open(iframe_url.as_deref()).map_err(to_js_error)
    }

    pub fn close(&self) -> Result<(), JsValue> {
        self.modal.close().map_err(to_js_error)
    }

    /// `"closed"`, `"open"` or `"closing"`
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        match self.modal.state() {
            ModalState::Closed => "closed",
            ModalState::Open => "open",
            ModalState::Closing => "closing",
        }
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_callbacks_both_or_neither() {
        assert_eq!(modal_callback_pair(Some("open"), Some("close")).unwrap(), Some(("open", "close")));
        assert_eq!(modal_callback_pair::<&str>(None, None).unwrap(), None);
    }

    #[test]
    fn test_lone_modal_callback_rejected() {
        let err = modal_callback_pair(Some("open"), None).unwrap_err();
        assert!(matches!(&err, EmbedError::Configuration(msg) if msg.contains("onCloseKycModal")));

        let err = modal_callback_pair(None, Some("close")).unwrap_err();
        assert!(matches!(&err, EmbedError::Configuration(msg) if msg.contains("onOpenKycModal")));
    }
}
