//! # embed-wasm
//!
//! Browser bindings for card-embed-rs.
//!
//! This crate provides:
//! - `create_checkout_with_card_element`: mounts the hosted checkout iframe
//!   and relays its messages to host callbacks
//! - `PaymentElement`: create-or-reuse of the checkout iframe
//! - `Modal`: overlay hosting the verification iframe
//! - `ListenerGuard`: DOM listeners that unregister on drop
//! - JavaScript exports (`createCheckoutWithCardElement`,
//!   `createCheckoutWithCardLink`, `VerificationModal`)
//!
//! ## Usage (Rust)
//!
//! ```rust,ignore
//! use embed_core::{CheckoutLinkArgs, RelayCallbacks};
//! use embed_wasm::{create_checkout_with_card_element, CheckoutWithCardArgs, Modal};
//!
//! let modal = Modal::new(None, None)?;
//! let callbacks = modal
//!     .verification_callbacks()
//!     .with_on_payment_success(|p| tracing::info!("paid: {}", p.id));
//!
//! let checkout = create_checkout_with_card_element(
//!     CheckoutWithCardArgs::new(CheckoutLinkArgs::new(secret), callbacks).mount("checkout"),
//! )?;
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build crates/embed-wasm --target web
//! ```

pub mod checkout;
mod dom;
pub mod element;
pub mod exports;
pub mod listener;
pub mod modal;
pub mod relay;

pub use checkout::{
    create_checkout_with_card_element, create_checkout_with_card_link, CheckoutWithCardArgs,
};
pub use element::{MountTarget, MountedIframe, PaymentElement};
pub use listener::ListenerGuard;
pub use modal::Modal;
pub use relay::{listen_for_messages, post_message_to_iframe, set_iframe_height, IframeRelay};

use wasm_bindgen::prelude::*;

/// Initialize the WASM module (called automatically)
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Send tracing events to the browser console; a host that installed
    // its own subscriber keeps it
    #[cfg(target_arch = "wasm32")]
    let _ = tracing_wasm::try_set_as_global_default();
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
