//! # embed-core
//!
//! Core types for embedding the hosted checkout-with-card flow.
//!
//! This crate provides:
//! - `build_checkout_link` and `CheckoutLinkArgs` for the iframe URL
//! - `InboundMessage` and the callback payload types
//! - `MessageRelay`, `RelayHandler` and `RelayCallbacks` for message dispatch
//! - `ModalLifecycle` and `ModalStyles` for the verification modal
//! - `EmbedConfig` and `EmbedError`
//!
//! Nothing here touches the DOM; the browser bindings live in `embed-wasm`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use embed_core::{build_checkout_link, CheckoutLinkArgs, EmbedConfig, Locale, MessageRelay};
//!
//! let config = EmbedConfig::default();
//! let args = CheckoutLinkArgs::new(client_secret).with_locale(Locale::Fr);
//! let url = build_checkout_link(&config, &args)?;
//!
//! let relay = MessageRelay::for_config(&config, args.use_alt_domain)?;
//! relay.handle(&event_origin, &event_data, &callbacks);
//! ```

pub mod config;
pub mod element;
pub mod error;
pub mod link;
pub mod message;
pub mod modal;
pub mod relay;
pub mod style;

// Re-exports for convenience
pub use config::EmbedConfig;
pub use element::{plan_iframe_upsert, UpsertAction, CHECKOUT_WITH_CARD_IFRAME_ID};
pub use error::{EmbedError, EmbedResult};
pub use link::{build_checkout_link, CheckoutLink, CheckoutLinkArgs, Locale};
pub use message::{CheckoutError, InboundMessage, PaymentSuccess, ReviewResult, VerificationModal};
pub use modal::{ModalLifecycle, ModalState, MODAL_ID};
pub use relay::{
    dispatch_effect, route_effect, MessageRelay, RelayCallbacks, RelayEffect, RelayHandler,
};
pub use style::{ModalStyles, ModalStylesOverride, StyleObject, StyleOptions};
