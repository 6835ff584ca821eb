//! # Message Relay
//!
//! Turns messages posted by the checkout iframe into typed effects and
//! hands them to a [`RelayHandler`].
//!
//! Every observable outcome, including the iframe resize and the echo back
//! into the iframe, is a [`RelayEffect`] and passes through
//! [`RelayHandler::on_effect`], so host code can intercept all of them in
//! one place. Messages from any origin other than the configured one are
//! dropped before decoding.

use crate::config::EmbedConfig;
use crate::error::EmbedResult;
use crate::message::{
    CheckoutError, InboundMessage, PaymentSuccess, ReviewResult, VerificationModal,
};
use serde_json::Value;
use std::fmt;
use tracing::{debug, trace};

/// An effect produced by a single inbound message
#[derive(Debug, Clone, PartialEq)]
pub enum RelayEffect {
    Error(CheckoutError),
    PaymentSuccess(PaymentSuccess),
    ReviewComplete(ReviewResult),
    OpenVerificationModal(VerificationModal),
    CloseVerificationModal,
    /// Re-post this payload into the checkout iframe
    ForwardToIframe(Value),
    /// Set the checkout iframe height, in CSS pixels
    Resize { height_px: f64 },
}

/// Receiver of relay effects
///
/// Override `on_effect` to observe every effect, or the per-kind methods to
/// handle only some of them. Unhandled kinds are logged and dropped.
#[allow(unused_variables)]
pub trait RelayHandler {
    /// Entry point for every effect
    fn on_effect(&self, effect: RelayEffect) {
        route_effect(self, effect);
    }

    fn on_error(&self, error: CheckoutError) {
        debug!("Unhandled checkout error: code={}", error.code);
    }

    fn on_payment_success(&self, payment: PaymentSuccess) {
        debug!("Unhandled payment success: id={}", payment.id);
    }

    fn on_review(&self, review: ReviewResult) {
        debug!("Unhandled review: id={}", review.id);
    }

    fn on_open_verification_modal(&self, modal: VerificationModal) {
        debug!("Unhandled verification modal request");
    }

    fn on_close_verification_modal(&self) {
        debug!("Unhandled verification modal close");
    }

    fn forward_to_iframe(&self, payload: Value) {
        debug!("No iframe bound, dropping forwarded message");
    }

    fn resize(&self, height_px: f64) {
        debug!("No iframe bound, dropping resize to {}px", height_px);
    }
}

/// Route an effect to the matching per-kind method of `handler`
pub fn route_effect<H: RelayHandler + ?Sized>(handler: &H, effect: RelayEffect) {
    match effect {
        RelayEffect::Error(error) => handler.on_error(error),
        RelayEffect::PaymentSuccess(payment) => handler.on_payment_success(payment),
        RelayEffect::ReviewComplete(review) => handler.on_review(review),
        RelayEffect::OpenVerificationModal(modal) => handler.on_open_verification_modal(modal),
        RelayEffect::CloseVerificationModal => handler.on_close_verification_modal(),
        RelayEffect::ForwardToIframe(payload) => handler.forward_to_iframe(payload),
        RelayEffect::Resize { height_px } => handler.resize(height_px),
    }
}

/// Dispatch an effect to a handler
pub fn dispatch_effect(handler: &dyn RelayHandler, effect: RelayEffect) {
    handler.on_effect(effect);
}

/// Origin-checked translator from raw messages to effects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRelay {
    expected_origin: String,
}

impl MessageRelay {
    /// Accept messages only from `expected_origin` (`scheme://host[:port]`)
    pub fn new(expected_origin: impl Into<String>) -> Self {
        Self {
            expected_origin: expected_origin.into(),
        }
    }

    /// Relay for the configured checkout domain
    pub fn for_config(config: &EmbedConfig, use_alt_domain: bool) -> EmbedResult<Self> {
        Ok(Self::new(config.origin(use_alt_domain)?))
    }

    pub fn expected_origin(&self) -> &str {
        &self.expected_origin
    }

    pub fn accepts(&self, origin: &str) -> bool {
        origin == self.expected_origin
    }

    /// Effects for one message, in the order they must be applied.
    /// Empty for foreign origins, unknown event types and malformed data.
    pub fn translate(&self, origin: &str, data: &Value) -> Vec<RelayEffect> {
        if !self.accepts(origin) {
            trace!("Ignoring message from foreign origin {}", origin);
            return Vec::new();
        }

        let Some(message) = InboundMessage::parse(data) else {
            return Vec::new();
        };

        match message {
            InboundMessage::CheckoutWithCardError { code, error } => {
                vec![RelayEffect::Error(CheckoutError { code, error })]
            }
            InboundMessage::PaymentSuccess { id } => {
                vec![RelayEffect::PaymentSuccess(PaymentSuccess { id })]
            }
            InboundMessage::ReviewComplete {
                id,
                cardholder_name,
            } => vec![RelayEffect::ReviewComplete(ReviewResult {
                id,
                cardholder_name,
            })],
            InboundMessage::OpenModalWithUrl { url } => {
                vec![RelayEffect::OpenVerificationModal(VerificationModal {
                    iframe_link: url,
                })]
            }
            InboundMessage::CompletedSdkModal { post_to_iframe } => {
                let mut effects = vec![RelayEffect::CloseVerificationModal];
                if post_to_iframe {
                    effects.push(RelayEffect::ForwardToIframe(data.clone()));
                }
                effects
            }
            InboundMessage::Sizing { height } => vec![RelayEffect::Resize { height_px: height }],
            InboundMessage::Unknown => Vec::new(),
        }
    }

    /// Translate a message and dispatch its effects. Returns the number of
    /// effects dispatched.
    pub fn handle(&self, origin: &str, data: &Value, handler: &dyn RelayHandler) -> usize {
        let effects = self.translate(origin, data);
        let count = effects.len();
        for effect in effects {
            dispatch_effect(handler, effect);
        }
        count
    }
}

// =============================================================================
// Callback-backed handler
// =============================================================================

/// Boxed host callback
pub type Callback<T> = Box<dyn Fn(T)>;

/// Host callbacks for relay effects
///
/// Error, success and review callbacks are optional and silently skipped
/// when absent. The verification modal callbacks are always invoked.
/// Resize and forward effects need an iframe and are left to the binding
/// layer.
pub struct RelayCallbacks {
    on_error: Option<Callback<CheckoutError>>,
    on_payment_success: Option<Callback<PaymentSuccess>>,
    on_review: Option<Callback<ReviewResult>>,
    on_open_verification_modal: Callback<VerificationModal>,
    on_close_verification_modal: Box<dyn Fn()>,
}

impl RelayCallbacks {
    pub fn new(
        on_open_verification_modal: impl Fn(VerificationModal) + 'static,
        on_close_verification_modal: impl Fn() + 'static,
    ) -> Self {
        Self {
            on_error: None,
            on_payment_success: None,
            on_review: None,
            on_open_verification_modal: Box::new(on_open_verification_modal),
            on_close_verification_modal: Box::new(on_close_verification_modal),
        }
    }

    /// Builder: error callback
    pub fn with_on_error(mut self, f: impl Fn(CheckoutError) + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    /// Builder: payment success callback
    pub fn with_on_payment_success(mut self, f: impl Fn(PaymentSuccess) + 'static) -> Self {
        self.on_payment_success = Some(Box::new(f));
        self
    }

    /// Builder: review callback
    pub fn with_on_review(mut self, f: impl Fn(ReviewResult) + 'static) -> Self {
        self.on_review = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for RelayCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayCallbacks")
            .field("on_error", &self.on_error.is_some())
            .field("on_payment_success", &self.on_payment_success.is_some())
            .field("on_review", &self.on_review.is_some())
            .finish_non_exhaustive()
    }
}

impl RelayHandler for RelayCallbacks {
    fn on_error(&self, error: CheckoutError) {
        if let Some(f) = &self.on_error {
            f(error);
        }
    }

    fn on_payment_success(&self, payment: PaymentSuccess) {
        if let Some(f) = &self.on_payment_success {
            f(payment);
        }
    }

    fn on_review(&self, review: ReviewResult) {
        if let Some(f) = &self.on_review {
            f(review);
        }
    }

    fn on_open_verification_modal(&self, modal: VerificationModal) {
        (self.on_open_verification_modal)(modal);
    }

    fn on_close_verification_modal(&self) {
        (self.on_close_verification_modal)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    const ORIGIN: &str = "https://papercheckout.com";

    fn relay() -> MessageRelay {
        MessageRelay::for_config(&EmbedConfig::default(), true).unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        effects: RefCell<Vec<RelayEffect>>,
    }

    impl RelayHandler for Recorder {
        fn on_effect(&self, effect: RelayEffect) {
            self.effects.borrow_mut().push(effect);
        }
    }

    #[test]
    fn test_origin_from_config() {
        assert_eq!(relay().expected_origin(), ORIGIN);
        let primary = MessageRelay::for_config(&EmbedConfig::default(), false).unwrap();
        assert_eq!(primary.expected_origin(), "https://paper.xyz");
    }

    #[test]
    fn test_foreign_origin_dropped() {
        let data = json!({ "eventType": "paymentSuccess", "id": "abc" });
        let recorder = Recorder::default();

        assert_eq!(relay().handle("https://evil.example", &data, &recorder), 0);
        assert_eq!(relay().handle("https://paper.xyz", &data, &recorder), 0);
        assert!(recorder.effects.borrow().is_empty());

        assert_eq!(relay().handle(ORIGIN, &data, &recorder), 1);
    }

    #[test]
    fn test_payment_success_callback_once() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let callbacks = RelayCallbacks::new(|_| {}, || {})
            .with_on_payment_success(move |p| sink.borrow_mut().push(p));

        relay().handle(
            ORIGIN,
            &json!({ "eventType": "paymentSuccess", "id": "abc" }),
            &callbacks,
        );

        assert_eq!(*calls.borrow(), vec![PaymentSuccess { id: "abc".into() }]);
    }

    #[test]
    fn test_error_and_review_payloads() {
        let effects = relay().translate(
            ORIGIN,
            &json!({ "eventType": "checkoutWithCardError", "code": "card_declined", "error": "Declined" }),
        );
        assert_eq!(
            effects,
            vec![RelayEffect::Error(CheckoutError {
                code: "card_declined".into(),
                error: "Declined".into()
            })]
        );

        let effects = relay().translate(
            ORIGIN,
            &json!({ "eventType": "reviewComplete", "id": "r1", "cardholderName": "Ada" }),
        );
        assert_eq!(
            effects,
            vec![RelayEffect::ReviewComplete(ReviewResult {
                id: "r1".into(),
                cardholder_name: "Ada".into()
            })]
        );
    }

    #[test]
    fn test_missing_optional_callbacks_skipped() {
        let callbacks = RelayCallbacks::new(|_| {}, || {});
        let n = relay().handle(
            ORIGIN,
            &json!({ "eventType": "checkoutWithCardError", "code": "x", "error": "y" }),
            &callbacks,
        );
        assert_eq!(n, 1);
    }

    #[test]
    fn test_open_modal_always_invoked() {
        let opened = Rc::new(RefCell::new(None));
        let sink = opened.clone();
        let callbacks = RelayCallbacks::new(move |m| *sink.borrow_mut() = Some(m), || {});

        relay().handle(
            ORIGIN,
            &json!({ "eventType": "openModalWithUrl", "url": "https://kyc.example.com/s/1" }),
            &callbacks,
        );

        assert_eq!(
            opened.borrow().as_ref().map(|m| m.iframe_link.as_str()),
            Some("https://kyc.example.com/s/1")
        );
    }

    #[test]
    fn test_completed_modal_closes_then_forwards() {
        let data = json!({ "eventType": "completedSDKModal", "postToIframe": true, "result": "ok" });
        assert_eq!(
            relay().translate(ORIGIN, &data),
            vec![
                RelayEffect::CloseVerificationModal,
                RelayEffect::ForwardToIframe(data.clone()),
            ]
        );

        let no_forward = json!({ "eventType": "completedSDKModal" });
        assert_eq!(
            relay().translate(ORIGIN, &no_forward),
            vec![RelayEffect::CloseVerificationModal]
        );
    }

    #[test]
    fn test_close_callback_invoked() {
        let closed = Rc::new(RefCell::new(0));
        let sink = closed.clone();
        let callbacks = RelayCallbacks::new(|_| {}, move || *sink.borrow_mut() += 1);

        relay().handle(ORIGIN, &json!({ "eventType": "completedSDKModal" }), &callbacks);
        assert_eq!(*closed.borrow(), 1);
    }

    #[test]
    fn test_sizing_effect() {
        assert_eq!(
            relay().translate(ORIGIN, &json!({ "eventType": "sizing", "height": 400 })),
            vec![RelayEffect::Resize { height_px: 400.0 }]
        );
    }

    #[test]
    fn test_unknown_event_is_noop() {
        let recorder = Recorder::default();
        let n = relay().handle(ORIGIN, &json!({ "eventType": "heartbeat" }), &recorder);
        assert_eq!(n, 0);
        assert!(recorder.effects.borrow().is_empty());
    }

    #[test]
    fn test_per_kind_override_routes_through_default_on_effect() {
        struct Sizer {
            height: RefCell<Option<f64>>,
        }

        impl RelayHandler for Sizer {
            fn resize(&self, height_px: f64) {
                *self.height.borrow_mut() = Some(height_px);
            }
        }

        let sizer = Sizer {
            height: RefCell::new(None),
        };
        dispatch_effect(&sizer, RelayEffect::Resize { height_px: 512.0 });
        assert_eq!(*sizer.height.borrow(), Some(512.0));
    }
}
