//! # Iframe Messages
//!
//! Schema of the messages posted by the hosted checkout to the host window,
//! and the payloads handed to host callbacks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event type tags, as they appear in the `eventType` field
pub mod event_type {
    pub const CHECKOUT_WITH_CARD_ERROR: &str = "checkoutWithCardError";
    pub const PAYMENT_SUCCESS: &str = "paymentSuccess";
    pub const REVIEW_COMPLETE: &str = "reviewComplete";
    pub const OPEN_MODAL_WITH_URL: &str = "openModalWithUrl";
    pub const COMPLETED_SDK_MODAL: &str = "completedSDKModal";
    pub const SIZING: &str = "sizing";
}

/// A message received from the checkout iframe
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "eventType")]
pub enum InboundMessage {
    #[serde(rename = "checkoutWithCardError")]
    CheckoutWithCardError { code: String, error: String },

    #[serde(rename = "paymentSuccess")]
    PaymentSuccess { id: String },

    #[serde(rename = "reviewComplete")]
    ReviewComplete {
        id: String,
        #[serde(rename = "cardholderName")]
        cardholder_name: String,
    },

    #[serde(rename = "openModalWithUrl")]
    OpenModalWithUrl { url: String },

    /// The verification flow finished; `postToIframe` asks for the message
    /// to be echoed back into the checkout iframe
    #[serde(rename = "completedSDKModal")]
    CompletedSdkModal {
        #[serde(rename = "postToIframe", default, deserialize_with = "truthy")]
        post_to_iframe: bool,
    },

    #[serde(rename = "sizing")]
    Sizing { height: f64 },

    #[serde(other)]
    Unknown,
}

impl InboundMessage {
    /// Decode a message. Returns `None` for anything that is not an object
    /// carrying a known `eventType` with its required fields.
    pub fn parse(data: &Value) -> Option<Self> {
        match serde_json::from_value::<InboundMessage>(data.clone()) {
            Ok(InboundMessage::Unknown) => None,
            Ok(message) => Some(message),
            Err(e) => {
                tracing::trace!("Dropping undecodable message: {}", e);
                None
            }
        }
    }

    pub fn event_type(&self) -> Option<&'static str> {
        match self {
            InboundMessage::CheckoutWithCardError { .. } => {
                Some(event_type::CHECKOUT_WITH_CARD_ERROR)
            }
            InboundMessage::PaymentSuccess { .. } => Some(event_type::PAYMENT_SUCCESS),
            InboundMessage::ReviewComplete { .. } => Some(event_type::REVIEW_COMPLETE),
            InboundMessage::OpenModalWithUrl { .. } => Some(event_type::OPEN_MODAL_WITH_URL),
            InboundMessage::CompletedSdkModal { .. } => Some(event_type::COMPLETED_SDK_MODAL),
            InboundMessage::Sizing { .. } => Some(event_type::SIZING),
            InboundMessage::Unknown => None,
        }
    }
}

/// JavaScript truthiness for the `postToIframe` flag
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map_or(false, |n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

// =============================================================================
// Callback payloads
// =============================================================================

/// Error reported by the hosted checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutError {
    pub code: String,
    pub error: String,
}

/// Payment completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSuccess {
    pub id: String,
}

/// Card details reviewed by the buyer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    pub id: String,
    pub cardholder_name: String,
}

/// Request to show the verification modal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationModal {
    pub iframe_link: String,
}
