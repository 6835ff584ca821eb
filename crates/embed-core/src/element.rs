//! # Payment Element
//!
//! DOM-independent parts of the checkout iframe widget: its fixed id and
//! the create-or-reuse decision made when the widget is mounted again.

/// Element id of the checkout-with-card iframe
pub const CHECKOUT_WITH_CARD_IFRAME_ID: &str = "checkout-with-card-iframe";

/// What to do with the mount target when (re)creating the iframe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    /// No iframe with the id yet: append a new one
    Append,
    /// Existing iframe already shows the link
    Reuse,
    /// Existing iframe must be pointed at the new link
    Retarget,
}

/// Decide how to mount, given the `src` of an existing iframe with the
/// widget id (if any) and the link to show
pub fn plan_iframe_upsert(existing_src: Option<&str>, link: &str) -> UpsertAction {
    match existing_src {
        None => UpsertAction::Append,
        Some(src) if src == link => UpsertAction::Reuse,
        Some(_) => UpsertAction::Retarget,
    }
}
