//! # Modal Lifecycle
//!
//! `Closed -> Open -> Closing -> Closed`, independent of the DOM.
//!
//! Closing is timed: the exit animation runs, then the modal is detached.
//! The lifecycle owns the single pending close timer, generic over the
//! timer handle type, so a second close or a re-open cancels the first
//! timer instead of stacking another one.

use serde::{Deserialize, Serialize};

/// Element id of the modal root; regions use it as a prefix
pub const MODAL_ID: &str = "paper-js-sdk-modal";

/// Permissions granted to the verification iframe
pub const MODAL_IFRAME_ALLOW: &str = "camera; microphone; payment";

/// Ids of the modal subtree
pub fn region_id(region: &str) -> String {
    format!("{}-{}", MODAL_ID, region)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalState {
    Closed,
    Open,
    Closing,
}

/// Modal state plus the pending close timer, if any
#[derive(Debug)]
pub struct ModalLifecycle<H> {
    state: ModalState,
    pending_close: Option<H>,
}

impl<H> Default for ModalLifecycle<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ModalLifecycle<H> {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
            pending_close: None,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    pub fn has_pending_close(&self) -> bool {
        self.pending_close.is_some()
    }

    /// Enter `Open`. A pending close is handed back for cancellation.
    pub fn open(&mut self) -> Option<H> {
        self.state = ModalState::Open;
        self.pending_close.take()
    }

    /// Enter `Closing` and arm a close timer from `schedule`.
    ///
    /// Any previously armed timer is passed to `cancel` first. Returns false
    /// (scheduling nothing) when the modal is already closed.
    pub fn begin_close(
        &mut self,
        cancel: impl FnOnce(H),
        schedule: impl FnOnce() -> H,
    ) -> bool {
        if self.state == ModalState::Closed {
            return false;
        }
        if let Some(previous) = self.pending_close.take() {
            cancel(previous);
        }
        self.state = ModalState::Closing;
        self.pending_close = Some(schedule());
        true
    }

    /// Timer fired: enter `Closed`. Returns true when the caller should
    /// detach the modal; false for a timer that no longer applies.
    pub fn finish_close(&mut self) -> bool {
        if self.state != ModalState::Closing {
            return false;
        }
        self.state = ModalState::Closed;
        self.pending_close = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut lifecycle = ModalLifecycle::<u32>::new();
        assert_eq!(lifecycle.state(), ModalState::Closed);

        assert_eq!(lifecycle.open(), None);
        assert!(lifecycle.is_open());

        assert!(lifecycle.begin_close(|_| panic!("nothing to cancel"), || 1));
        assert_eq!(lifecycle.state(), ModalState::Closing);
        assert!(lifecycle.has_pending_close());

        assert!(lifecycle.finish_close());
        assert_eq!(lifecycle.state(), ModalState::Closed);
        assert!(!lifecycle.has_pending_close());
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let mut lifecycle = ModalLifecycle::<u32>::new();
        let scheduled = lifecycle.begin_close(|_| {}, || panic!("must not schedule"));
        assert!(!scheduled);
        assert!(!lifecycle.finish_close());
    }

    #[test]
    fn test_reentrant_close_cancels_previous_timer() {
        let mut lifecycle = ModalLifecycle::<u32>::new();
        lifecycle.open();

        let mut cancelled = Vec::new();
        lifecycle.begin_close(|h| cancelled.push(h), || 1);
        lifecycle.begin_close(|h| cancelled.push(h), || 2);

        assert_eq!(cancelled, vec![1]);
        assert!(lifecycle.finish_close());
        assert!(!lifecycle.finish_close());
    }

    #[test]
    fn test_reopen_during_closing_returns_timer() {
        let mut lifecycle = ModalLifecycle::<u32>::new();
        lifecycle.open();
        lifecycle.begin_close(|_| {}, || 7);

        assert_eq!(lifecycle.open(), Some(7));
        assert!(lifecycle.is_open());
        // A stale timer firing after the re-open must not detach
        assert!(!lifecycle.finish_close());
    }

    #[test]
    fn test_region_ids() {
        assert_eq!(region_id("overlay"), "paper-js-sdk-modal-overlay");
        assert_eq!(region_id("iframe"), "paper-js-sdk-modal-iframe");
    }
}
