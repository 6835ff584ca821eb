//! # Verification Modal
//!
//! Overlay + dialog body hosting an optional iframe, used for the
//! out-of-band verification step requested by the checkout.
//!
//! Layout: `main > (overlay, <style>, body > iframe?)`, appended to the
//! container (the document body by default) on open and detached once the
//! exit animation has finished on close.

use crate::dom::{apply_styles, create, document, document_body, js_err};
use embed_core::modal::{region_id, MODAL_IFRAME_ALLOW};
use embed_core::style::{MODAL_EXIT_ANIMATION, MODAL_KEYFRAMES};
use embed_core::{
    EmbedConfig, EmbedResult, ModalLifecycle, ModalState, ModalStyles, ModalStylesOverride,
    RelayCallbacks, VerificationModal, MODAL_ID,
};
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};
use web_sys::{HtmlElement, HtmlIFrameElement, HtmlStyleElement};

/// Handle to a modal; clones share the same DOM subtree
#[derive(Clone)]
pub struct Modal {
    inner: Rc<ModalInner>,
}

struct ModalInner {
    container: HtmlElement,
    main: HtmlElement,
    overlay: HtmlElement,
    body: HtmlElement,
    iframe: HtmlIFrameElement,
    style: HtmlStyleElement,
    styles: ModalStyles,
    close_delay_ms: u32,
    lifecycle: RefCell<ModalLifecycle<Timeout>>,
}

impl Modal {
    /// Modal with default config, mounted into `container` or the document body
    pub fn new(
        container: Option<HtmlElement>,
        styles: Option<&ModalStylesOverride>,
    ) -> EmbedResult<Self> {
        Self::with_config(&EmbedConfig::default(), container, styles)
    }

    pub fn with_config(
        config: &EmbedConfig,
        container: Option<HtmlElement>,
        styles: Option<&ModalStylesOverride>,
    ) -> EmbedResult<Self> {
        let document = document()?;
        let container = match container {
            Some(container) => container,
            None => document_body()?,
        };

        let styles = match styles {
            Some(overrides) => ModalStyles::with_overrides(overrides),
            None => ModalStyles::default(),
        };

        let main: HtmlElement = create(&document, "div")?;
        main.set_id(MODAL_ID);
        let overlay: HtmlElement = create(&document, "div")?;
        overlay.set_id(&region_id("overlay"));
        let body: HtmlElement = create(&document, "div")?;
        body.set_id(&region_id("body"));
        let iframe: HtmlIFrameElement = create(&document, "iframe")?;
        iframe.set_id(&region_id("iframe"));
        iframe
            .set_attribute("allow", MODAL_IFRAME_ALLOW)
            .map_err(js_err)?;

        let style: HtmlStyleElement = create(&document, "style")?;
        style.set_text_content(Some(MODAL_KEYFRAMES));

        apply_styles(&main, &styles.main)?;
        apply_styles(&overlay, &styles.overlay)?;
        apply_styles(&body, &styles.body)?;
        apply_styles(&iframe, &styles.iframe)?;

        Ok(Self {
            inner: Rc::new(ModalInner {
                container,
                main,
                overlay,
                body,
                iframe,
                style,
                styles,
                close_delay_ms: config.close_delay_ms,
                lifecycle: RefCell::new(ModalLifecycle::new()),
            }),
        })
    }

    pub fn state(&self) -> ModalState {
        self.inner.lifecycle.borrow().state()
    }

    /// Root element (`#paper-js-sdk-modal`)
    pub fn root(&self) -> &HtmlElement {
        &self.inner.main
    }

    /// Show the modal, loading `iframe_url` into its iframe when given.
    ///
    /// Opening while a close is pending cancels the close.
    pub fn open(&self, iframe_url: Option<&str>) -> EmbedResult<()> {
        let inner = &self.inner;

        if let Some(pending) = inner.lifecycle.borrow_mut().open() {
            drop(pending);
            // Undo the exit animation of the cancelled close
            inner
                .body
                .style()
                .remove_property("animation")
                .map_err(js_err)?;
            apply_styles(&inner.body, &inner.styles.body)?;
        }

        if let Some(url) = iframe_url {
            inner.iframe.set_src(url);
            inner.body.append_child(&inner.iframe).map_err(js_err)?;
        }

        inner.add_accessibility()?;

        inner.main.append_child(&inner.overlay).map_err(js_err)?;
        inner.main.append_child(&inner.style).map_err(js_err)?;
        inner.main.append_child(&inner.body).map_err(js_err)?;
        inner.container.append_child(&inner.main).map_err(js_err)?;

        document_body()?
            .style()
            .set_property("overflow", "hidden")
            .map_err(js_err)?;

        debug!("Verification modal opened");
        Ok(())
    }

    /// Play the exit animation, then detach the modal and restore page
    /// scrolling after the configured delay. No-op when already closed.
    pub fn close(&self) -> EmbedResult<()> {
        let inner = &self.inner;
        let delay = inner.close_delay_ms;

        // Dropping a `Timeout` clears it
        let scheduled = inner
            .lifecycle
            .borrow_mut()
            .begin_close(drop, || schedule_finish(Rc::downgrade(inner), delay));

        if scheduled {
            inner
                .body
                .style()
                .set_property("animation", MODAL_EXIT_ANIMATION)
                .map_err(js_err)?;
            debug!("Verification modal closing in {}ms", delay);
        }
        Ok(())
    }

    /// Relay callbacks that open this modal on `openModalWithUrl` and close
    /// it on `completedSDKModal`
    pub fn verification_callbacks(&self) -> RelayCallbacks {
        let opener = self.clone();
        let closer = self.clone();
        RelayCallbacks::new(
            move |request: VerificationModal| {
                if let Err(e) = opener.open(Some(&request.iframe_link)) {
                    warn!("Failed to open verification modal: {}", e);
                }
            },
            move || {
                if let Err(e) = closer.close() {
                    warn!("Failed to close verification modal: {}", e);
                }
            },
        )
    }
}

fn schedule_finish(modal: Weak<ModalInner>, delay_ms: u32) -> Timeout {
    Timeout::new(delay_ms, move || {
        if let Some(inner) = modal.upgrade() {
            inner.finish_close();
        }
    })
}

impl ModalInner {
    fn finish_close(&self) {
        if !self.lifecycle.borrow_mut().finish_close() {
            return;
        }
        self.main.remove();
        match document_body() {
            Ok(body) => {
                if let Err(e) = body.style().set_property("overflow", "visible") {
                    warn!("Failed to restore page scrolling: {:?}", e);
                }
            }
            Err(e) => warn!("Failed to restore page scrolling: {}", e),
        }
        debug!("Verification modal closed");
    }

    fn add_accessibility(&self) -> EmbedResult<()> {
        self.main.set_attribute("aria-hidden", "true").map_err(js_err)?;
        self.overlay
            .set_attribute("aria-hidden", "true")
            .map_err(js_err)?;
        self.body.set_attribute("aria-modal", "true").map_err(js_err)?;
        self.body.set_attribute("role", "dialog").map_err(js_err)?;
        Ok(())
    }
}
