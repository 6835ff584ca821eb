//! DOM helpers shared by the widgets.

use embed_core::{EmbedError, EmbedResult, StyleObject};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsError, JsValue};
use web_sys::{Document, HtmlElement, Window};

pub(crate) fn window() -> EmbedResult<Window> {
    web_sys::window().ok_or_else(|| EmbedError::Dom("no global window".to_string()))
}

pub(crate) fn document() -> EmbedResult<Document> {
    window()?
        .document()
        .ok_or_else(|| EmbedError::Dom("window has no document".to_string()))
}

pub(crate) fn document_body() -> EmbedResult<HtmlElement> {
    document()?
        .body()
        .ok_or_else(|| EmbedError::Dom("document has no body".to_string()))
}

/// Map a thrown JS value to an `EmbedError`
pub(crate) fn js_err(err: JsValue) -> EmbedError {
    let message = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));
    EmbedError::Dom(message)
}

/// Create an element and cast it to its concrete type
pub(crate) fn create<T: JsCast>(document: &Document, tag: &str) -> EmbedResult<T> {
    document
        .create_element(tag)
        .map_err(js_err)?
        .dyn_into::<T>()
        .map_err(|_| EmbedError::Dom(format!("<{}> has an unexpected element type", tag)))
}

/// Set every declaration of `styles` on the element's inline style
pub(crate) fn apply_styles(element: &HtmlElement, styles: &StyleObject) -> EmbedResult<()> {
    let style = element.style();
    for (property, value) in styles.iter() {
        style.set_property(property, value).map_err(js_err)?;
    }
    Ok(())
}

/// Serialize to a plain JS value (objects, not `Map`s)
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> EmbedResult<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| EmbedError::Serialization(e.to_string()))
}

/// Convert an error for the JavaScript boundary
pub(crate) fn to_js_error(err: EmbedError) -> JsValue {
    JsError::new(&err.to_string()).into()
}
