//! # Style Objects
//!
//! Flat key/value style maps used in two places:
//! - `StyleOptions`: branding options encoded into the checkout link
//! - `StyleObject` / `ModalStyles`: inline CSS applied to the modal regions

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Brand options applied when the caller supplies none
pub const DEFAULT_BRAND_OPTIONS: &[(&str, &str)] = &[
    ("borderRadius", "6"),
    ("primaryColor", "#2563eb"),
    ("textColor", "#1e293b"),
];

/// Inline style of the checkout iframe
pub const PAYMENT_IFRAME_STYLE: &str = "margin-left:auto; margin-right:auto; height:350px; width:100%; transition-property:all; transition-timing-function:cubic-bezier(0.4, 0, 0.2, 1); transition-duration:150ms;";

/// Keyframes referenced by the default modal styles and the close animation
pub const MODAL_KEYFRAMES: &str = "\
@keyframes pew-modal-fadeIn { from { opacity: 0; } to { opacity: 1; } }
@keyframes pew-modal-slideIn { from { opacity: 0; transform: translateY(16px); } to { opacity: 1; transform: translateY(0); } }
@keyframes pew-modal-slideOut { from { opacity: 1; transform: translateY(0); } to { opacity: 0; transform: translateY(16px); } }";

/// Animation applied to the modal body when closing
pub const MODAL_EXIT_ANIMATION: &str = "pew-modal-slideOut 0.2s forwards";

// =============================================================================
// Brand options
// =============================================================================

/// Branding options for the hosted checkout (`primaryColor`, `borderRadius`, ...)
///
/// Values arriving from JavaScript may be numbers or booleans; they are
/// stored in their string form since they end up in a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Value>", into = "BTreeMap<String, String>")]
pub struct StyleOptions {
    values: BTreeMap<String, String>,
}

impl StyleOptions {
    /// Empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// The brand defaults
    pub fn brand_defaults() -> Self {
        DEFAULT_BRAND_OPTIONS.iter().copied().collect()
    }

    /// Builder: set an arbitrary option
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn primary_color(self, color: impl Into<String>) -> Self {
        self.with("primaryColor", color)
    }

    pub fn background_color(self, color: impl Into<String>) -> Self {
        self.with("backgroundColor", color)
    }

    pub fn text_color(self, color: impl Into<String>) -> Self {
        self.with("textColor", color)
    }

    pub fn border_radius(self, radius: u32) -> Self {
        self.with("borderRadius", radius.to_string())
    }

    pub fn input_background_color(self, color: impl Into<String>) -> Self {
        self.with("inputBackgroundColor", color)
    }

    pub fn input_border_color(self, color: impl Into<String>) -> Self {
        self.with("inputBorderColor", color)
    }

    pub fn font_family(self, family: impl Into<String>) -> Self {
        self.with("fontFamily", family)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<StyleOptions> for BTreeMap<String, String> {
    fn from(options: StyleOptions) -> Self {
        options.values
    }
}

impl TryFrom<BTreeMap<String, Value>> for StyleOptions {
    type Error = String;

    fn try_from(raw: BTreeMap<String, Value>) -> Result<Self, Self::Error> {
        let mut values = BTreeMap::new();
        for (key, value) in raw {
            let value = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(format!("style option '{}' must be a scalar value", key));
                }
            };
            values.insert(key, value);
        }
        Ok(Self { values })
    }
}

// =============================================================================
// Inline CSS
// =============================================================================

/// Inline CSS declarations keyed by property name (`background-color`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleObject(BTreeMap<String, String>);

impl StyleObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a declaration
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Shallow merge: declarations in `overrides` replace same-named ones
    pub fn merge(&mut self, overrides: &StyleObject) {
        for (property, value) in overrides.iter() {
            self.set(property, value);
        }
    }

    /// Render as a `style` attribute value
    pub fn to_css_text(&self) -> String {
        self.iter()
            .map(|(property, value)| format!("{}: {};", property, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Styles for the four modal regions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalStyles {
    pub main: StyleObject,
    pub overlay: StyleObject,
    pub body: StyleObject,
    pub iframe: StyleObject,
}

/// Partial override of [`ModalStyles`]; absent regions keep their defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalStylesOverride {
    pub main: Option<StyleObject>,
    pub overlay: Option<StyleObject>,
    pub body: Option<StyleObject>,
    pub iframe: Option<StyleObject>,
}

impl Default for ModalStyles {
    fn default() -> Self {
        Self {
            main: [
                ("position", "fixed"),
                ("inset", "0"),
                ("z-index", "10000"),
                ("display", "flex"),
                ("align-items", "center"),
                ("justify-content", "center"),
            ]
            .into_iter()
            .collect(),
            overlay: [
                ("position", "fixed"),
                ("inset", "0"),
                ("background-color", "rgba(0, 0, 0, 0.5)"),
                ("animation", "pew-modal-fadeIn 0.2s"),
            ]
            .into_iter()
            .collect(),
            body: [
                ("position", "relative"),
                ("width", "100%"),
                ("max-width", "450px"),
                ("max-height", "90vh"),
                ("overflow", "auto"),
                ("border-radius", "12px"),
                ("background-color", "white"),
                ("box-shadow", "0 10px 25px rgba(0, 0, 0, 0.2)"),
                ("animation", "pew-modal-slideIn 0.2s forwards"),
            ]
            .into_iter()
            .collect(),
            iframe: [
                ("display", "block"),
                ("width", "100%"),
                ("height", "700px"),
                ("border", "none"),
            ]
            .into_iter()
            .collect(),
        }
    }
}

impl ModalStyles {
    /// Defaults with `overrides` merged in, region by region
    pub fn with_overrides(overrides: &ModalStylesOverride) -> Self {
        let mut styles = Self::default();
        styles.merge(overrides);
        styles
    }

    /// Shallow per-region merge
    pub fn merge(&mut self, overrides: &ModalStylesOverride) {
        let regions = [
            (&mut self.main, &overrides.main),
            (&mut self.overlay, &overrides.overlay),
            (&mut self.body, &overrides.body),
            (&mut self.iframe, &overrides.iframe),
        ];
        for (region, patch) in regions {
            if let Some(patch) = patch {
                region.merge(patch);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_brand_defaults() {
        let options = StyleOptions::brand_defaults();
        assert_eq!(options.len(), DEFAULT_BRAND_OPTIONS.len());
        assert_eq!(options.get("borderRadius"), Some("6"));
    }

    #[test]
    fn test_style_options_from_js_values() {
        let options: StyleOptions = serde_json::from_value(json!({
            "primaryColor": "#fff",
            "borderRadius": 8,
            "fontFamily": null
        }))
        .unwrap();

        assert_eq!(options.get("primaryColor"), Some("#fff"));
        assert_eq!(options.get("borderRadius"), Some("8"));
        assert_eq!(options.get("fontFamily"), None);
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_style_options_rejects_nested() {
        let result: Result<StyleOptions, _> =
            serde_json::from_value(json!({ "primaryColor": { "light": "#fff" } }));
        assert!(result.is_err());
    }

    #[test]
    fn test_modal_merge_is_shallow_per_region() {
        let overrides = ModalStylesOverride {
            body: Some(
                StyleObject::new()
                    .with("max-width", "600px")
                    .with("padding", "8px"),
            ),
            ..Default::default()
        };

        let styles = ModalStyles::with_overrides(&overrides);
        let defaults = ModalStyles::default();

        assert_eq!(styles.body.get("max-width"), Some("600px"));
        assert_eq!(styles.body.get("padding"), Some("8px"));
        assert_eq!(styles.body.get("border-radius"), Some("12px"));
        assert_eq!(styles.main, defaults.main);
        assert_eq!(styles.overlay, defaults.overlay);
        assert_eq!(styles.iframe, defaults.iframe);
    }

    #[test]
    fn test_modal_override_from_json() {
        let overrides: ModalStylesOverride =
            serde_json::from_value(json!({ "overlay": { "background-color": "black" } })).unwrap();
        assert!(overrides.main.is_none());

        let styles = ModalStyles::with_overrides(&overrides);
        assert_eq!(styles.overlay.get("background-color"), Some("black"));
    }

    #[test]
    fn test_css_text() {
        let style = StyleObject::new().with("width", "100%").with("border", "none");
        assert_eq!(style.to_css_text(), "border: none; width: 100%;");
    }
}
