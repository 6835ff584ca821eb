//! # Checkout Links
//!
//! Builds the URL loaded into the checkout iframe:
//! `<domain><checkout-path>?clientSecret=...&<styling keys>...&locale=...&appName=...`
//!
//! Optional parameters that are absent are omitted rather than sent empty.
//! The client secret is opaque and never inspected.

use crate::config::EmbedConfig;
use crate::error::EmbedResult;
use crate::style::StyleOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};
use url::Url;

/// Locales supported by the hosted checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Fr,
    Es,
    It,
    De,
    Ja,
    Ko,
    Zh,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::Es => "es",
            Locale::It => "it",
            Locale::De => "de",
            Locale::Ja => "ja",
            Locale::Ko => "ko",
            Locale::Zh => "zh",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "fr" => Ok(Locale::Fr),
            "es" => Ok(Locale::Es),
            "it" => Ok(Locale::It),
            "de" => Ok(Locale::De),
            "ja" => Ok(Locale::Ja),
            "ko" => Ok(Locale::Ko),
            "zh" => Ok(Locale::Zh),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}

/// Session parameters for a checkout-with-card link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLinkArgs {
    /// Client secret of the checkout session (required, opaque)
    #[serde(alias = "sdkClientSecret")]
    pub client_secret: String,

    /// Name of the embedding application
    #[serde(default)]
    pub app_name: Option<String>,

    /// Branding options; brand defaults apply when absent
    #[serde(default)]
    pub options: Option<StyleOptions>,

    #[serde(default)]
    pub locale: Option<Locale>,

    /// Load from the alternate domain. Some restricted networks block the
    /// primary TLD wholesale.
    #[serde(default = "default_use_alt_domain")]
    pub use_alt_domain: bool,
}

fn default_use_alt_domain() -> bool {
    true
}

impl CheckoutLinkArgs {
    /// Create args with only the client secret set
    pub fn new(client_secret: impl Into<String>) -> Self {
        Self {
            client_secret: client_secret.into(),
            app_name: None,
            options: None,
            locale: None,
            use_alt_domain: default_use_alt_domain(),
        }
    }

    /// Builder: set application name
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Builder: set branding options
    pub fn with_options(mut self, options: StyleOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Builder: set locale
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Builder: choose between alternate and primary domain
    pub fn use_alt_domain(mut self, use_alt_domain: bool) -> Self {
        self.use_alt_domain = use_alt_domain;
        self
    }
}

/// Incremental builder for the checkout URL query
#[derive(Debug, Clone)]
pub struct CheckoutLink {
    url: Url,
}

impl CheckoutLink {
    /// Start from `domain` joined with `path`
    pub fn new(domain: &str, path: &str) -> EmbedResult<Self> {
        let url = Url::parse(domain)?.join(path)?;
        Ok(Self { url })
    }

    fn append(&mut self, key: &str, value: &str) {
        self.url.query_pairs_mut().append_pair(key, value);
    }

    pub fn add_client_secret(&mut self, client_secret: &str) {
        self.append("clientSecret", client_secret);
    }

    pub fn add_styling_options(&mut self, options: &StyleOptions) {
        for (key, value) in options.iter() {
            self.append(key, value);
        }
    }

    pub fn add_locale(&mut self, locale: Option<Locale>) {
        if let Some(locale) = locale {
            self.append("locale", locale.as_str());
        }
    }

    pub fn add_app_name(&mut self, app_name: Option<&str>) {
        if let Some(name) = app_name.filter(|n| !n.is_empty()) {
            self.append("appName", name);
        }
    }

    pub fn into_url(self) -> Url {
        self.url
    }
}

/// Build the URL loaded into the checkout iframe
#[instrument(skip_all, fields(use_alt_domain = args.use_alt_domain))]
pub fn build_checkout_link(config: &EmbedConfig, args: &CheckoutLinkArgs) -> EmbedResult<Url> {
    let domain = config.domain(args.use_alt_domain);
    let mut link = CheckoutLink::new(domain, &config.checkout_path)?;

    let brand_defaults;
    let options = match &args.options {
        Some(options) => options,
        None => {
            brand_defaults = StyleOptions::brand_defaults();
            &brand_defaults
        }
    };

    link.add_client_secret(&args.client_secret);
    link.add_styling_options(options);
    link.add_locale(args.locale);
    link.add_app_name(args.app_name.as_deref());

    let url = link.into_url();
    debug!("Built checkout link for {}", domain);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{APP_URL, APP_URL_ALT, CHECKOUT_WITH_CARD_PATH};
    use crate::style::DEFAULT_BRAND_OPTIONS;
    use crate::EmbedError;
    use serde_json::json;

    fn query(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_secret_only_adds_brand_defaults() {
        let url = build_checkout_link(&EmbedConfig::default(), &CheckoutLinkArgs::new("sec_123"))
            .unwrap();
        let pairs = query(&url);

        assert_eq!(pairs[0], ("clientSecret".to_string(), "sec_123".to_string()));
        assert_eq!(pairs.len(), 1 + DEFAULT_BRAND_OPTIONS.len());
        for (key, value) in DEFAULT_BRAND_OPTIONS {
            assert!(pairs.contains(&(key.to_string(), value.to_string())));
        }
        assert!(!pairs.iter().any(|(k, _)| k == "locale" || k == "appName"));
    }

    #[test]
    fn test_explicit_options_replace_defaults() {
        let args = CheckoutLinkArgs::new("sec_123")
            .with_options(StyleOptions::new().primary_color("#fff"));
        let url = build_checkout_link(&EmbedConfig::default(), &args).unwrap();

        assert_eq!(
            query(&url),
            vec![
                ("clientSecret".to_string(), "sec_123".to_string()),
                ("primaryColor".to_string(), "#fff".to_string()),
            ]
        );
        assert!(url.as_str().contains("primaryColor=%23fff"));
    }

    #[test]
    fn test_domain_selection() {
        let config = EmbedConfig::default();

        let alt = build_checkout_link(&config, &CheckoutLinkArgs::new("s")).unwrap();
        assert!(alt.as_str().starts_with(APP_URL_ALT));
        assert_eq!(alt.path(), CHECKOUT_WITH_CARD_PATH);

        let primary =
            build_checkout_link(&config, &CheckoutLinkArgs::new("s").use_alt_domain(false))
                .unwrap();
        assert!(primary.as_str().starts_with(APP_URL));
    }

    #[test]
    fn test_locale_and_app_name_order() {
        let args = CheckoutLinkArgs::new("s")
            .with_options(StyleOptions::new())
            .with_locale(Locale::Fr)
            .with_app_name("My Store");
        let url = build_checkout_link(&EmbedConfig::default(), &args).unwrap();

        let keys: Vec<String> = query(&url).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["clientSecret", "locale", "appName"]);
        assert!(url.as_str().ends_with("locale=fr&appName=My+Store"));
    }

    #[test]
    fn test_empty_app_name_omitted() {
        let args = CheckoutLinkArgs::new("s").with_app_name("");
        let url = build_checkout_link(&EmbedConfig::default(), &args).unwrap();
        assert!(!url.as_str().contains("appName"));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = EmbedConfig::default().with_app_url_alt("not a url");
        let result = build_checkout_link(&config, &CheckoutLinkArgs::new("s"));
        assert!(matches!(result, Err(EmbedError::InvalidUrl(_))));
    }

    #[test]
    fn test_args_from_js_shape() {
        let args: CheckoutLinkArgs = serde_json::from_value(json!({
            "sdkClientSecret": "sec_abc",
            "locale": "ja",
            "options": { "primaryColor": "#000" }
        }))
        .unwrap();

        assert_eq!(args.client_secret, "sec_abc");
        assert_eq!(args.locale, Some(Locale::Ja));
        assert!(args.use_alt_domain);
        assert_eq!(args.options.unwrap().get("primaryColor"), Some("#000"));
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("DE".parse::<Locale>().unwrap(), Locale::De);
        assert!("xx".parse::<Locale>().is_err());
    }
}
