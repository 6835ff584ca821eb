//! # Embed Configuration
//!
//! Hosting domains, checkout path and modal timing.
//! Defaults point at the production checkout; overrides come from the
//! environment (native builds) or a TOML document.

use crate::error::{EmbedError, EmbedResult};
use serde::{Deserialize, Serialize};
use url::Url;

/// Primary hosting domain
pub const APP_URL: &str = "https://paper.xyz";

/// Alternate hosting domain, for networks that block the primary TLD
pub const APP_URL_ALT: &str = "https://papercheckout.com";

/// Path of the embedded checkout-with-card page
pub const CHECKOUT_WITH_CARD_PATH: &str = "/sdk/2022-08-12/checkout-with-card";

/// Delay between starting the modal exit animation and detaching it
pub const CLOSE_DELAY_MS: u32 = 250;

/// SDK configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// Primary domain (scheme + host)
    #[serde(default = "default_app_url")]
    pub app_url: String,

    /// Alternate domain used when `use_alt_domain` is set
    #[serde(default = "default_app_url_alt")]
    pub app_url_alt: String,

    /// Path of the hosted checkout page
    #[serde(default = "default_checkout_path")]
    pub checkout_path: String,

    /// Modal close delay in milliseconds
    #[serde(default = "default_close_delay_ms")]
    pub close_delay_ms: u32,
}

fn default_app_url() -> String {
    APP_URL.to_string()
}

fn default_app_url_alt() -> String {
    APP_URL_ALT.to_string()
}

fn default_checkout_path() -> String {
    CHECKOUT_WITH_CARD_PATH.to_string()
}

fn default_close_delay_ms() -> u32 {
    CLOSE_DELAY_MS
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            app_url: default_app_url(),
            app_url_alt: default_app_url_alt(),
            checkout_path: default_checkout_path(),
            close_delay_ms: default_close_delay_ms(),
        }
    }
}

impl EmbedConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars (defaults apply when unset):
    /// - `EMBED_APP_URL`
    /// - `EMBED_APP_URL_ALT`
    /// - `EMBED_CHECKOUT_PATH`
    /// - `EMBED_CLOSE_DELAY_MS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> EmbedResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let mut config = Self::default();

        if let Ok(url) = std::env::var("EMBED_APP_URL") {
            config.app_url = url;
        }
        if let Ok(url) = std::env::var("EMBED_APP_URL_ALT") {
            config.app_url_alt = url;
        }
        if let Ok(path) = std::env::var("EMBED_CHECKOUT_PATH") {
            config.checkout_path = path;
        }
        if let Ok(delay) = std::env::var("EMBED_CLOSE_DELAY_MS") {
            config.close_delay_ms = delay.parse().map_err(|_| {
                EmbedError::Configuration(format!(
                    "EMBED_CLOSE_DELAY_MS must be a whole number of milliseconds, got '{}'",
                    delay
                ))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML document
    pub fn from_toml_str(content: &str) -> EmbedResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| EmbedError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that both domains parse as absolute URLs
    pub fn validate(&self) -> EmbedResult<()> {
        for (name, value) in [("app_url", &self.app_url), ("app_url_alt", &self.app_url_alt)] {
            Url::parse(value).map_err(|e| {
                EmbedError::Configuration(format!("{} '{}' is not a valid URL: {}", name, value, e))
            })?;
        }
        Ok(())
    }

    /// Hosting domain for the selected variant
    pub fn domain(&self, use_alt_domain: bool) -> &str {
        if use_alt_domain {
            &self.app_url_alt
        } else {
            &self.app_url
        }
    }

    /// Serialized origin (`scheme://host[:port]`) that inbound messages must carry
    pub fn origin(&self, use_alt_domain: bool) -> EmbedResult<String> {
        let url = Url::parse(self.domain(use_alt_domain))?;
        Ok(url.origin().ascii_serialization())
    }

    /// Builder: override the primary domain
    pub fn with_app_url(mut self, url: impl Into<String>) -> Self {
        self.app_url = url.into();
        self
    }

    /// Builder: override the alternate domain
    pub fn with_app_url_alt(mut self, url: impl Into<String>) -> Self {
        self.app_url_alt = url.into();
        self
    }

    /// Builder: override the modal close delay
    pub fn with_close_delay_ms(mut self, delay_ms: u32) -> Self {
        self.close_delay_ms = delay_ms;
        self
    }
}
