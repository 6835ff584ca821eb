//! # embed-cli
//!
//! Builds checkout-with-card links outside the browser, e.g. for a server
//! that renders the iframe `src` directly.

use anyhow::Context;
use clap::Parser;
use embed_core::{build_checkout_link, CheckoutLinkArgs, EmbedConfig, Locale, StyleOptions};
use std::path::{Path, PathBuf};
use tracing::info;

/// Build a checkout-with-card iframe link
#[derive(Debug, Parser)]
#[command(name = "checkout-link", version, about)]
pub struct Cli {
    /// Client secret of the checkout session
    #[arg(long, env = "EMBED_CLIENT_SECRET")]
    pub secret: String,

    /// Name of the embedding application
    #[arg(long)]
    pub app_name: Option<String>,

    /// Checkout locale (en, fr, es, it, de, ja, ko, zh)
    #[arg(long)]
    pub locale: Option<Locale>,

    /// Branding option; repeatable. Brand defaults apply when none is given.
    #[arg(long = "style", value_name = "KEY=VALUE", value_parser = parse_style_pair)]
    pub styles: Vec<(String, String)>,

    /// Use the primary domain instead of the alternate one
    #[arg(long)]
    pub primary_domain: bool,

    /// TOML config file; environment variables are used otherwise
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print `{"url": ..., "origin": ...}` instead of the bare URL
    #[arg(long)]
    pub json: bool,
}

fn parse_style_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

/// Load config from `path`, or from the environment when absent
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EmbedConfig> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config = EmbedConfig::from_toml_str(&content)?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(EmbedConfig::from_env()?),
    }
}

impl Cli {
    pub fn link_args(&self) -> CheckoutLinkArgs {
        let mut args = CheckoutLinkArgs::new(&self.secret).use_alt_domain(!self.primary_domain);
        if let Some(app_name) = &self.app_name {
            args = args.with_app_name(app_name);
        }
        if let Some(locale) = self.locale {
            args = args.with_locale(locale);
        }
        if !self.styles.is_empty() {
            args = args.with_options(self.styles.iter().cloned().collect::<StyleOptions>());
        }
        args
    }
}

/// Produce the command output
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = load_config(cli.config.as_deref())?;
    let args = cli.link_args();
    let url = build_checkout_link(&config, &args)?;

    if cli.json {
        let origin = config.origin(args.use_alt_domain)?;
        let out = serde_json::json!({ "url": url.as_str(), "origin": origin });
        Ok(serde_json::to_string_pretty(&out)?)
    } else {
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "checkout-link",
            "--secret",
            "sec_1",
            "--locale",
            "fr",
            "--style",
            "primaryColor=#fff",
            "--style",
            "borderRadius=4",
            "--primary-domain",
        ])
        .unwrap();

        assert_eq!(cli.secret, "sec_1");
        assert_eq!(cli.locale, Some(Locale::Fr));
        assert_eq!(cli.styles.len(), 2);

        let args = cli.link_args();
        assert!(!args.use_alt_domain);
        assert_eq!(args.options.unwrap().get("borderRadius"), Some("4"));
    }

    #[test]
    fn test_bad_style_pair_rejected() {
        let result = Cli::try_parse_from(["checkout-link", "--secret", "s", "--style", "novalue"]);
        assert!(result.is_err());
        assert!(parse_style_pair("=x").is_err());
        assert_eq!(
            parse_style_pair("fontFamily=Inter, sans-serif").unwrap(),
            ("fontFamily".to_string(), "Inter, sans-serif".to_string())
        );
    }

    #[test]
    fn test_bad_locale_rejected() {
        let result = Cli::try_parse_from(["checkout-link", "--secret", "s", "--locale", "xx"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_with_config_file() {
        let file = write_config(r#"app_url_alt = "http://localhost:4000""#);
        let cli = Cli::try_parse_from([
            "checkout-link",
            "--secret",
            "sec_1",
            "--style",
            "primaryColor=#fff",
            "--config",
            file.path().to_str().unwrap(),
        ])
        .unwrap();

        let out = run(&cli).unwrap();
        assert_eq!(
            out,
            "http://localhost:4000/sdk/2022-08-12/checkout-with-card?clientSecret=sec_1&primaryColor=%23fff"
        );
    }

    #[test]
    fn test_run_json_output() {
        let file = write_config("");
        let cli = Cli::try_parse_from([
            "checkout-link",
            "--secret",
            "sec_1",
            "--json",
            "--config",
            file.path().to_str().unwrap(),
        ])
        .unwrap();

        let out: serde_json::Value = serde_json::from_str(&run(&cli).unwrap()).unwrap();
        assert_eq!(out["origin"], "https://papercheckout.com");
        assert!(out["url"].as_str().unwrap().contains("clientSecret=sec_1"));
    }

    #[test]
    fn test_missing_config_file() {
        let result = load_config(Some(Path::new("/nonexistent/embed.toml")));
        assert!(result.is_err());
    }
}
