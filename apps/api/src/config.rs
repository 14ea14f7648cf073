use anyhow::{bail, Context, Result};

use crate::reading::extract::ExtractorKind;

const DEFAULT_PUBLIC_BASE_URL: &str = "https://astropunch.pro";
const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_STRIPE_API_URL: &str = "https://api.stripe.com/v1";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_api_url: String,
    pub stripe_secret_key: String,
    pub stripe_api_url: String,
    /// Public origin used to build checkout success/cancel redirects.
    pub public_base_url: String,
    pub reading_extractor: ExtractorKind,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let reading_extractor = match lookup("READING_EXTRACTOR").as_deref() {
            None | Some("brace") => ExtractorKind::BraceScan,
            Some("strict") => ExtractorKind::Strict,
            Some(other) => bail!("READING_EXTRACTOR must be 'brace' or 'strict', got '{other}'"),
        };

        Ok(Config {
            anthropic_api_key: require("ANTHROPIC_API_KEY")?,
            anthropic_api_url: or_default("ANTHROPIC_API_URL", DEFAULT_ANTHROPIC_API_URL),
            stripe_secret_key: require("STRIPE_SECRET_KEY")?,
            stripe_api_url: or_default("STRIPE_API_URL", DEFAULT_STRIPE_API_URL)
                .trim_end_matches('/')
                .to_string(),
            public_base_url: or_default("PUBLIC_BASE_URL", DEFAULT_PUBLIC_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            reading_extractor,
            max_upload_bytes: or_default("MAX_UPLOAD_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            port: or_default("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: or_default("RUST_LOG", "info"),
        })
    }
}
