use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{File, FileFormat};
pub use duration::Duration;
use proanalysis_models::contact::ContactInfo;
use serde::Deserialize;
use url::Url;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Prefix that may be put in front of every environment override, e.g.
/// `EMAILJS_PUBLIC_KEY` instead of `PUBLIC_KEY`. The prefixed variable wins
/// if both are set.
pub const ENV_PREFIX: &str = "EMAILJS_";

/// Environment variables that override config keys.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("SERVICE_ID", "emailjs.service_id"),
    ("TEMPLATE_ID", "emailjs.template_id"),
    ("PUBLIC_KEY", "emailjs.public_key"),
    ("PRIVATE_KEY", "emailjs.private_key"),
    ("TO_EMAIL", "contact.to_email"),
    ("FROM_NAME", "contact.from_name"),
    ("MAX_EMAILS_PER_HOUR", "rate_limit.max_emails_per_hour"),
    ("COOLDOWN_MINUTES", "rate_limit.cooldown_minutes"),
];

/// Loads the config files in order and applies overrides from the process
/// environment.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_env(paths, |name| std::env::var(name).ok())
}

/// Like [`load`], but reads environment overrides through `env`.
pub fn load_with_env(
    paths: &[impl AsRef<Path>],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    ENV_OVERRIDES
        .iter()
        .try_fold(builder, |builder, &(name, key)| {
            let value = env(&format!("{ENV_PREFIX}{name}"))
                .or_else(|| env(name))
                .filter(|value| !value.is_empty());
            builder
                .set_override_option(key, value)
                .with_context(|| format!("Failed to apply environment override {name}"))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub emailjs: EmailJsConfig,
    pub contact: ContactConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: Option<String>,
    pub private_key: Option<String>,
    pub endpoint_override: Option<Url>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Destination address for contact form messages.
    pub to_email: String,
    pub from_name: String,
    /// Address shown to visitors when sending fails.
    pub fallback_email: String,
    pub info: ContactInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_max_emails_per_hour")]
    pub max_emails_per_hour: usize,
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_emails_per_hour: default_max_emails_per_hour(),
            cooldown_minutes: default_cooldown_minutes(),
        }
    }
}

fn default_max_emails_per_hour() -> usize {
    10
}

fn default_cooldown_minutes() -> u64 {
    5
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the persisted client-side state.
    pub path: PathBuf,
}
