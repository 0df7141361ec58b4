//! Scanner configuration
//!
//! Combines the run mode chosen on the command line with credentials and
//! connection settings read from the environment (a `.env` file is loaded
//! first by `main`).

use anyhow::{Context, Result};
use jobwatch_core::{SourceConfig, SourceKind};
use std::path::Path;
use std::time::Duration;

use crate::repository::DEFAULT_SEEN_JOBS_KEY;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Which collaborators a scan uses and which titles it keeps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Durable Redis store instead of the in-memory stand-in
    pub use_redis: bool,
    /// Send email instead of printing the digest
    pub send_emails: bool,
    /// Lower-cased title keywords; empty keeps every job
    pub title_keywords: Vec<String>,
}

impl ScannerConfig {
    /// Derives the run mode from command-line flags
    ///
    /// `test` disables both Redis and email; `no_email` only disables email.
    pub fn from_flags(test: bool, no_email: bool, title_keywords: Vec<String>) -> Self {
        Self {
            use_redis: !test,
            send_emails: !test && !no_email,
            title_keywords: title_keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

/// SMTP settings for the email notifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSettings {
    pub address: Option<String>,
    pub password: Option<String>,
    /// Recipient; the sender address when unset
    pub to: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            address: None,
            password: None,
            to: None,
            smtp_host: DEFAULT_SMTP_HOST.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
        }
    }
}

/// Full scanner configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub scanner: ScannerConfig,

    /// Boards to scan, in scan order
    pub sources: Vec<SourceConfig>,

    /// Redis connection string for the seen-job set
    pub redis_url: Option<String>,

    /// Name of the Redis set holding notified job URLs
    pub seen_jobs_key: String,

    pub email: EmailSettings,

    /// Per-request timeout for board API calls
    pub http_timeout: Duration,

    /// Time between scans in watch mode; a single scan when unset
    pub interval: Option<Duration>,
}

impl Config {
    /// Creates a configuration with defaults for everything but the run mode
    pub fn new(scanner: ScannerConfig, sources: Vec<SourceConfig>) -> Self {
        Self {
            scanner,
            sources,
            redis_url: None,
            seen_jobs_key: DEFAULT_SEEN_JOBS_KEY.to_string(),
            email: EmailSettings::default(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            interval: None,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - REDISCLOUD_URL (required unless running with --test)
    /// - SEEN_JOBS_KEY (optional, default: seen_jobs)
    /// - EMAIL_ADDRESS, EMAIL_PASSWORD (required when sending email)
    /// - EMAIL_TO (optional, default: EMAIL_ADDRESS)
    /// - SMTP_HOST (optional, default: smtp.gmail.com)
    /// - SMTP_PORT (optional, default: 465)
    /// - HTTP_TIMEOUT (optional, seconds, default: 30)
    pub fn from_env(scanner: ScannerConfig, sources: Vec<SourceConfig>) -> Self {
        Self::from_lookup(scanner, sources, |key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`
    pub fn from_lookup<F>(scanner: ScannerConfig, sources: Vec<SourceConfig>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::new(scanner, sources);

        config.redis_url = var("REDISCLOUD_URL");
        if let Some(key) = var("SEEN_JOBS_KEY") {
            config.seen_jobs_key = key;
        }

        config.email.address = var("EMAIL_ADDRESS");
        config.email.password = var("EMAIL_PASSWORD");
        config.email.to = var("EMAIL_TO");
        if let Some(host) = var("SMTP_HOST") {
            config.email.smtp_host = host;
        }
        if let Some(port) = var("SMTP_PORT").and_then(|s| s.parse::<u16>().ok()) {
            config.email.smtp_port = port;
        }

        if let Some(timeout) = var("HTTP_TIMEOUT").and_then(|s| s.parse::<u64>().ok()) {
            config.http_timeout = Duration::from_secs(timeout);
        }

        config
    }

    /// Sets the watch-mode interval
    pub fn with_interval(mut self, interval: Option<Duration>) -> Self {
        self.interval = interval;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.scanner.use_redis && self.redis_url.is_none() {
            anyhow::bail!("REDISCLOUD_URL must be set unless running with --test");
        }

        if self.seen_jobs_key.is_empty() {
            anyhow::bail!("seen_jobs_key cannot be empty");
        }

        if self.scanner.send_emails
            && (self.email.address.is_none() || self.email.password.is_none())
        {
            anyhow::bail!(
                "EMAIL_ADDRESS and EMAIL_PASSWORD must be set to send emails (use --no-email to skip)"
            );
        }

        if self.http_timeout.is_zero() {
            anyhow::bail!("http_timeout must be greater than 0");
        }

        if self.interval.is_some_and(|i| i.is_zero()) {
            anyhow::bail!("interval must be greater than 0");
        }

        if self.sources.is_empty() {
            anyhow::bail!("at least one source must be configured");
        }

        for source in &self.sources {
            if !source.endpoint.starts_with("http://") && !source.endpoint.starts_with("https://") {
                anyhow::bail!(
                    "endpoint of source {} must start with http:// or https://",
                    source.organization
                );
            }
            if source.organization.trim().is_empty() {
                anyhow::bail!("source at {} has no organization", source.endpoint);
            }
        }

        Ok(())
    }
}

/// Boards scanned when no sources file is given
pub fn default_sources() -> Vec<SourceConfig> {
    vec![SourceConfig::new(
        SourceKind::Departments,
        "https://boards-api.greenhouse.io/v1/boards/anthropic",
        "Anthropic",
    )]
}

/// Loads an ordered list of sources from a JSON file
pub fn load_sources(path: &Path) -> Result<Vec<SourceConfig>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sources file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse sources file {}", path.display()))
}
