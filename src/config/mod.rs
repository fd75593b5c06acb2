//! Configuration for pagepress
//!
//! The whole run is driven by one immutable [`Config`] value: defaults are
//! resolved once through the per-concern `Default` impls, a TOML file can
//! override them as a unit, and [`Config::validate`] is called after the
//! CLI has merged in the runtime inputs (seed URL, page count) and before
//! any crawling starts.

mod crawl;
mod logging;
mod naming;
mod output;

pub use crawl::CrawlConfig;
pub use logging::{LogLevel, LoggingConfig};
pub use naming::NamingConfig;
pub use output::OutputConfig;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::crawl::normalize_url;

/// Default user agent for page fetches
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Main configuration for a pagepress run
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Crawl and fetch configuration
    #[serde(default)]
    pub crawl: CrawlConfig,
    /// Keyword extraction and artifact naming configuration
    #[serde(default)]
    pub naming: NamingConfig,
    /// Output location configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// The seed URL and page count come from the CLI afterwards, so this
    /// does not validate — call [`Config::validate`] once they are merged.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("failed to read config file '{}': {}", path.display(), e)
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("failed to parse config file '{}': {}", path.display(), e)
        })?;
        Ok(config)
    }

    /// Validate all configuration fields.
    ///
    /// Collects all validation errors and reports them together so the user
    /// can fix everything in one pass rather than playing whack-a-mole.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        if self.crawl.seed_url.trim().is_empty() {
            errors.push("seed URL must not be empty".to_string());
        } else {
            let normalized = normalize_url(&self.crawl.seed_url);
            match Url::parse(&normalized) {
                Ok(url) if url.host_str().is_some() => {}
                _ => errors.push(format!(
                    "seed URL '{}' has no resolvable host",
                    self.crawl.seed_url
                )),
            }
        }

        if self.crawl.max_pages == 0 {
            errors.push("max_pages must be positive".to_string());
        }
        if self.crawl.max_retries == 0 {
            errors.push("max_retries must be at least 1".to_string());
        }
        if self.crawl.batch_size == 0 {
            errors.push("batch_size must be positive".to_string());
        }
        if self.crawl.fetch_timeout_secs == 0 {
            errors.push("fetch_timeout_secs must be positive".to_string());
        }

        if self.naming.num_keywords == 0 {
            errors.push("num_keywords must be positive".to_string());
        }
        if self.naming.max_ngram == 0 {
            errors.push("max_ngram must be positive".to_string());
        }
        // Sequence number, timestamp, and extension alone need ~25 chars;
        // anything tighter cannot produce a well-formed name.
        if self.naming.max_name_len < 40 {
            errors.push("max_name_len must be at least 40".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("invalid configuration:\n  - {}", errors.join("\n  - "))
        }
    }
}
