//! Crawl and fetch configuration

use serde::{Deserialize, Serialize};

use super::DEFAULT_USER_AGENT;

/// Crawl configuration: frontier bounds, fetch policy, politeness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Seed URL the crawl starts from (filled in from the CLI, not the file)
    #[serde(default)]
    pub seed_url: String,
    /// Maximum number of pages to discover
    pub max_pages: usize,
    /// Politeness delay applied after every fetch (milliseconds)
    pub request_delay_ms: u64,
    /// Per-fetch timeout (seconds)
    pub fetch_timeout_secs: u64,
    /// Maximum fetch attempts per URL
    pub max_retries: u32,
    /// Delay between retry attempts (milliseconds)
    pub retry_delay_ms: u64,
    /// Renderer session is recycled after this many processed pages
    pub batch_size: usize,
    /// URL substrings that exclude a candidate from the frontier
    /// (matched case-insensitively)
    pub ignore_patterns: Vec<String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed_url: String::new(),
            max_pages: 50,
            request_delay_ms: 2000,
            fetch_timeout_secs: 30,
            max_retries: 3,
            retry_delay_ms: 5000,
            batch_size: 25,
            ignore_patterns: default_ignore_patterns(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// URL fragments that mark session, commerce, and feed endpoints —
/// pages that never carry prose worth pressing into a document.
fn default_ignore_patterns() -> Vec<String> {
    [
        "login",
        "logout",
        "register",
        "newsletter",
        "redirect",
        "wp-json",
        "feed",
        "trackback",
        "xmlrpc",
        "search",
        "page=",
        "paged=",
        "sort=",
        "filter=",
        "cart",
        "checkout",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
