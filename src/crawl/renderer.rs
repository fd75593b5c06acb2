//! Page renderer collaborator seam
//!
//! The crawl core never talks to the network directly; it drives a
//! [`PageRenderer`], an owned handle to one rendering session. The
//! default implementation fetches over plain HTTP. A headless-browser
//! backend would implement the same trait and is expected to do its own
//! post-load settling (script execution, lazy content) before returning
//! markup.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::config::CrawlConfig;

/// Errors a rendering session can report.
///
/// The fetch controller treats all variants uniformly — "failed to
/// produce markup" triggers the same retry path regardless of cause —
/// but the distinction is kept for logging.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("page load timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("session failure: {0}")]
    Session(String),
}

/// One page-rendering session: load a URL, report markup.
///
/// The session is a stateful resource assumed to accumulate
/// unrecoverable state over time, so it supports explicit recycling
/// (teardown and recreation). Dropping the renderer releases the
/// session on every exit path.
#[async_trait]
pub trait PageRenderer: Send {
    /// Load a URL and return its markup.
    async fn render(&self, url: &str) -> Result<String, RenderError>;

    /// Tear the session down and build a fresh one.
    async fn recycle(&mut self) -> Result<(), RenderError>;
}

/// Configuration for the HTTP renderer
#[derive(Debug, Clone)]
pub struct HttpRendererConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Maximum redirects to follow
    pub max_redirects: usize,
}

impl HttpRendererConfig {
    pub fn from_crawl_config(config: &CrawlConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.fetch_timeout_secs),
            user_agent: config.user_agent.clone(),
            max_redirects: 10,
        }
    }
}

impl Default for HttpRendererConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: crate::config::DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
        }
    }
}

/// Plain-HTTP rendering session built on reqwest.
pub struct HttpRenderer {
    client: reqwest::Client,
    config: HttpRendererConfig,
}

impl HttpRenderer {
    pub fn new(config: HttpRendererConfig) -> Result<Self, RenderError> {
        let client = Self::build_client(&config)?;
        Ok(Self { client, config })
    }

    fn build_client(config: &HttpRendererConfig) -> Result<reqwest::Client, RenderError> {
        reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .gzip(true)
            .build()
            .map_err(|e| RenderError::Session(e.to_string()))
    }

    fn classify(&self, err: reqwest::Error) -> RenderError {
        if err.is_timeout() {
            RenderError::Timeout(self.config.timeout)
        } else {
            RenderError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &str) -> Result<String, RenderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        response.text().await.map_err(|e| self.classify(e))
    }

    async fn recycle(&mut self) -> Result<(), RenderError> {
        self.client = Self::build_client(&self.config)?;
        Ok(())
    }
}
