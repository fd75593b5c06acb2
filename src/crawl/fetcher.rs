//! Fetch controller: retry, backoff, and session recycling
//!
//! Wraps a [`PageRenderer`] with the crawl's failure policy. The
//! controller is the only component that may fail a URL permanently:
//! each attempt that errors recycles the rendering session (renderers
//! accumulate unrecoverable state after failures) and waits before
//! retrying; once attempts are exhausted the URL is reported as
//! `Failed` exactly once.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use super::renderer::PageRenderer;
use crate::config::CrawlConfig;
use crate::util::truncate_str;

/// Final result of fetching one URL.
#[derive(Debug)]
pub enum FetchOutcome {
    Success { html: String },
    Failed { reason: String },
}

/// Retry/backoff/recycling policy around one rendering session.
pub struct FetchController<R: PageRenderer> {
    renderer: R,
    max_retries: u32,
    retry_delay: Duration,
    batch_size: usize,
}

impl<R: PageRenderer> FetchController<R> {
    pub fn new(renderer: R, config: &CrawlConfig) -> Self {
        Self {
            renderer,
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            batch_size: config.batch_size,
        }
    }

    /// Fetch one URL, retrying up to the configured bound.
    ///
    /// Every failure class takes the same path: wait, recycle the
    /// session, try again. Progress on the frontier blocks until the
    /// URL resolves or exhausts its attempts.
    pub async fn fetch(&mut self, url: &str) -> FetchOutcome {
        let mut last_error = String::new();

        for attempt in 1..=self.max_retries {
            match self.renderer.render(url).await {
                Ok(html) => return FetchOutcome::Success { html },
                Err(e) => {
                    last_error = e.to_string();
                    warn!(
                        "attempt {}/{} failed for {}: {}",
                        attempt,
                        self.max_retries,
                        url,
                        truncate_str(&last_error, 200)
                    );
                    if attempt < self.max_retries {
                        sleep(self.retry_delay).await;
                        self.recycle().await;
                    }
                }
            }
        }

        warn!("all {} attempts failed for {}", self.max_retries, url);
        FetchOutcome::Failed { reason: last_error }
    }

    /// Proactively recycle the rendering session at batch boundaries
    /// during the generation phase. Resource hygiene, not an error
    /// response: long-lived sessions grow without bound.
    pub async fn maybe_recycle_batch(&mut self, processed: usize, total: usize) {
        if processed == 0 || processed >= total {
            return;
        }
        if processed % self.batch_size == 0 {
            info!("recycling renderer session after {} pages", processed);
            self.recycle().await;
        }
    }

    async fn recycle(&mut self) {
        if let Err(e) = self.renderer.recycle().await {
            warn!("session recycle failed: {}", e);
        }
    }
}
