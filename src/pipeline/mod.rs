//! Two-phase pipeline orchestrator
//!
//! Sequences Frontier → FetchController → ContentExtractor →
//! KeywordExtractor → DocumentAssembler → DocumentRenderer per URL.
//! Phase one (discovery) enumerates in-scope URLs breadth-first and
//! persists the manifest; phase two (generation) re-fetches each
//! discovered URL and presses it into an artifact. Page-level failures
//! are counted and skipped, never fatal.
//!
//! Everything runs on one logical worker: the rendering session is a
//! shared stateful resource, so there is exactly one URL in flight and
//! all mutable state (frontier, statistics) is owned here without locks.

pub mod manifest;
pub mod types;

pub use manifest::DiscoveryManifest;
pub use types::{PageOutcome, RunStats};

use chrono::Utc;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::crawl::{FetchController, FetchOutcome, Frontier, PageRenderer};
use crate::document::{
    ArtifactNamer, DocumentAssembler, DocumentRenderer, ExtractedDocument, PageGeometry,
};
use crate::extract::{ContentExtractor, KeywordExtractor};

/// Pages whose extracted text has fewer non-whitespace characters than
/// this are counted as errors and skipped.
const MIN_CONTENT_CHARS: usize = 10;

/// The whole machine, wired once per run.
pub struct Pipeline<R: PageRenderer> {
    config: Config,
    fetcher: FetchController<R>,
    extractor: ContentExtractor,
    keywords: KeywordExtractor,
    assembler: DocumentAssembler,
    namer: ArtifactNamer,
    doc_renderer: Box<dyn DocumentRenderer>,
    geometry: PageGeometry,
    stats: RunStats,
}

impl<R: PageRenderer> Pipeline<R> {
    /// Wire up a pipeline. `config` must already be validated.
    pub fn new(config: Config, page_renderer: R, doc_renderer: Box<dyn DocumentRenderer>) -> Self {
        let fetcher = FetchController::new(page_renderer, &config.crawl);
        let keywords = KeywordExtractor::from_config(&config.naming);
        let namer = ArtifactNamer::new(&config.naming);
        Self {
            config,
            fetcher,
            extractor: ContentExtractor::new(),
            keywords,
            assembler: DocumentAssembler::new(),
            namer,
            doc_renderer,
            geometry: PageGeometry::default(),
            stats: RunStats::new(),
        }
    }

    /// Discovery phase: breadth-first enumeration of up to `max_pages`
    /// reachable, in-scope, non-ignored URLs.
    pub async fn discover(&mut self) -> Vec<String> {
        let mut frontier = Frontier::new(&self.config.crawl);
        frontier.seed(&self.config.crawl.seed_url);

        info!(
            "starting discovery from {} (max {} pages)",
            self.config.crawl.seed_url, self.config.crawl.max_pages
        );

        while let Some(url) = frontier.next() {
            frontier.mark_visited(&url);

            match self.fetcher.fetch(&url).await {
                FetchOutcome::Success { html } => {
                    frontier.record_discovered(&url);
                    self.stats.urls_crawled += 1;
                    debug!(
                        "discovered {} ({} discovered, {} pending)",
                        url,
                        frontier.discovered().len(),
                        frontier.pending()
                    );
                    frontier.offer(self.extractor.extract_links(&html, &url));
                }
                FetchOutcome::Failed { reason } => {
                    self.stats.errors += 1;
                    warn!("dropping {} after failed fetch: {}", url, reason);
                }
            }

            self.request_delay().await;
        }

        let urls = frontier.into_discovered();
        info!("discovery complete: {} unique URLs", urls.len());
        urls
    }

    /// Write the discovery manifest next to the artifacts.
    pub fn write_manifest(&self, urls: &[String]) -> anyhow::Result<PathBuf> {
        let path = self
            .config
            .output
            .dir
            .join(&self.config.output.manifest_filename);
        DiscoveryManifest::new(self.config.crawl.seed_url.clone(), urls.to_vec()).write(&path)?;
        info!("manifest written to {}", path.display());
        Ok(path)
    }

    /// Generation phase: re-fetch each discovered URL and press it into
    /// an artifact. Content is deliberately not cached from discovery —
    /// re-fetching keeps memory bounded regardless of site size.
    pub async fn generate(&mut self, urls: &[String]) {
        let total = urls.len();
        info!(
            "generating {} artifacts (batch size {})",
            total, self.config.crawl.batch_size
        );

        for (index, url) in urls.iter().enumerate() {
            let sequence = index + 1;

            match self.generate_one(url, sequence, total).await {
                PageOutcome::Created(path) => {
                    self.stats.artifacts_created += 1;
                    info!("[{}/{}] {}", sequence, total, path.display());
                }
                PageOutcome::FetchFailed { reason } => {
                    self.stats.errors += 1;
                    warn!("[{}/{}] fetch failed for {}: {}", sequence, total, url, reason);
                }
                PageOutcome::InsufficientContent => {
                    self.stats.errors += 1;
                    warn!("[{}/{}] insufficient content for {}", sequence, total, url);
                }
                PageOutcome::RenderFailed { reason } => {
                    self.stats.errors += 1;
                    warn!("[{}/{}] render failed for {}: {}", sequence, total, url, reason);
                }
            }

            self.fetcher.maybe_recycle_batch(sequence, total).await;
            self.request_delay().await;
        }
    }

    async fn generate_one(&mut self, url: &str, sequence: usize, total: usize) -> PageOutcome {
        let html = match self.fetcher.fetch(url).await {
            FetchOutcome::Success { html } => html,
            FetchOutcome::Failed { reason } => return PageOutcome::FetchFailed { reason },
        };

        let lines = self.extractor.extract_text(&html);
        let content_chars: usize = lines
            .iter()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).count())
            .sum();
        if content_chars < MIN_CONTENT_CHARS {
            return PageOutcome::InsufficientContent;
        }

        let keywords = self.keywords.extract(&lines.join("\n"));
        let generated_at = Utc::now();
        let document = ExtractedDocument {
            url: url.to_string(),
            lines,
            index: sequence,
            total,
        };
        let blocks = self.assembler.assemble(&document, &keywords, generated_at);
        let name = self.namer.artifact_name(
            url,
            &keywords,
            sequence,
            generated_at,
            self.doc_renderer.file_extension(),
        );
        let path = self.config.output.dir.join(name);

        match self.doc_renderer.render(&blocks, &self.geometry, &path) {
            Ok(()) => PageOutcome::Created(path),
            Err(e) => PageOutcome::RenderFailed {
                reason: e.to_string(),
            },
        }
    }

    /// Politeness throttle applied after every fetch, both phases.
    async fn request_delay(&self) {
        let delay = self.config.crawl.request_delay_ms;
        if delay > 0 {
            sleep(Duration::from_millis(delay)).await;
        }
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Stamp the end time and return the final statistics.
    pub fn finish(&mut self) -> &RunStats {
        self.stats.finish();
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::renderer::RenderError;
    use crate::document::TextRenderer;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// Serves canned markup keyed by normalized URL; unknown URLs fail.
    struct CannedRenderer {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl PageRenderer for CannedRenderer {
        async fn render(&self, url: &str) -> Result<String, RenderError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| RenderError::Transport(format!("no route to {}", url)))
        }

        async fn recycle(&mut self) -> Result<(), RenderError> {
            Ok(())
        }
    }

    fn test_pipeline(
        pages: Vec<(&str, &str)>,
        out_dir: &std::path::Path,
    ) -> Pipeline<CannedRenderer> {
        let mut config = Config::default();
        config.crawl.seed_url = "https://site.test".to_string();
        config.crawl.max_pages = 10;
        config.crawl.request_delay_ms = 0;
        config.crawl.retry_delay_ms = 0;
        config.crawl.max_retries = 1;
        config.output.dir = out_dir.to_path_buf();

        let renderer = CannedRenderer {
            pages: pages
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        Pipeline::new(config, renderer, Box::new(TextRenderer::new()))
    }

    fn page_with_text(text: &str) -> String {
        format!("<html><body><p>{}</p></body></html>", text)
    }

    #[tokio::test]
    async fn nine_content_chars_is_an_error_ten_is_an_artifact() {
        let dir = TempDir::new().unwrap();
        let nine = page_with_text("123456789");
        let ten = page_with_text("1234567890");
        let mut pipeline = test_pipeline(
            vec![
                ("https://site.test/nine", nine.as_str()),
                ("https://site.test/ten", ten.as_str()),
            ],
            dir.path(),
        );

        pipeline
            .generate(&[
                "https://site.test/nine".to_string(),
                "https://site.test/ten".to_string(),
            ])
            .await;

        assert_eq!(pipeline.stats().errors, 1);
        assert_eq!(pipeline.stats().artifacts_created, 1);
    }

    #[tokio::test]
    async fn fetch_failure_during_generation_counts_one_error() {
        let dir = TempDir::new().unwrap();
        let mut pipeline = test_pipeline(vec![], dir.path());

        pipeline
            .generate(&["https://site.test/missing".to_string()])
            .await;

        assert_eq!(pipeline.stats().errors, 1);
        assert_eq!(pipeline.stats().artifacts_created, 0);
    }

    #[tokio::test]
    async fn discovery_failure_counts_error_and_skips_url() {
        let dir = TempDir::new().unwrap();
        let mut pipeline = test_pipeline(vec![], dir.path());

        let urls = pipeline.discover().await;

        assert!(urls.is_empty());
        assert_eq!(pipeline.stats().errors, 1);
        assert_eq!(pipeline.stats().urls_crawled, 0);
    }

    /// Fails a fixed number of renders, then serves the same page forever.
    struct FlakyThenServe {
        failures_remaining: std::sync::Mutex<u32>,
        html: String,
    }

    #[async_trait]
    impl PageRenderer for FlakyThenServe {
        async fn render(&self, _url: &str) -> Result<String, RenderError> {
            let mut remaining = self.failures_remaining.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(RenderError::Transport("connection reset".to_string()));
            }
            Ok(self.html.clone())
        }

        async fn recycle(&mut self) -> Result<(), RenderError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn retried_success_does_not_count_an_error() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.crawl.seed_url = "https://site.test".to_string();
        config.crawl.max_pages = 1;
        config.crawl.request_delay_ms = 0;
        config.crawl.retry_delay_ms = 0;
        config.crawl.max_retries = 3;
        config.output.dir = dir.path().to_path_buf();

        // Two failures, success on the third attempt.
        let renderer = FlakyThenServe {
            failures_remaining: std::sync::Mutex::new(2),
            html: page_with_text("Plenty of prose for one generated artifact."),
        };
        let mut pipeline = Pipeline::new(config, renderer, Box::new(TextRenderer::new()));

        let urls = pipeline.discover().await;
        assert_eq!(urls, vec!["https://site.test/".to_string()]);
        assert_eq!(pipeline.stats().errors, 0);

        pipeline.generate(&urls).await;
        assert_eq!(pipeline.stats().artifacts_created, 1);
        assert_eq!(pipeline.stats().errors, 0);
    }
}
