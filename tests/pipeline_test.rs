//! Integration tests for pagepress
//!
//! Drives the full two-phase pipeline against an in-memory page renderer
//! serving a canned site graph, writing artifacts into a tempdir.

use async_trait::async_trait;
use pagepress::config::Config;
use pagepress::crawl::{PageRenderer, RenderError};
use pagepress::document::TextRenderer;
use pagepress::pipeline::{DiscoveryManifest, Pipeline};
use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

/// In-memory rendering session over a canned site graph. URLs are keyed
/// in normalized form; anything else fails like a dead host would.
struct SiteRenderer {
    pages: HashMap<String, String>,
}

impl SiteRenderer {
    fn new(pages: Vec<(String, String)>) -> Self {
        Self {
            pages: pages.into_iter().collect(),
        }
    }
}

#[async_trait]
impl PageRenderer for SiteRenderer {
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

fn fast_config(seed: &str, max_pages: usize, out_dir: &Path) -> Config {
    let mut config = Config::default();
    config.crawl.seed_url = seed.to_string();
    config.crawl.max_pages = max_pages;
    config.crawl.request_delay_ms = 0;
    config.crawl.retry_delay_ms = 0;
    config.crawl.max_retries = 2;
    config.output.dir = out_dir.to_path_buf();
    config.validate().expect("test config must validate");
    config
}

fn prose(body: &str) -> String {
    format!(
        "<html><body><p>{} This paragraph carries enough text for keyword \
         extraction to have something to work with.</p></body></html>",
        body
    )
}

fn page(body: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!("<a href=\"{}\">link</a>", href))
        .collect();
    format!(
        "<html><body><p>{} This paragraph carries enough text for keyword \
         extraction to have something to work with.</p>{}</body></html>",
        body, anchors
    )
}

/// Three-page site with an off-domain link and an ignored login link.
fn demo_site() -> SiteRenderer {
    SiteRenderer::new(vec![
        (
            "https://site.test/".to_string(),
            page(
                "Welcome to the studio homepage.",
                &["/about", "/contact", "/login", "https://elsewhere.org/x"],
            ),
        ),
        (
            "https://site.test/about".to_string(),
            page("About our yoga studio in Berlin.", &["/contact", "/"]),
        ),
        (
            "https://site.test/contact".to_string(),
            prose("Contact the studio by mail."),
        ),
    ])
}

#[tokio::test]
async fn discovery_finds_in_scope_pages_in_bfs_order() {
    let dir = TempDir::new().unwrap();
    let config = fast_config("https://site.test", 10, dir.path());
    let mut pipeline = Pipeline::new(config, demo_site(), Box::new(TextRenderer::new()));

    let urls = pipeline.discover().await;

    assert_eq!(
        urls,
        vec![
            "https://site.test/".to_string(),
            "https://site.test/about".to_string(),
            "https://site.test/contact".to_string(),
        ]
    );
    assert_eq!(pipeline.stats().urls_crawled, 3);
    assert_eq!(pipeline.stats().errors, 0);
}

#[tokio::test]
async fn manifest_records_seed_count_and_ordered_urls() {
    let dir = TempDir::new().unwrap();
    let config = fast_config("https://site.test", 10, dir.path());
    let mut pipeline = Pipeline::new(config, demo_site(), Box::new(TextRenderer::new()));

    let urls = pipeline.discover().await;
    let manifest_path = pipeline.write_manifest(&urls).unwrap();

    let manifest: DiscoveryManifest =
        serde_json::from_str(&std::fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(manifest.seed_url, "https://site.test");
    assert_eq!(manifest.total_urls, 3);
    assert_eq!(manifest.urls, urls);
}

#[tokio::test]
async fn generation_writes_one_artifact_per_discovered_url() {
    let dir = TempDir::new().unwrap();
    let config = fast_config("https://site.test", 10, dir.path());
    let mut pipeline = Pipeline::new(config, demo_site(), Box::new(TextRenderer::new()));

    let urls = pipeline.discover().await;
    pipeline.generate(&urls).await;

    assert_eq!(pipeline.stats().artifacts_created, 3);
    assert_eq!(pipeline.stats().errors, 0);

    let artifacts: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
        .collect();
    assert_eq!(artifacts.len(), 3);

    // Names carry the zero-padded sequence and sanitized domain.
    let names: Vec<String> = artifacts
        .iter()
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    assert!(names.iter().any(|n| n.starts_with("001_")));
    assert!(names.iter().all(|n| n.contains("site_test")));
}

#[tokio::test]
async fn max_pages_one_yields_exactly_the_seed() {
    let dir = TempDir::new().unwrap();
    let config = fast_config("https://site.test", 1, dir.path());
    let mut pipeline = Pipeline::new(config, demo_site(), Box::new(TextRenderer::new()));

    let urls = pipeline.discover().await;
    assert_eq!(urls, vec!["https://site.test/".to_string()]);

    pipeline.generate(&urls).await;
    let stats = pipeline.stats();
    // Exactly one artifact or exactly one counted error, never both.
    assert_eq!(stats.artifacts_created + stats.errors, 1);
    assert_eq!(stats.artifacts_created, 1);
}

#[tokio::test]
async fn dead_page_is_skipped_and_counted_once() {
    let dir = TempDir::new().unwrap();
    let config = fast_config("https://site.test", 10, dir.path());

    // /contact is linked but not served: discovery drops it with one
    // counted error, generation still covers the rest.
    let site = SiteRenderer::new(vec![
        (
            "https://site.test/".to_string(),
            page("Welcome to the studio homepage.", &["/about", "/contact"]),
        ),
        (
            "https://site.test/about".to_string(),
            prose("About our yoga studio in Berlin."),
        ),
    ]);
    let mut pipeline = Pipeline::new(config, site, Box::new(TextRenderer::new()));

    let urls = pipeline.discover().await;
    assert_eq!(
        urls,
        vec![
            "https://site.test/".to_string(),
            "https://site.test/about".to_string(),
        ]
    );
    assert_eq!(pipeline.stats().errors, 1);

    pipeline.generate(&urls).await;
    assert_eq!(pipeline.stats().artifacts_created, 2);
    assert_eq!(pipeline.stats().errors, 1);
}

#[tokio::test]
async fn thin_page_counts_as_error_without_artifact() {
    let dir = TempDir::new().unwrap();
    let config = fast_config("https://site.test", 10, dir.path());

    let site = SiteRenderer::new(vec![
        (
            "https://site.test/".to_string(),
            page("Welcome to the studio homepage.", &["/thin"]),
        ),
        (
            "https://site.test/thin".to_string(),
            "<html><body><p>tiny</p></body></html>".to_string(),
        ),
    ]);
    let mut pipeline = Pipeline::new(config, site, Box::new(TextRenderer::new()));

    let urls = pipeline.discover().await;
    pipeline.generate(&urls).await;

    assert_eq!(pipeline.stats().artifacts_created, 1);
    assert_eq!(pipeline.stats().errors, 1);
}

#[tokio::test]
async fn artifact_carries_metadata_and_body() {
    let dir = TempDir::new().unwrap();
    let config = fast_config("https://site.test", 1, dir.path());
    let mut pipeline = Pipeline::new(config, demo_site(), Box::new(TextRenderer::new()));

    let urls = pipeline.discover().await;
    pipeline.generate(&urls).await;

    let artifact = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .find(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
        .expect("one artifact");
    let content = std::fs::read_to_string(artifact.path()).unwrap();

    assert!(content.contains("Page 1 of 1"));
    assert!(content.contains("URL: https://site.test/"));
    assert!(content.contains("Keywords:"));
    assert!(content.contains("Welcome to the studio homepage."));
}
