//! Pipeline types: run statistics and per-URL outcomes

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Statistics for one run. Owned and mutated by the orchestrator only;
/// everything else reports outcomes and lets the orchestrator count.
#[derive(Debug, Clone)]
pub struct RunStats {
    /// URLs successfully fetched during discovery
    pub urls_crawled: u64,
    /// Artifacts written during generation
    pub artifacts_created: u64,
    /// Page-level errors across both phases
    pub errors: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            urls_crawled: 0,
            artifacts_created: 0,
            errors: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn duration_secs(&self) -> f64 {
        let end = self.finished_at.unwrap_or_else(Utc::now);
        (end - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    pub fn summary(&self) -> String {
        format!(
            "crawled {} | artifacts {} | errors {} | {:.1}s",
            self.urls_crawled,
            self.artifacts_created,
            self.errors,
            self.duration_secs()
        )
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of generating one artifact.
#[derive(Debug)]
pub enum PageOutcome {
    /// Artifact written to this path
    Created(PathBuf),
    /// All fetch attempts exhausted
    FetchFailed { reason: String },
    /// Extracted text too thin to be worth an artifact; retrying a fetch
    /// will not produce more content, so this is terminal
    InsufficientContent,
    /// The layout backend reported a failure
    RenderFailed { reason: String },
}
