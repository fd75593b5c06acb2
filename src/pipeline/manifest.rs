//! Discovery manifest artifact
//!
//! A structured record of what discovery found, written once after the
//! discovery phase completes. Nothing in the core reads it back — it
//! exists for downstream tooling and auditing.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ordered record of one discovery phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryManifest {
    /// Seed URL the crawl started from
    pub seed_url: String,
    /// When the manifest was generated
    pub generated_at: DateTime<Utc>,
    /// Number of discovered URLs
    pub total_urls: usize,
    /// Discovered normalized URLs, in BFS order
    pub urls: Vec<String>,
}

impl DiscoveryManifest {
    pub fn new(seed_url: impl Into<String>, urls: Vec<String>) -> Self {
        Self {
            seed_url: seed_url.into(),
            generated_at: Utc::now(),
            total_urls: urls.len(),
            urls,
        }
    }

    /// Serialize to pretty JSON at `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write manifest '{}'", path.display()))?;
        Ok(())
    }
}
