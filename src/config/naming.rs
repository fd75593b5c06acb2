//! Artifact naming configuration

use serde::{Deserialize, Serialize};

/// Configuration for keyword extraction and artifact naming
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Number of keywords composed into the artifact name
    pub num_keywords: usize,
    /// Maximum n-gram size for keyword candidates (1 = single words)
    pub max_ngram: usize,
    /// Maximum total length of a composed artifact name; when exceeded,
    /// the keyword segment is dropped entirely
    pub max_name_len: usize,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            num_keywords: 3,
            max_ngram: 2,
            max_name_len: 150,
        }
    }
}
