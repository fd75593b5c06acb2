//! Content-derived artifact naming
//!
//! Composes `{seq}_{timestamp}_{keywords}_{domain}.{ext}` — a name that
//! stays stable, human-readable, and collision-resistant: the zero-padded
//! sequence number and timestamp disambiguate, the keywords and domain
//! tell a human what is inside without opening it.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::config::NamingConfig;
use crate::util::truncate_chars;

/// Keyword segment is capped at this many characters before sanitizing.
const MAX_KEYWORD_SEGMENT_CHARS: usize = 50;
/// Domain segment is capped at this many characters.
const MAX_DOMAIN_SEGMENT_CHARS: usize = 30;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s\-]").unwrap());
static NON_WORD_OR_HYPHEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\-]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Derives artifact filenames bounded to a configured maximum length.
pub struct ArtifactNamer {
    max_name_len: usize,
}

impl ArtifactNamer {
    pub fn new(config: &NamingConfig) -> Self {
        Self {
            max_name_len: config.max_name_len,
        }
    }

    /// Compose the artifact name for one document.
    ///
    /// If the full composition exceeds the configured bound, the keyword
    /// segment is dropped and sequence+timestamp+domain alone are used —
    /// those three are always enough to keep names unique and traceable.
    pub fn artifact_name(
        &self,
        url: &str,
        keywords: &[String],
        sequence: usize,
        generated_at: DateTime<Utc>,
        extension: &str,
    ) -> String {
        let domain = sanitize_domain(url);
        let keyword_segment = sanitize_keywords(keywords);
        let timestamp = generated_at.format("%Y%m%d_%H%M%S");

        let name = format!(
            "{:03}_{}_{}_{}.{}",
            sequence, timestamp, keyword_segment, domain, extension
        );
        if name.chars().count() > self.max_name_len {
            return format!("{:03}_{}_{}.{}", sequence, timestamp, domain, extension);
        }
        name
    }
}

/// Host with `www.` stripped, non-word characters replaced, capped.
fn sanitize_domain(url: &str) -> String {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let cleaned = NON_WORD_OR_HYPHEN.replace_all(host, "_");
    truncate_chars(&cleaned, MAX_DOMAIN_SEGMENT_CHARS)
}

/// Join keywords, cap length, strip anything outside word/space/hyphen,
/// collapse whitespace runs to single underscores.
fn sanitize_keywords(keywords: &[String]) -> String {
    let joined = truncate_chars(&keywords.join("_"), MAX_KEYWORD_SEGMENT_CHARS);
    let cleaned = NON_WORD.replace_all(&joined, "");
    WHITESPACE.replace_all(&cleaned, "_").to_string()
}
