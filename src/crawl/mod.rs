//! Crawl subsystem: URL normalization, the BFS frontier, and fetching
//!
//! The crawl is a single-worker, strictly sequential loop. One renderer
//! session is shared across all fetches, so nothing here is concurrent.
//!
//! Key components:
//! - [`normalize_url`]: canonical URL rewriting so equivalent pages compare equal
//! - [`Frontier`]: BFS queue + visited set bounding total discovered pages
//! - [`PageRenderer`]: the page-rendering collaborator seam
//! - [`FetchController`]: retry/backoff and session-recycling policy

pub mod fetcher;
pub mod frontier;
pub mod renderer;

pub use fetcher::{FetchController, FetchOutcome};
pub use frontier::{Frontier, FrontierPhase};
pub use renderer::{HttpRenderer, HttpRendererConfig, PageRenderer, RenderError};

use url::Url;

/// Normalize a URL so equivalent pages compare equal.
///
/// - A missing scheme gets `https://` prepended
/// - `http` is rewritten to `https`
/// - The trailing slash is stripped from non-root paths
/// - Query string and fragment are removed entirely: two URLs differing
///   only in query parameters are treated as the same page. That is a
///   policy choice — on the sites this tool targets, query parameters
///   select views of the same content, not different pages.
///
/// Unparseable input is returned unchanged; normalization never fails,
/// malformed URLs just don't deduplicate.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let mut url = match Url::parse(&candidate) {
        Ok(url) => url,
        Err(_) => return raw.to_string(),
    };

    if url.scheme() == "http" {
        // http and https are the same special-scheme category, so this
        // cannot fail; ignore the Result.
        let _ = url.set_scheme("https");
    }

    url.set_query(None);
    url.set_fragment(None);

    let path = url.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        url.set_path(path.trim_end_matches('/'));
    }

    url.to_string()
}

/// Host of a URL string, if it has one.
pub(crate) fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_prepends_https_for_schemeless_input() {
        assert_eq!(normalize_url("example.com/about"), "https://example.com/about");
    }

    #[test]
    fn normalize_upgrades_http_to_https() {
        assert_eq!(normalize_url("http://example.com/a"), "https://example.com/a");
    }

    #[test]
    fn normalize_strips_trailing_slash_from_non_root_path() {
        assert_eq!(normalize_url("https://example.com/about/"), "https://example.com/about");
    }

    #[test]
    fn normalize_keeps_root_path_as_slash() {
        assert_eq!(normalize_url("https://example.com"), "https://example.com/");
        assert_eq!(normalize_url("https://example.com/"), "https://example.com/");
    }

    #[test]
    fn normalize_drops_query_and_fragment() {
        let a = normalize_url("https://example.com/page?utm=1&b=2");
        let b = normalize_url("https://example.com/page#section");
        let c = normalize_url("https://example.com/page");
        assert_eq!(a, c);
        assert_eq!(b, c);
    }

    #[test]
    fn normalize_passes_through_unparseable_input() {
        assert_eq!(normalize_url("::not a url::"), "::not a url::");
    }
}
