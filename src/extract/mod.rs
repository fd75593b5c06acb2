//! Content extraction from HTML
//!
//! Strips structural and non-prose DOM nodes, flattens the remainder to
//! one logical line per block boundary, and drops lines that look like
//! schedule/timetable noise rather than prose. The thresholds are fixed
//! heuristics tuned against the sites this tool targets; they are
//! deliberately not configurable.
//!
//! Extraction never fails: anything that cannot be parsed degrades to an
//! empty line sequence, which downstream treats as "no content".

pub mod keywords;

pub use keywords::KeywordExtractor;

use regex::Regex;
use scraper::node::Node;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

/// Tags whose subtrees never contain prose. Tables are removed entirely —
/// on the target sites they encode schedules and timetables, not content.
const STRIP_TAGS: &[&str] = &[
    "script", "style", "meta", "link", "noscript", "svg", "iframe", "nav", "header", "footer",
    "aside", "table", "thead", "tbody", "tfoot", "tr", "td", "th",
];

/// Container class/id substrings that mark booking and scheduling widgets
/// (German and English variants).
const NOISE_MARKERS: &[&str] = &[
    "schedule",
    "timetable",
    "kursplan",
    "course",
    "zeitplan",
    "booking",
    "calendar",
    "datepicker",
    "event",
    "kalender",
    "termin",
    "buchen",
    "reservation",
    "availability",
];

/// Elements that terminate a logical line.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "li", "tr", "blockquote",
];

/// A line with more colons than this is a structured key:value dump.
const MAX_COLONS_PER_LINE: usize = 5;
/// A line with more `d.d` date tokens than this is a schedule row.
const MAX_DATE_TOKENS_PER_LINE: usize = 5;
/// A line with more weekday names than this is a timetable header.
const MAX_WEEKDAYS_PER_LINE: usize = 3;

/// Weekday tokens, English and German, compared whole-word.
const WEEKDAYS: &[&str] = &[
    "mon",
    "tue",
    "wed",
    "thu",
    "fri",
    "sat",
    "sun",
    "montag",
    "dienstag",
    "mittwoch",
    "donnerstag",
    "freitag",
    "samstag",
    "sonntag",
];

static DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}\.\d{1,2}").unwrap());

/// HTML-to-prose extractor.
pub struct ContentExtractor;

impl ContentExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract cleaned text lines from raw markup.
    ///
    /// Pipeline: drop non-prose subtrees and noise containers, flatten to
    /// lines at block boundaries, then drop lines failing the noise
    /// filters. Idempotent: re-running on already-cleaned text changes
    /// nothing.
    pub fn extract_text(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        let mut text = String::new();
        let mut at_block_boundary = false;
        collect_text(document.tree.root(), &mut text, &mut at_block_boundary);

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !is_noise_line(line))
            .map(str::to_string)
            .collect()
    }

    /// Extract absolute link targets from a page.
    ///
    /// Anchors and empty hrefs are skipped; relative hrefs are joined
    /// against the page URL. Only http(s) links are returned; frontier
    /// policy (dedup, scoping, ignore patterns) is applied by the caller.
    pub fn extract_links(&self, html: &str, page_url: &str) -> Vec<String> {
        let base = match Url::parse(page_url) {
            Ok(url) => url,
            Err(_) => return Vec::new(),
        };

        let anchor_selector = match Selector::parse("a[href]") {
            Ok(selector) => selector,
            Err(_) => return Vec::new(),
        };

        let document = Html::parse_document(html);
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for element in document.select(&anchor_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let href = href.trim();
            if href.is_empty() || href.starts_with('#') {
                continue;
            }
            if let Ok(url) = base.join(href) {
                if (url.scheme() == "http" || url.scheme() == "https")
                    && seen.insert(url.as_str().to_string())
                {
                    links.push(url.as_str().to_string());
                }
            }
        }

        links
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first text collection that skips stripped subtrees and inserts
/// a line break at every block boundary.
fn collect_text(
    node: ego_tree::NodeRef<'_, Node>,
    out: &mut String,
    at_block_boundary: &mut bool,
) {
    if let Some(element) = node.value().as_element() {
        let name = element.name();
        if STRIP_TAGS.contains(&name) {
            return;
        }
        if matches!(name, "div" | "section") && has_noise_marker(element) {
            return;
        }
        if BLOCK_TAGS.contains(&name) {
            *at_block_boundary = true;
        }
    }

    if let Some(text) = node.value().as_text() {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            if !out.is_empty() {
                out.push(if *at_block_boundary { '\n' } else { ' ' });
            }
            out.push_str(trimmed);
            *at_block_boundary = false;
        }
    }

    for child in node.children() {
        collect_text(child, out, at_block_boundary);
    }

    if let Some(element) = node.value().as_element() {
        if BLOCK_TAGS.contains(&element.name()) {
            *at_block_boundary = true;
        }
    }
}

fn has_noise_marker(element: &scraper::node::Element) -> bool {
    let class = element.attr("class").unwrap_or_default().to_lowercase();
    let id = element.attr("id").unwrap_or_default().to_lowercase();
    NOISE_MARKERS
        .iter()
        .any(|marker| class.contains(marker) || id.contains(marker))
}

fn is_noise_line(line: &str) -> bool {
    if line.matches(':').count() > MAX_COLONS_PER_LINE {
        return true;
    }
    if DATE_TOKEN.find_iter(line).count() > MAX_DATE_TOKENS_PER_LINE {
        return true;
    }
    let weekday_count = line
        .split_whitespace()
        .filter(|word| WEEKDAYS.contains(&word.to_lowercase().as_str()))
        .count();
    weekday_count > MAX_WEEKDAYS_PER_LINE
}
