//! Keyword extraction for artifact naming
//!
//! Derives a handful of representative terms from extracted page text.
//! The primary path scores candidate phrases statistically (term
//! frequency weighted by first occurrence, stopword-free boundaries);
//! when it yields too little, a frequency count over stopword-filtered
//! words fills in. The extractor never fails and never returns an empty
//! list — the literal term "content" is the floor.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::config::NamingConfig;

/// Text shorter than this carries too little signal to name.
const MIN_TEXT_CHARS: usize = 50;
/// Cleaned candidates shorter than this are discarded.
const MIN_KEYWORD_CHARS: usize = 3;
/// Fewer surviving primary candidates than this triggers the fallback.
const MIN_PRIMARY_CANDIDATES: usize = 2;
/// Number of words the frequency fallback yields.
const FALLBACK_TOP_N: usize = 5;

/// German and English function words, excluded from keywords.
const STOPWORDS: &[&str] = &[
    "der", "die", "das", "den", "dem", "des", "ein", "eine", "einer", "eines", "und", "oder",
    "aber", "mit", "für", "auf", "in", "zu", "von", "nach", "the", "a", "an", "and", "or", "but",
    "with", "for", "on", "to", "of", "ist", "sind", "wird", "werden", "kann", "könnte", "sollte",
    "is", "are", "was", "were", "can", "could", "should", "would",
];

static FALLBACK_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-ZäöüÄÖÜß]{4,}\b").unwrap());

/// Statistical keyword extractor with a frequency-count fallback.
pub struct KeywordExtractor {
    num_keywords: usize,
    max_ngram: usize,
}

impl KeywordExtractor {
    pub fn new(num_keywords: usize, max_ngram: usize) -> Self {
        Self {
            num_keywords,
            max_ngram,
        }
    }

    pub fn from_config(config: &NamingConfig) -> Self {
        Self::new(config.num_keywords, config.max_ngram)
    }

    /// Extract up to `num_keywords` lowercase terms from text.
    ///
    /// Guarantees a non-empty result: text under 50 characters, or text
    /// from which nothing usable survives, yields `["content"]`.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let trimmed = text.trim();
        if trimmed.chars().count() < MIN_TEXT_CHARS {
            return vec!["content".to_string()];
        }

        let mut keywords: Vec<String> = Vec::new();
        for phrase in self.scored_candidates(trimmed) {
            let cleaned = clean_keyword(&phrase);
            if cleaned.chars().count() >= MIN_KEYWORD_CHARS && !keywords.contains(&cleaned) {
                keywords.push(cleaned);
            }
        }

        if keywords.len() < MIN_PRIMARY_CANDIDATES {
            for word in frequent_words(trimmed) {
                if !keywords.contains(&word) {
                    keywords.push(word);
                }
            }
        }

        keywords.truncate(self.num_keywords);
        if keywords.is_empty() {
            vec!["content".to_string()]
        } else {
            keywords
        }
    }

    /// Score candidate phrases of 1..=max_ngram words.
    ///
    /// A phrase may not start or end on a stopword. Score is phrase
    /// frequency times the summed member-word frequencies, damped by how
    /// late the phrase first appears — page-opening vocabulary names the
    /// page better than boilerplate near the footer.
    fn scored_candidates(&self, text: &str) -> Vec<String> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut word_freq: HashMap<&str, usize> = HashMap::new();
        for token in &tokens {
            *word_freq.entry(token.as_str()).or_insert(0) += 1;
        }

        // phrase -> (count, first token position)
        let mut candidates: HashMap<String, (usize, usize)> = HashMap::new();
        for n in 1..=self.max_ngram {
            for (pos, window) in tokens.windows(n).enumerate() {
                let first = window.first().map(String::as_str).unwrap_or_default();
                let last = window.last().map(String::as_str).unwrap_or_default();
                if STOPWORDS.contains(&first) || STOPWORDS.contains(&last) {
                    continue;
                }
                let phrase = window.join(" ");
                let entry = candidates.entry(phrase).or_insert((0, pos));
                entry.0 += 1;
            }
        }

        let total = tokens.len() as f64;
        let mut scored: Vec<(String, f64, usize)> = candidates
            .into_iter()
            .map(|(phrase, (count, first_pos))| {
                let member_weight: usize = phrase
                    .split(' ')
                    .map(|w| word_freq.get(w).copied().unwrap_or(0))
                    .sum();
                let positional = 1.0 / (1.0 + first_pos as f64 / total);
                let score = (count * member_weight) as f64 * positional;
                (phrase, score, first_pos)
            })
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.2.cmp(&b.2))
        });

        scored
            .into_iter()
            .take(self.num_keywords)
            .map(|(phrase, _, _)| phrase)
            .collect()
    }
}

/// Lowercase word stream; hyphens stay inside words, digits-only runs drop.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|w| !w.is_empty() && w.chars().any(char::is_alphabetic))
        .map(str::to_lowercase)
        .collect()
}

/// Normalize a candidate: keep word characters, spaces, and hyphens
/// (diacritics preserved), collapse whitespace, lowercase.
fn clean_keyword(keyword: &str) -> String {
    let kept: String = keyword
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Fallback: most frequent 4+-character alphabetic words, stopwords
/// excluded, ties resolved by first occurrence.
fn frequent_words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for m in FALLBACK_WORD.find_iter(&lower) {
        let word = m.as_str();
        if STOPWORDS.contains(&word) {
            continue;
        }
        if !counts.contains_key(word) {
            order.push(word.to_string());
        }
        *counts.entry(word.to_string()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = order
        .into_iter()
        .enumerate()
        .map(|(first_seen, word)| {
            let count = counts.get(&word).copied().unwrap_or(0);
            (word, count, first_seen)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(FALLBACK_TOP_N)
        .map(|(word, _, _)| word)
        .collect()
}
