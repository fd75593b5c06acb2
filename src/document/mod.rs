//! Document model: typed content blocks and the assembler
//!
//! Turns cleaned text plus metadata into an ordered sequence of typed
//! blocks ready for an external layout backend. The assembler decides
//! structure (what is a heading, where paragraphs split); how blocks
//! become ink on a page is the renderer's problem.

pub mod name;
pub mod render;

pub use name::ArtifactNamer;
pub use render::{DocumentError, DocumentRenderer, PageGeometry, TextRenderer};

use chrono::{DateTime, Utc};

/// One extracted page, ready for assembly.
///
/// `index`/`total` fix the pagination context; they are only known at
/// generation time, after the full discovery phase.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Source URL the lines came from
    pub url: String,
    /// Cleaned, non-empty text lines
    pub lines: Vec<String>,
    /// 1-based position in the generation sequence
    pub index: usize,
    /// Total number of documents in this run
    pub total: usize,
}

/// Typed layout block consumed by a [`DocumentRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Title(String),
    Metadata(String),
    Heading(String),
    Body(String),
    Spacer,
    Footer(String),
}

/// A line shorter than this that is fully upper-case reads as a heading.
const MAX_HEADING_CHARS: usize = 100;
/// Lines longer than this split into one body block per sentence.
const MAX_BODY_LINE_CHARS: usize = 500;

/// Builds the block sequence for one document.
pub struct DocumentAssembler;

impl DocumentAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Assemble title, metadata, body, and footer blocks.
    pub fn assemble(
        &self,
        document: &ExtractedDocument,
        keywords: &[String],
        generated_at: DateTime<Utc>,
    ) -> Vec<ContentBlock> {
        let mut blocks = Vec::with_capacity(document.lines.len() + 8);

        blocks.push(ContentBlock::Title(format!(
            "Page {} of {}",
            document.index, document.total
        )));
        blocks.push(ContentBlock::Metadata(format!("URL: {}", document.url)));
        blocks.push(ContentBlock::Metadata(format!(
            "Created: {}",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        )));
        blocks.push(ContentBlock::Metadata(format!(
            "Keywords: {}",
            keywords.join(", ")
        )));
        blocks.push(ContentBlock::Spacer);

        for line in &document.lines {
            let line = line.trim();
            if line.is_empty() {
                blocks.push(ContentBlock::Spacer);
                continue;
            }

            if line.chars().count() < MAX_HEADING_CHARS && is_all_uppercase(line) {
                blocks.push(ContentBlock::Heading(line.to_string()));
            } else if line.chars().count() > MAX_BODY_LINE_CHARS {
                for sentence in split_sentences(line) {
                    blocks.push(ContentBlock::Body(sentence));
                }
            } else {
                blocks.push(ContentBlock::Body(line.to_string()));
            }
        }

        blocks.push(ContentBlock::Spacer);
        blocks.push(ContentBlock::Footer(format!(
            "Page {} of {} | pagepress",
            document.index, document.total
        )));

        blocks
    }
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// True when the line has alphabetic content and none of it is lowercase.
fn is_all_uppercase(line: &str) -> bool {
    line.chars().any(char::is_alphabetic) && !line.chars().any(char::is_lowercase)
}

/// Split a long line at sentence-ending punctuation followed by
/// whitespace; the terminator stays with its sentence.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if matches!(ch, '.' | '!' | '?') {
            let end = idx + ch.len_utf8();
            let rest = &text[end..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                let piece = text[start..end].trim();
                if !piece.is_empty() {
                    sentences.push(piece.to_string());
                }
                start = end;
            }
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}
