//! Document renderer collaborator seam
//!
//! A [`DocumentRenderer`] consumes the assembled block sequence plus page
//! geometry and writes a paginated artifact to a path. Layout backends
//! (PDF, text) plug in behind the trait; the pipeline only ever sees the
//! trait. Failures are reported, never swallowed — the orchestrator
//! counts them as page-level errors.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::ContentBlock;

/// Errors while producing an artifact.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to write artifact '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Page dimensions in character cells.
#[derive(Debug, Clone)]
pub struct PageGeometry {
    /// Maximum characters per line before wrapping
    pub max_line_chars: usize,
    /// Lines per page before a page break
    pub lines_per_page: usize,
}

impl Default for PageGeometry {
    fn default() -> Self {
        // Roughly an A4 page at a 10pt monospace face
        Self {
            max_line_chars: 90,
            lines_per_page: 54,
        }
    }
}

/// Layout backend turning blocks into a paginated artifact.
pub trait DocumentRenderer {
    /// File extension (without dot) of the artifacts this backend writes.
    fn file_extension(&self) -> &'static str;

    /// Lay out the blocks and write the artifact to `output_path`.
    fn render(
        &self,
        blocks: &[ContentBlock],
        geometry: &PageGeometry,
        output_path: &Path,
    ) -> Result<(), DocumentError>;
}

/// Plain-text layout backend: wraps lines to the page width, breaks pages
/// with a form feed every `lines_per_page` lines.
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self {
        Self
    }

    fn layout(blocks: &[ContentBlock], geometry: &PageGeometry) -> Vec<String> {
        let width = geometry.max_line_chars.max(1);
        let mut lines = Vec::new();

        for block in blocks {
            match block {
                ContentBlock::Title(text) => {
                    lines.extend(wrap_line(text, width));
                    lines.push("=".repeat(width.min(text.chars().count().max(1))));
                    lines.push(String::new());
                }
                ContentBlock::Metadata(text) => {
                    lines.extend(wrap_line(text, width));
                }
                ContentBlock::Heading(text) => {
                    lines.push(String::new());
                    lines.extend(wrap_line(text, width));
                    lines.push("-".repeat(width.min(text.chars().count().max(1))));
                }
                ContentBlock::Body(text) => {
                    lines.extend(wrap_line(text, width));
                    lines.push(String::new());
                }
                ContentBlock::Spacer => {
                    lines.push(String::new());
                }
                ContentBlock::Footer(text) => {
                    lines.push("-".repeat(width));
                    lines.extend(wrap_line(text, width));
                }
            }
        }

        lines
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer for TextRenderer {
    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn render(
        &self,
        blocks: &[ContentBlock],
        geometry: &PageGeometry,
        output_path: &Path,
    ) -> Result<(), DocumentError> {
        let lines = Self::layout(blocks, geometry);

        let per_page = geometry.lines_per_page.max(1);
        let mut out = String::new();
        for (page_index, page) in lines.chunks(per_page).enumerate() {
            if page_index > 0 {
                out.push('\u{0C}');
                out.push('\n');
            }
            for line in page {
                out.push_str(line);
                out.push('\n');
            }
        }

        fs::write(output_path, out).map_err(|source| DocumentError::Io {
            path: output_path.to_path_buf(),
            source,
        })
    }
}

/// Greedy word wrap; words longer than the width get a line of their own.
fn wrap_line(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();
        if current.is_empty() {
            current = word.to_string();
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
