//! pagepress: press a website into paginated document artifacts
//!
//! Crawls a single site breadth-first from a seed URL, extracts cleaned
//! prose from each page, and emits one paginated document per page with
//! a content-derived name. Features:
//! - Bounded BFS frontier with domain scoping and ignore patterns
//! - Fetch retry/backoff with rendering-session recycling
//! - Heuristic prose extraction (schedule/timetable noise removal)
//! - Statistical keyword naming with a frequency-count fallback
//! - Pluggable page-rendering and document-layout collaborators

pub mod config;
pub mod crawl;
pub mod document;
pub mod extract;
pub mod pipeline;
pub mod util;

pub use config::Config;
pub use pipeline::{Pipeline, RunStats};
