//! Output location configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where artifacts and the discovery manifest are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory that receives document artifacts and the manifest
    pub dir: PathBuf,
    /// Filename of the discovery manifest inside `dir`
    pub manifest_filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("pagepress-out"),
            manifest_filename: "discovered_urls.json".to_string(),
        }
    }
}
