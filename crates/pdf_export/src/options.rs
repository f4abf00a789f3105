//! Export configuration.

use serde::{Deserialize, Serialize};

/// Options for profile PDF export.
///
/// Layout (fonts, sizes, colors, margins) is fixed per semantic role and
/// deliberately not configurable; only document metadata and the
/// compression toggle vary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    /// Document title metadata
    #[serde(default)]
    pub title: Option<String>,
    /// Document author metadata
    #[serde(default)]
    pub author: Option<String>,
    /// Whether to compress content streams
    #[serde(default = "default_compress")]
    pub compress: bool,
}

fn default_compress() -> bool {
    true
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            compress: default_compress(),
        }
    }
}

impl ExportOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title metadata
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the document author metadata
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Enable or disable content-stream compression
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}
