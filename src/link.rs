//! The extracted-link record returned to callers.

use serde::{Deserialize, Serialize};

use crate::metadata::{LinkMetadata, SizeSource, tooltip};

/// A document link found on a page, with inferred metadata.
///
/// Lives only for the duration of one extraction; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedLink {
    /// Link target, absolute when URL resolution is enabled.
    pub url: String,
    /// Element text or accessible name; empty when unavailable or disabled.
    pub title: String,
    /// Slugified filename with extension.
    pub filename_with_ext: String,
    /// Slugified filename without extension.
    pub filename_without_ext: String,
    /// Lowercase extension without dot, possibly empty.
    pub extension: String,
    /// Size in bytes, when one could be determined.
    pub estimated_size: Option<u64>,
    /// Origin of `estimated_size`.
    pub size_source: Option<SizeSource>,
    /// `"{EXT}, {size}, opens in a new window"`.
    pub tooltip: String,
    /// Page the link was found on.
    pub page_url: String,
}

impl ExtractedLink {
    /// Builds a link from resolved metadata.
    #[must_use]
    pub fn new(url: String, title: String, metadata: LinkMetadata, page_url: &str) -> Self {
        let tooltip = tooltip(&metadata.names.extension, metadata.estimated_size);
        Self {
            url,
            title,
            filename_with_ext: metadata.names.with_ext,
            filename_without_ext: metadata.names.without_ext,
            extension: metadata.names.extension,
            estimated_size: metadata.estimated_size,
            size_source: metadata.size_source,
            tooltip,
            page_url: page_url.to_string(),
        }
    }

    /// Replaces the size estimate and refreshes the tooltip.
    pub fn set_size(&mut self, bytes: u64, source: SizeSource) {
        self.estimated_size = Some(bytes);
        self.size_source = Some(source);
        self.tooltip = tooltip(&self.extension, self.estimated_size);
    }
}
