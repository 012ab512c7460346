//! CSV and HTML-snippet renderings of extracted links.

mod csv;
mod error;
mod html;

pub use self::csv::{CSV_HEADER, render_csv};
pub use error::ExportError;
pub use html::{escape_html, render_html_snippet};

use crate::download::BatchSummary;
use crate::link::ExtractedLink;

/// Per-link status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// Found on the page, not downloaded.
    Found,
    /// Saved by a download batch.
    Downloaded,
    /// A download was attempted and failed.
    Failed,
}

impl LinkStatus {
    /// Lowercase label used in exports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Found => "found",
            Self::Downloaded => "downloaded",
            Self::Failed => "failed",
        }
    }

    /// Status of `link` given an optional download batch.
    #[must_use]
    pub fn of(link: &ExtractedLink, batch: Option<&BatchSummary>) -> Self {
        match batch.and_then(|summary| summary.outcome_for(&link.url)) {
            None => Self::Found,
            Some(outcome) if outcome.is_success() => Self::Downloaded,
            Some(_) => Self::Failed,
        }
    }
}
