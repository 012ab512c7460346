//! Error types for link scanning.
//!
//! Only setup failures live here. Per-selector and per-element problems are
//! logged and skipped during the scan instead of being returned.

use thiserror::Error;

/// Errors that prevent a scan from starting.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The page URL cannot serve as a base for resolving relative links.
    #[error("invalid page URL '{url}': {reason}")]
    InvalidPageUrl {
        /// The page URL as supplied.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The extension pattern could not be compiled.
    #[error("failed to compile extension pattern: {source}")]
    Pattern {
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// The settings were rejected before scanning.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),
}

impl ScanError {
    /// Creates an `InvalidPageUrl` error.
    #[must_use]
    pub fn invalid_page_url(url: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPageUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
