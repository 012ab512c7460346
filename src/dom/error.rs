//! Error types for DOM queries.

use thiserror::Error;

/// Errors that can occur while querying a parsed page.
#[derive(Debug, Clone, Error)]
pub enum DomError {
    /// A CSS selector could not be parsed.
    #[error("invalid CSS selector '{selector}': {reason}")]
    InvalidSelector {
        /// The selector as configured.
        selector: String,
        /// Parser message.
        reason: String,
    },
}

impl DomError {
    /// Creates an `InvalidSelector` error.
    #[must_use]
    pub fn invalid_selector(selector: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}
