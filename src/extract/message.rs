//! Wire shapes for the `extractLinks` exchange.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::link::ExtractedLink;
use crate::settings::Settings;

/// The only action the extractor answers.
pub const EXTRACT_LINKS_ACTION: &str = "extractLinks";

/// Inbound request from a driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    /// Must be `extractLinks`.
    pub action: String,
    /// Extraction settings; omitted fields take their defaults.
    #[serde(default)]
    pub settings: Settings,
    /// URL of the page being scanned.
    pub page_url: String,
}

impl ExtractRequest {
    /// Builds an `extractLinks` request.
    #[must_use]
    pub fn new(settings: Settings, page_url: impl Into<String>) -> Self {
        Self {
            action: EXTRACT_LINKS_ACTION.to_string(),
            settings,
            page_url: page_url.into(),
        }
    }
}

/// Outbound response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractResponse {
    /// Extraction completed.
    #[serde(rename_all = "camelCase")]
    Success {
        /// Always `true`.
        success: bool,
        /// Links found on the page.
        links: Vec<ExtractedLink>,
        /// Echo of the request's page URL.
        page_url: String,
        /// Milliseconds since the Unix epoch.
        timestamp: u64,
    },
    /// Extraction failed as a whole.
    Failure {
        /// Always `false`.
        success: bool,
        /// Human-readable reason.
        error: String,
    },
}

impl ExtractResponse {
    /// Success response stamped with the current time.
    #[must_use]
    pub fn success(links: Vec<ExtractedLink>, page_url: &str) -> Self {
        Self::Success {
            success: true,
            links,
            page_url: page_url.to_string(),
            timestamp: now_millis(),
        }
    }

    /// Failure response carrying `error`'s message.
    #[must_use]
    pub fn failure(error: &dyn std::error::Error) -> Self {
        Self::Failure {
            success: false,
            error: error.to_string(),
        }
    }

    /// Whether this is a success response.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Links carried by a success response; empty for failures.
    #[must_use]
    pub fn links(&self) -> &[ExtractedLink] {
        match self {
            Self::Success { links, .. } => links,
            Self::Failure { .. } => &[],
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
