//! Harvester configuration and its persistence.
//!
//! [`Settings`] mirrors the wire shape the UI layer sends with an
//! `extractLinks` request (camelCase JSON). Every field has a default, so a
//! partial settings object, or none at all, loads into a usable value.

mod error;
mod store;

pub use error::SettingsError;
pub use store::{
    JsonFileSettingsStore, MemorySettingsStore, SettingsStore, resolve_default_settings_path,
};

use serde::{Deserialize, Serialize};

/// Default file extensions treated as documents.
pub const DEFAULT_FILE_EXTENSIONS: [&str; 14] = [
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "csv", "txt", "rtf", "odt", "ods", "odp",
    "zip",
];

/// Default CSS selectors scanned for link-bearing elements.
pub const DEFAULT_LINK_SELECTORS: [&str; 3] = ["a[href]", "[data-href]", "[data-download]"];

/// Default timeout for network size probes, in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 30;

/// Upper bound accepted for `probeTimeoutSecs`.
const MAX_PROBE_TIMEOUT_SECS: u64 = 600;

/// Which entry survives when two elements resolve to the same dedup key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicatePolicy {
    /// Later matches overwrite earlier ones (map-insert semantics).
    #[default]
    LastWins,
    /// The first match is kept; later duplicates are dropped.
    FirstWins,
}

/// Extraction and export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Extensions (without leading dot) that mark a link as a document.
    pub file_extensions: Vec<String>,
    /// CSS selectors scanned for candidate elements.
    pub link_selectors: Vec<String>,
    /// Include element text as the link title.
    pub inner_content: bool,
    /// Resolve link targets against the page URL.
    pub make_absolute: bool,
    /// Skip links nested in header/footer landmark regions.
    pub ignore_header_footer_files: bool,
    /// Strip query and fragment before using a URL as the dedup key.
    pub normalize_urls: bool,
    /// Duplicate handling for equal dedup keys.
    pub duplicate_policy: DuplicatePolicy,
    /// Probe each link over HTTP for an exact size.
    pub fetch_file_sizes: bool,
    /// Fall back to a per-extension default size when nothing else is found.
    pub estimate_default_sizes: bool,
    /// Timeout for each size probe request, in seconds.
    pub probe_timeout_secs: u64,
    /// Prefix prepended to filenames for HTML snippet hrefs.
    pub href_prefix: String,
    /// Prefix prepended to filenames for the CSV media constant column.
    pub media_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_extensions: DEFAULT_FILE_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            link_selectors: DEFAULT_LINK_SELECTORS
                .iter()
                .map(ToString::to_string)
                .collect(),
            inner_content: true,
            make_absolute: true,
            ignore_header_footer_files: false,
            normalize_urls: true,
            duplicate_policy: DuplicatePolicy::LastWins,
            fetch_file_sizes: false,
            estimate_default_sizes: true,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            href_prefix: String::new(),
            media_prefix: String::new(),
        }
    }
}

impl Settings {
    /// Validates values against extraction constraints.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] for empty extension or selector
    /// lists and out-of-range probe timeouts.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.normalized_extensions().is_empty() {
            return Err(SettingsError::invalid(
                "fileExtensions",
                "at least one non-empty extension is required",
            ));
        }
        if self.link_selectors.iter().all(|s| s.trim().is_empty()) {
            return Err(SettingsError::invalid(
                "linkSelectors",
                "at least one non-empty selector is required",
            ));
        }
        if !(1..=MAX_PROBE_TIMEOUT_SECS).contains(&self.probe_timeout_secs) {
            return Err(SettingsError::invalid(
                "probeTimeoutSecs",
                format!(
                    "{} is out of range, expected 1..={MAX_PROBE_TIMEOUT_SECS}",
                    self.probe_timeout_secs
                ),
            ));
        }
        Ok(())
    }

    /// Extensions lowercased, trimmed of whitespace and leading dots, empties removed.
    #[must_use]
    pub fn normalized_extensions(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for raw in &self.file_extensions {
            let ext = raw.trim().trim_start_matches('.').to_lowercase();
            if !ext.is_empty() && !out.contains(&ext) {
                out.push(ext);
            }
        }
        out
    }
}
