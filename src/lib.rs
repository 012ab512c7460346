//! Doclinks Core Library
//!
//! Finds document links (PDF, DOC, XLS, ...) on an HTML page, infers a
//! slugified filename, extension and size for each, and exports or
//! downloads them.
//!
//! # Architecture
//!
//! - [`dom`] - parsed page, selector evaluation, text and landmark helpers
//! - [`settings`] - extraction settings and their JSON store
//! - [`scanner`] - selector walk, URL resolution, extension filter, dedup
//! - [`metadata`] - filename/extension derivation, size heuristics and probes
//! - [`extract`] - `extractLinks` request/response and the extraction pipeline
//! - [`export`] - CSV and HTML-snippet renderings
//! - [`download`] - page fetch and sequential bulk download

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dom;
pub mod download;
pub mod export;
pub mod extract;
pub mod link;
pub mod metadata;
pub mod scanner;
pub mod settings;
mod user_agent;

// Re-export commonly used types
pub use dom::{DomError, Page};
pub use download::{BatchSummary, DownloadError, HttpClient, LinkDownloader, download_links};
pub use export::{ExportError, LinkStatus, render_csv, render_html_snippet};
pub use extract::{
    ExtractError, ExtractRequest, ExtractResponse, Extraction, extract_links, handle_request,
};
pub use link::ExtractedLink;
pub use metadata::{HttpSizeProbe, MetadataResolver, ProbeError, SizeProbe, SizeSource};
pub use scanner::{LinkScanner, ScanError, ScanStats};
pub use settings::{
    DuplicatePolicy, JsonFileSettingsStore, MemorySettingsStore, Settings, SettingsError,
    SettingsStore,
};
