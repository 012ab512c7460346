//! Metadata inference for matched document links.
//!
//! Given an element and its resolved URL, the [`MetadataResolver`] derives
//! slugified filename variants, the extension, and a size estimate. It never
//! fails: if filename derivation errors out, a synthetic `document-{millis}`
//! name is substituted and extension/size are still derived from the URL.
//!
//! # Size resolution order
//!
//! 1. Exact, via a [`SizeProbe`] (applied after the DOM pass, see
//!    [`crate::extract`])
//! 2. Heuristic, from page markup ([`estimate_from_markup`])
//! 3. Static per-extension default ([`default_size_for_extension`])

mod error;
pub mod filename;
mod heuristics;
mod probe;
pub mod size;

pub use error::{MetadataError, ProbeError};
pub use filename::{FilenameVariants, extract_extension, slugify};
pub use heuristics::estimate_from_markup;
pub use probe::{HttpSizeProbe, SizeProbe, parse_content_range_total};
pub use size::{SizeSource, UNKNOWN_SIZE, default_size_for_extension, human_file_size, to_bytes};

use scraper::ElementRef;
use tracing::{debug, warn};

use crate::dom::{attr_non_empty, clean_text};
use filename::{derive_filename, filename_variants, synthetic_filename};

/// Tooltip label used when a link has no extension.
const NO_EXTENSION_LABEL: &str = "FILE";

/// Metadata derived for one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMetadata {
    /// Slugified filename variants and extension.
    pub names: FilenameVariants,
    /// Estimated size in bytes.
    pub estimated_size: Option<u64>,
    /// Where the estimate came from.
    pub size_source: Option<SizeSource>,
}

/// Derives filenames and size estimates from elements.
#[derive(Debug, Clone, Copy)]
pub struct MetadataResolver {
    use_default_sizes: bool,
}

impl Default for MetadataResolver {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MetadataResolver {
    /// Creates a resolver. With `use_default_sizes` off, links without a
    /// markup hint get no size at all.
    #[must_use]
    pub fn new(use_default_sizes: bool) -> Self {
        Self { use_default_sizes }
    }

    /// Resolves filename variants and a markup/default size for `element`.
    #[must_use]
    pub fn resolve(&self, element: ElementRef<'_>, url: &str) -> LinkMetadata {
        let text = clean_text(element);
        let url_extension = extract_extension(url);

        let raw_name = match derive_filename(attr_non_empty(element, "data-filename"), url, &text)
        {
            Ok(Some(name)) => name,
            Ok(None) => synthetic_filename(&url_extension),
            Err(error) => {
                warn!(url, error = %error, "filename derivation failed; using synthetic name");
                synthetic_filename(&url_extension)
            }
        };
        let names = filename_variants(&raw_name, &url_extension);

        let (estimated_size, size_source) = self.estimate_size(element, &names.extension);
        debug!(
            url,
            filename = %names.with_ext,
            size = ?estimated_size,
            source = ?size_source,
            "link metadata resolved"
        );

        LinkMetadata {
            names,
            estimated_size,
            size_source,
        }
    }

    fn estimate_size(
        &self,
        element: ElementRef<'_>,
        extension: &str,
    ) -> (Option<u64>, Option<SizeSource>) {
        if let Some(bytes) = estimate_from_markup(element) {
            return (Some(bytes), Some(SizeSource::Heuristic));
        }
        if self.use_default_sizes {
            return (
                Some(default_size_for_extension(extension)),
                Some(SizeSource::Default),
            );
        }
        (None, None)
    }
}

/// `"{EXT}, {size}, opens in a new window"`.
#[must_use]
pub fn tooltip(extension: &str, size: Option<u64>) -> String {
    format!(
        "{}, {}, opens in a new window",
        extension_label(extension),
        human_file_size(size)
    )
}

/// Uppercase extension, or `FILE` when there is none.
#[must_use]
pub fn extension_label(extension: &str) -> String {
    if extension.is_empty() {
        NO_EXTENSION_LABEL.to_string()
    } else {
        extension.to_uppercase()
    }
}
