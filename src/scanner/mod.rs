//! Link scanning: from a parsed page to deduplicated document links.
//!
//! For every configured selector the scanner collects matching elements,
//! reads their link target (`href`, then `data-href`, then `data-download`),
//! optionally resolves it against the page URL, filters by extension, and
//! hands the element to the [`MetadataResolver`]. A selector that fails to
//! parse is logged and skipped; an element whose target cannot be resolved
//! is skipped. Neither stops the scan.

mod dedup;
mod error;
mod pattern;

pub use dedup::{InsertOutcome, LinkSet, normalize_url};
pub use error::ScanError;
pub use pattern::ExtensionMatcher;

use scraper::ElementRef;
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::dom::{LandmarkRegions, Page, attr_non_empty, clean_text};
use crate::link::ExtractedLink;
use crate::metadata::MetadataResolver;
use crate::settings::Settings;

/// Attributes read for the link target, in priority order.
const TARGET_ATTRIBUTES: [&str; 3] = ["href", "data-href", "data-download"];

/// Attributes used for the title when element text is empty, in order.
const TITLE_ATTRIBUTES: [&str; 3] = ["title", "aria-label", "data-title"];

/// Counters describing one scan, for logging and diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Selectors that failed to parse.
    pub selectors_failed: usize,
    /// Elements visited across all selectors.
    pub elements_seen: usize,
    /// Elements without a usable target.
    pub skipped_no_target: usize,
    /// Elements whose target could not be resolved to a URL.
    pub skipped_unresolvable: usize,
    /// Elements inside header/footer regions.
    pub skipped_landmark: usize,
    /// Targets not ending in a configured extension.
    pub skipped_extension: usize,
    /// Matches that collided with an earlier dedup key.
    pub duplicates: usize,
}

/// Result of scanning one page.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Deduplicated links in first-insertion order.
    pub links: Vec<ExtractedLink>,
    /// Scan counters.
    pub stats: ScanStats,
}

/// Scans pages for document links according to [`Settings`].
#[derive(Debug, Clone)]
pub struct LinkScanner<'s> {
    settings: &'s Settings,
    page_url: String,
    base: Option<Url>,
    matcher: ExtensionMatcher,
    resolver: MetadataResolver,
}

impl<'s> LinkScanner<'s> {
    /// Prepares a scanner for links found on `page_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] when the settings are invalid, the extension
    /// pattern fails to compile, or absolute URLs are requested and
    /// `page_url` is not a valid base URL.
    pub fn new(settings: &'s Settings, page_url: &str) -> Result<Self, ScanError> {
        settings.validate()?;
        let matcher = ExtensionMatcher::new(&settings.normalized_extensions())?;
        let base = if settings.make_absolute {
            let parsed = Url::parse(page_url)
                .map_err(|e| ScanError::invalid_page_url(page_url, e.to_string()))?;
            Some(parsed)
        } else {
            None
        };
        Ok(Self {
            settings,
            page_url: page_url.to_string(),
            base,
            matcher,
            resolver: MetadataResolver::new(settings.estimate_default_sizes),
        })
    }

    /// Scans `page`, returning deduplicated links and counters.
    #[must_use]
    pub fn scan(&self, page: &Page) -> ScanOutcome {
        let mut stats = ScanStats::default();
        let mut links = LinkSet::new(self.settings.duplicate_policy);
        let landmarks = if self.settings.ignore_header_footer_files {
            page.landmark_regions()
        } else {
            LandmarkRegions::default()
        };

        for selector in &self.settings.link_selectors {
            let selector = selector.trim();
            if selector.is_empty() {
                continue;
            }
            let elements = match page.select(selector) {
                Ok(elements) => elements,
                Err(error) => {
                    warn!(error = %error, "skipping selector");
                    stats.selectors_failed += 1;
                    continue;
                }
            };
            trace!(selector, count = elements.len(), "selector matched");

            for element in elements {
                stats.elements_seen += 1;
                self.scan_element(element, &landmarks, &mut links, &mut stats);
            }
        }

        info!(
            page_url = %self.page_url,
            links = links.len(),
            elements = stats.elements_seen,
            duplicates = stats.duplicates,
            selectors_failed = stats.selectors_failed,
            "page scanned"
        );

        ScanOutcome {
            links: links.into_links(),
            stats,
        }
    }

    fn scan_element(
        &self,
        element: ElementRef<'_>,
        landmarks: &LandmarkRegions<'_>,
        links: &mut LinkSet,
        stats: &mut ScanStats,
    ) {
        let Some(target) = link_target(element) else {
            stats.skipped_no_target += 1;
            return;
        };

        let Some(url) = self.resolve_target(target) else {
            stats.skipped_unresolvable += 1;
            return;
        };

        let key = if self.settings.normalize_urls {
            normalize_url(&url).to_string()
        } else {
            url.clone()
        };

        if landmarks.contains(element) {
            trace!(url = %url, "skipping link inside header/footer");
            stats.skipped_landmark += 1;
            return;
        }

        if !self.matcher.matches(&key) {
            stats.skipped_extension += 1;
            return;
        }

        let title = if self.settings.inner_content {
            element_title(element)
        } else {
            String::new()
        };
        let metadata = self.resolver.resolve(element, &url);
        let link = ExtractedLink::new(url, title, metadata, &self.page_url);

        match links.insert(key, link) {
            InsertOutcome::Inserted => {}
            outcome @ (InsertOutcome::Replaced | InsertOutcome::Skipped) => {
                debug!(?outcome, "duplicate link");
                stats.duplicates += 1;
            }
        }
    }

    fn resolve_target(&self, target: &str) -> Option<String> {
        let Some(base) = &self.base else {
            return Some(target.to_string());
        };
        match base.join(target) {
            Ok(url) => Some(url.to_string()),
            Err(error) => {
                debug!(target, error = %error, "skipping unresolvable link target");
                None
            }
        }
    }
}

/// Link target of `element`, ignoring fragment-only and script references.
#[must_use]
pub fn link_target(element: ElementRef<'_>) -> Option<&str> {
    let target = TARGET_ATTRIBUTES
        .iter()
        .find_map(|name| attr_non_empty(element, name))?;
    if target.starts_with('#') || is_script_target(target) {
        return None;
    }
    Some(target)
}

fn is_script_target(target: &str) -> bool {
    target
        .get(..11)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("javascript:"))
}

/// Cleaned element text, falling back to `title`, `aria-label`, `data-title`.
#[must_use]
pub fn element_title(element: ElementRef<'_>) -> String {
    let text = clean_text(element);
    if !text.is_empty() {
        return text;
    }
    TITLE_ATTRIBUTES
        .iter()
        .find_map(|name| attr_non_empty(element, name))
        .map(|value| value.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}
