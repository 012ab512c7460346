//! Parsed-page abstraction used by the scanner and metadata resolver.
//!
//! Wraps a `scraper` document so the rest of the crate only deals with
//! [`ElementRef`] values, cleaned text, and a few tree walks (ancestors,
//! siblings, landmark containment). Nothing here touches the network.
//!
//! A [`Page`] is not `Send`; callers that await network work must finish
//! their DOM pass first and drop the page before the first `.await`.

mod error;

pub use error::DomError;

use scraper::{ElementRef, Html, Selector};

/// Elements whose text never contributes to titles or size hints.
const SKIPPED_TEXT_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Selector for header/footer landmark regions.
const LANDMARK_SELECTOR: &str = "header, footer, [role=\"banner\"], [role=\"contentinfo\"]";

/// A parsed HTML page.
#[derive(Debug)]
pub struct Page {
    html: Html,
}

impl Page {
    /// Parses a full HTML document.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Returns all elements matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidSelector`] if the selector does not parse.
    pub fn select(&self, selector: &str) -> Result<Vec<ElementRef<'_>>, DomError> {
        let parsed = compile_selector(selector)?;
        Ok(self.html.select(&parsed).collect())
    }

    /// Precomputes header/footer landmark regions for containment tests.
    #[must_use]
    pub fn landmark_regions(&self) -> LandmarkRegions<'_> {
        let regions = compile_selector(LANDMARK_SELECTOR)
            .map(|selector| self.html.select(&selector).collect())
            .unwrap_or_default();
        LandmarkRegions { regions }
    }
}

/// Header/footer regions of a page.
#[derive(Debug, Clone, Default)]
pub struct LandmarkRegions<'a> {
    regions: Vec<ElementRef<'a>>,
}

impl LandmarkRegions<'_> {
    /// Returns true when `element` is one of the regions or nested inside one.
    #[must_use]
    pub fn contains(&self, element: ElementRef<'_>) -> bool {
        if self.regions.is_empty() {
            return false;
        }
        std::iter::once(element.id())
            .chain(element.ancestors().map(|node| node.id()))
            .any(|id| self.regions.iter().any(|region| region.id() == id))
    }

    /// Number of regions found on the page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true when the page has no header/footer regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Parses a CSS selector, mapping parse failures to [`DomError`].
///
/// # Errors
///
/// Returns [`DomError::InvalidSelector`] on invalid syntax.
pub fn compile_selector(selector: &str) -> Result<Selector, DomError> {
    Selector::parse(selector).map_err(|e| DomError::invalid_selector(selector, e.to_string()))
}

/// Text content of `element` without script/style/noscript content,
/// whitespace runs collapsed to single spaces and trimmed.
#[must_use]
pub fn clean_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if SKIPPED_TEXT_ELEMENTS.contains(&child_element.value().name()) {
                continue;
            }
            collect_text(child_element, out);
        }
    }
}

/// Returns a trimmed, non-empty attribute value.
#[must_use]
pub fn attr_non_empty<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Element ancestors, nearest first, at most `depth` levels up.
#[must_use]
pub fn ancestors(element: ElementRef<'_>, depth: usize) -> Vec<ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .take(depth)
        .collect()
}

/// Sibling elements of `element` (preceding first, nearest first; then following).
#[must_use]
pub fn sibling_elements(element: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    element
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .chain(element.next_siblings().filter_map(ElementRef::wrap))
        .collect()
}
