//! Size estimation from page markup.
//!
//! Each strategy is an independent lookup returning `Option<u64>`; they run in
//! order and the first hit wins.

use scraper::ElementRef;
use tracing::trace;

use super::size::{parse_size_attribute, parse_size_text};
use crate::dom::{ancestors, attr_non_empty, clean_text, compile_selector, sibling_elements};

/// Data attributes that may carry a byte count or size text.
const SIZE_DATA_ATTRIBUTES: [&str; 6] = [
    "data-size",
    "data-file-size",
    "data-filesize",
    "data-bytes",
    "data-length",
    "data-content-length",
];

/// Attributes holding accessible-name text that may mention a size.
const LABEL_ATTRIBUTES: [&str; 2] = ["aria-label", "title"];

/// Descendants that conventionally hold a size.
const SIZE_DESCENDANT_SELECTOR: &str = "[data-size], [data-file-size], [data-filesize], \
     .file-size, .filesize, .size, .file-info";

/// How many ancestor levels are scanned for size text.
const ANCESTOR_DEPTH: usize = 3;

type SizeStrategy = fn(ElementRef<'_>) -> Option<u64>;

/// Strategies in priority order.
const STRATEGIES: [(&str, SizeStrategy); 4] = [
    ("data-attribute", from_data_attributes),
    ("surrounding-text", from_surrounding_text),
    ("label-attribute", from_label_attributes),
    ("size-descendant", from_size_descendants),
];

/// Estimates a size for `element` from its markup, if any strategy finds one.
#[must_use]
pub fn estimate_from_markup(element: ElementRef<'_>) -> Option<u64> {
    STRATEGIES.iter().find_map(|(name, strategy)| {
        let bytes = strategy(element)?;
        trace!(strategy = name, bytes, "size found in markup");
        Some(bytes)
    })
}

fn from_data_attributes(element: ElementRef<'_>) -> Option<u64> {
    SIZE_DATA_ATTRIBUTES
        .iter()
        .filter_map(|name| attr_non_empty(element, name))
        .find_map(parse_size_attribute)
}

fn from_surrounding_text(element: ElementRef<'_>) -> Option<u64> {
    std::iter::once(element)
        .chain(ancestors(element, ANCESTOR_DEPTH))
        .chain(sibling_elements(element))
        .find_map(|candidate| parse_size_text(&clean_text(candidate)))
}

fn from_label_attributes(element: ElementRef<'_>) -> Option<u64> {
    LABEL_ATTRIBUTES
        .iter()
        .filter_map(|name| attr_non_empty(element, name))
        .find_map(parse_size_text)
}

fn from_size_descendants(element: ElementRef<'_>) -> Option<u64> {
    let selector = compile_selector(SIZE_DESCENDANT_SELECTOR).ok()?;
    element.select(&selector).find_map(|descendant| {
        from_data_attributes(descendant).or_else(|| parse_size_text(&clean_text(descendant)))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dom::Page;

    fn estimate(html: &str) -> Option<u64> {
        let page = Page::parse(html);
        let anchor = page.select("#x").unwrap()[0];
        estimate_from_markup(anchor)
    }

    #[test]
    fn test_data_attribute_plain_bytes() {
        assert_eq!(
            estimate(r#"<a id="x" href="/a.pdf" data-size="20480">Doc (3 MB)</a>"#),
            Some(20_480)
        );
    }

    #[test]
    fn test_data_attribute_with_unit() {
        assert_eq!(
            estimate(r#"<a id="x" href="/a.pdf" data-filesize="2 KB">Doc</a>"#),
            Some(2048)
        );
    }

    #[test]
    fn test_element_text() {
        assert_eq!(
            estimate(r#"<a id="x" href="/a.pdf">Budget [PDF 1.5 MB]</a>"#),
            Some(1_572_864)
        );
    }

    #[test]
    fn test_ancestor_text_within_three_levels() {
        assert_eq!(
            estimate(r#"<li>Minutes (12 KB) <span><a id="x" href="/m.pdf">Download</a></span></li>"#),
            Some(12 * 1024)
        );
    }

    #[test]
    fn test_ancestor_text_beyond_three_levels_is_ignored() {
        assert_eq!(
            estimate(
                r#"<section>9 MB<div><div><div><a id="x" href="/m.pdf">Download</a></div></div></div></section>"#
            ),
            None
        );
    }

    #[test]
    fn test_sibling_text() {
        assert_eq!(
            estimate(
                r#"<div><div><div><div><a id="x" href="/m.pdf">Download</a><span>(4 MB)</span></div></div></div></div>"#
            ),
            Some(4 * 1024 * 1024)
        );
    }

    #[test]
    fn test_label_attribute() {
        assert_eq!(
            estimate(r#"<div><div><div><a id="x" href="/m.pdf" aria-label="Report, 300 KB"></a></div></div></div>"#),
            Some(300 * 1024)
        );
    }

    #[test]
    fn test_size_descendant_data_attribute() {
        assert_eq!(
            estimate(r#"<a id="x" href="/m.pdf">Report <span class="file-size" data-size="777"></span></a>"#),
            Some(777)
        );
    }

    #[test]
    fn test_no_size_anywhere() {
        assert_eq!(
            estimate(r#"<div><p><a id="x" href="/m.pdf">Download</a></p></div>"#),
            None
        );
    }

    #[test]
    fn test_script_text_is_not_scanned() {
        assert_eq!(
            estimate(r#"<p><a id="x" href="/m.pdf">Get<script>var s = "5 MB";</script></a></p>"#),
            None
        );
    }
}
