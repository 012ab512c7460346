//! Filename derivation, extension extraction, and slugification.
//!
//! Everything here works on plain strings so it behaves the same for
//! absolute and relative link targets.

use std::sync::LazyLock;

use regex::Regex;

use super::error::MetadataError;

/// Element text at or above this many characters is not used as a filename.
const MAX_TEXT_FILENAME_CHARS: usize = 100;

/// Base name used when slugification leaves nothing behind.
const EMPTY_SLUG_FALLBACK: &str = "document";

/// Trailing `.ext` token of a path or filename.
#[allow(clippy::expect_used)]
static EXTENSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([A-Za-z0-9]+)$").expect("extension regex is valid"));

/// Slugified filename forms plus the extension they were built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameVariants {
    /// `slug.ext`, or just `slug` when there is no extension.
    pub with_ext: String,
    /// `slug`.
    pub without_ext: String,
    /// Lowercase extension without the dot, possibly empty.
    pub extension: String,
}

/// Returns the path portion of a URL or relative reference, without
/// query or fragment.
#[must_use]
pub fn url_path(url: &str) -> &str {
    let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
    let without_query = without_fragment
        .split_once('?')
        .map_or(without_fragment, |(head, _)| head);
    match without_query.find("://") {
        Some(scheme_end) => {
            let after_scheme = &without_query[scheme_end + 3..];
            after_scheme
                .find('/')
                .map_or("", |path_start| &after_scheme[path_start..])
        }
        None => without_query,
    }
}

/// Last `/`-separated segment of a URL path (raw, still percent-encoded).
#[must_use]
pub fn last_path_segment(url: &str) -> &str {
    let path = url_path(url);
    path.rsplit('/').next().unwrap_or(path)
}

/// Extracts the lowercase extension (no dot) at the end of a URL's path.
///
/// Query strings and fragments are ignored. Returns an empty string when the
/// path has no trailing alphanumeric `.ext` token.
#[must_use]
pub fn extract_extension(url: &str) -> String {
    EXTENSION_PATTERN
        .captures(last_path_segment(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_default()
}

/// Splits `name` into base and lowercase extension, if it has one.
#[must_use]
pub fn split_extension(name: &str) -> Option<(&str, String)> {
    let caps = EXTENSION_PATTERN.captures(name)?;
    let whole = caps.get(0)?;
    let ext = caps.get(1)?.as_str().to_lowercase();
    Some((&name[..whole.start()], ext))
}

/// Lowercases `value` and collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen, with no leading or trailing hyphen.
#[must_use]
pub fn slugify(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_hyphen = false;
    for ch in value.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    out
}

/// Builds slugified variants of `raw_name`.
///
/// The name's own extension wins; `fallback_extension` is attached when the
/// name has none. The extension is never slugified.
#[must_use]
pub fn filename_variants(raw_name: &str, fallback_extension: &str) -> FilenameVariants {
    let (base, extension) = match split_extension(raw_name) {
        Some((base, ext)) => (base, ext),
        None => (raw_name, fallback_extension.to_lowercase()),
    };

    let mut without_ext = slugify(base);
    if without_ext.is_empty() {
        without_ext = EMPTY_SLUG_FALLBACK.to_string();
    }
    let with_ext = if extension.is_empty() {
        without_ext.clone()
    } else {
        format!("{without_ext}.{extension}")
    };

    FilenameVariants {
        with_ext,
        without_ext,
        extension,
    }
}

/// Picks the raw (unslugified) filename for a link.
///
/// Order: explicit `data-filename`, then a dotted last path segment
/// (percent-decoded), then short element text plus the path extension.
/// Returns `Ok(None)` when none apply so the caller can synthesize a name.
///
/// # Errors
///
/// Returns [`MetadataError::Decode`] when the path segment is not valid
/// percent-encoded UTF-8.
pub fn derive_filename(
    explicit: Option<&str>,
    url: &str,
    element_text: &str,
) -> Result<Option<String>, MetadataError> {
    if let Some(name) = explicit {
        return Ok(Some(name.to_string()));
    }

    let segment = last_path_segment(url);
    if segment.contains('.') {
        let decoded = urlencoding::decode(segment)
            .map_err(|e| MetadataError::decode(segment, e.to_string()))?;
        return Ok(Some(decoded.into_owned()));
    }

    let text = element_text.trim();
    if !text.is_empty() && text.chars().count() < MAX_TEXT_FILENAME_CHARS {
        let extension = extract_extension(url);
        let name = if extension.is_empty() {
            text.to_string()
        } else {
            format!("{text}.{extension}")
        };
        return Ok(Some(name));
    }

    Ok(None)
}

/// `document-{millis}` with the extension appended when known.
#[must_use]
pub fn synthetic_filename(extension: &str) -> String {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    if extension.is_empty() {
        format!("document-{timestamp}")
    } else {
        format!("document-{timestamp}.{extension}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- url_path / extract_extension ---

    #[test]
    fn test_url_path_strips_authority_query_fragment() {
        assert_eq!(
            url_path("https://example.com/docs/a.pdf?x=1#p2"),
            "/docs/a.pdf"
        );
        assert_eq!(url_path("https://example.com"), "");
        assert_eq!(url_path("docs/a.pdf?dl=1"), "docs/a.pdf");
    }

    #[test]
    fn test_extract_extension_lowercases() {
        assert_eq!(extract_extension("https://example.com/Report.PDF"), "pdf");
    }

    #[test]
    fn test_extract_extension_ignores_query() {
        assert_eq!(extract_extension("https://example.com/a.xlsx?v=3"), "xlsx");
    }

    #[test]
    fn test_extract_extension_none_for_bare_host() {
        assert_eq!(extract_extension("https://example.com"), "");
        assert_eq!(extract_extension("https://example.com/download"), "");
    }

    #[test]
    fn test_extract_extension_uses_last_token_only() {
        assert_eq!(extract_extension("/files/archive.tar.gz"), "gz");
    }

    #[test]
    fn test_extract_extension_rejects_non_alphanumeric_tail() {
        assert_eq!(extract_extension("/files/odd.pdf-"), "");
    }

    // --- slugify ---

    #[test]
    fn test_slugify_collapses_runs_and_trims() {
        assert_eq!(slugify("  My   Report (Final)!! "), "my-report-final");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for input in ["Annual Report 2024", "--a--b--", "ÉTÉ été", "x_y.z", ""] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_slugify_non_ascii_becomes_hyphen() {
        assert_eq!(slugify("café menu"), "caf-menu");
    }

    // --- filename_variants ---

    #[test]
    fn test_filename_variants_preserves_extension() {
        let variants = filename_variants("Report.PDF", "");
        assert_eq!(variants.without_ext, "report");
        assert_eq!(variants.with_ext, "report.pdf");
        assert_eq!(variants.extension, "pdf");
    }

    #[test]
    fn test_filename_variants_uses_fallback_extension() {
        let variants = filename_variants("Quarterly Figures", "XLSX");
        assert_eq!(variants.with_ext, "quarterly-figures.xlsx");
        assert_eq!(variants.extension, "xlsx");
    }

    #[test]
    fn test_filename_variants_without_any_extension() {
        let variants = filename_variants("notes", "");
        assert_eq!(variants.with_ext, "notes");
        assert_eq!(variants.extension, "");
    }

    #[test]
    fn test_filename_variants_empty_slug_falls_back() {
        let variants = filename_variants("???.pdf", "");
        assert_eq!(variants.with_ext, "document.pdf");
    }

    // --- derive_filename ---

    #[test]
    fn test_derive_filename_prefers_explicit() {
        let name = derive_filename(Some("Custom.docx"), "https://e.com/x.pdf", "text").unwrap();
        assert_eq!(name.as_deref(), Some("Custom.docx"));
    }

    #[test]
    fn test_derive_filename_decodes_path_segment() {
        let name = derive_filename(None, "https://e.com/docs/My%20Report.pdf?x=1", "").unwrap();
        assert_eq!(name.as_deref(), Some("My Report.pdf"));
    }

    #[test]
    fn test_derive_filename_invalid_utf8_is_error() {
        let result = derive_filename(None, "https://e.com/docs/%FF%FE.pdf", "");
        assert!(matches!(result, Err(MetadataError::Decode { .. })));
    }

    #[test]
    fn test_derive_filename_uses_short_text_when_segment_has_no_dot() {
        let name = derive_filename(None, "https://e.com/download", "Annual Report").unwrap();
        assert_eq!(name.as_deref(), Some("Annual Report"));
    }

    #[test]
    fn test_derive_filename_long_text_is_not_used() {
        let text = "x".repeat(100);
        let name = derive_filename(None, "https://e.com/download", &text).unwrap();
        assert_eq!(name, None);
    }

    #[test]
    fn test_synthetic_filename_shape() {
        let name = synthetic_filename("pdf");
        assert!(name.starts_with("document-"));
        assert!(name.ends_with(".pdf"));
        let digits = name
            .trim_start_matches("document-")
            .trim_end_matches(".pdf");
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
        assert!(!synthetic_filename("").contains('.'));
    }
}
