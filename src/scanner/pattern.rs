//! Extension matching for candidate URLs.

use regex::{Regex, RegexBuilder};

use super::error::ScanError;

/// Case-insensitive `.ext` (optionally followed by a query) anchored at the
/// end of a URL.
#[derive(Debug, Clone)]
pub struct ExtensionMatcher {
    regex: Option<Regex>,
}

impl ExtensionMatcher {
    /// Compiles a matcher for `extensions` (without leading dots).
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Pattern`] if the combined pattern fails to compile.
    pub fn new(extensions: &[String]) -> Result<Self, ScanError> {
        let alternatives = extensions
            .iter()
            .map(|ext| regex::escape(ext))
            .collect::<Vec<_>>()
            .join("|");
        if alternatives.is_empty() {
            return Ok(Self { regex: None });
        }
        let regex = RegexBuilder::new(&format!(r"\.(?:{alternatives})(?:\?.*)?$"))
            .case_insensitive(true)
            .build()
            .map_err(|source| ScanError::Pattern { source })?;
        Ok(Self { regex: Some(regex) })
    }

    /// Whether `url` ends in one of the configured extensions.
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        self.regex.as_ref().is_some_and(|regex| regex.is_match(url))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn matcher(exts: &[&str]) -> ExtensionMatcher {
        let owned: Vec<String> = exts.iter().map(ToString::to_string).collect();
        ExtensionMatcher::new(&owned).unwrap()
    }

    #[test]
    fn test_matches_with_query_string() {
        let m = matcher(&["pdf"]);
        assert!(m.matches("https://example.com/a.pdf?x=1"));
        assert!(m.matches("https://example.com/a.pdf"));
    }

    #[test]
    fn test_matches_case_insensitively() {
        let m = matcher(&["pdf"]);
        assert!(m.matches("https://example.com/A.PDF"));
        assert!(matcher(&["PDF"]).matches("https://example.com/a.pdf?X=1"));
    }

    #[test]
    fn test_longer_extension_never_matches() {
        let m = matcher(&["pdf"]);
        assert!(!m.matches("https://example.com/a.pdfx"));
        assert!(!m.matches("https://example.com/a.pdfx?x=1"));
    }

    #[test]
    fn test_extension_must_be_at_end() {
        let m = matcher(&["pdf"]);
        assert!(!m.matches("https://example.com/a.pdf/view"));
        assert!(!m.matches("https://example.com/pdf"));
    }

    #[test]
    fn test_multiple_extensions() {
        let m = matcher(&["doc", "docx", "xls"]);
        assert!(m.matches("/files/a.docx"));
        assert!(m.matches("/files/a.doc"));
        assert!(m.matches("/files/a.XLS"));
        assert!(!m.matches("/files/a.ppt"));
    }

    #[test]
    fn test_regex_metacharacters_are_escaped() {
        let m = matcher(&["t.x"]);
        assert!(m.matches("/a.t.x"));
        assert!(!m.matches("/a.tax"));
    }

    #[test]
    fn test_empty_list_matches_nothing() {
        let m = matcher(&[]);
        assert!(!m.matches("/a.pdf"));
        assert!(!m.matches("/a."));
    }
}
