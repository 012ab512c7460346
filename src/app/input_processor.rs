//! Resolves the page source (URL, file, or stdin) into HTML plus its page URL.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use doclinks_core::HttpClient;
use tracing::debug;
use url::Url;

/// Where the page comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PageSource {
    Stdin,
    Url(String),
    File(PathBuf),
}

impl PageSource {
    pub(crate) fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        if trimmed == "-" {
            return Self::Stdin;
        }
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

/// HTML and the URL it is scanned as.
#[derive(Debug)]
pub(crate) struct PageInput {
    pub html: String,
    pub page_url: String,
}

/// Reads the page and settles its page URL.
///
/// An explicit `page_url` always wins. Otherwise a fetched page uses its own
/// URL and a file uses its `file://` URL. Stdin has no URL of its own, so one
/// is required when links are to be made absolute.
pub(crate) async fn load_page(
    source: &str,
    page_url: Option<&str>,
    make_absolute: bool,
) -> Result<PageInput> {
    let source = PageSource::parse(source);
    let page_url = resolve_page_url(&source, page_url, make_absolute)?;
    let html = match &source {
        PageSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read page from stdin")?;
            buffer
        }
        PageSource::Url(url) => HttpClient::new()?.fetch_page(url).await?,
        PageSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
    };
    debug!(bytes = html.len(), page_url = %page_url, "page loaded");
    Ok(PageInput { html, page_url })
}

fn resolve_page_url(
    source: &PageSource,
    explicit: Option<&str>,
    make_absolute: bool,
) -> Result<String> {
    if let Some(url) = explicit.map(str::trim).filter(|url| !url.is_empty()) {
        return Ok(url.to_string());
    }
    match source {
        PageSource::Url(url) => Ok(url.clone()),
        PageSource::File(path) => file_url(path),
        PageSource::Stdin if make_absolute => {
            bail!("--page-url is required when reading the page from stdin")
        }
        PageSource::Stdin => Ok(String::new()),
    }
}

fn file_url(path: &Path) -> Result<String> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("failed to resolve {}", path.display()))?;
    Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|()| anyhow::anyhow!("cannot express {} as a file URL", absolute.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_source_parse() {
        assert_eq!(PageSource::parse("-"), PageSource::Stdin);
        assert_eq!(
            PageSource::parse("HTTPS://example.com/x"),
            PageSource::Url("HTTPS://example.com/x".into())
        );
        assert_eq!(
            PageSource::parse("pages/index.html"),
            PageSource::File(PathBuf::from("pages/index.html"))
        );
    }

    #[test]
    fn test_explicit_page_url_wins() {
        let source = PageSource::Url("https://a.example/".into());
        assert_eq!(
            resolve_page_url(&source, Some("https://b.example/"), true).unwrap(),
            "https://b.example/"
        );
    }

    #[test]
    fn test_stdin_requires_page_url_only_when_absolute() {
        assert!(resolve_page_url(&PageSource::Stdin, None, true).is_err());
        assert_eq!(resolve_page_url(&PageSource::Stdin, None, false).unwrap(), "");
        assert!(resolve_page_url(&PageSource::Stdin, Some("  "), true).is_err());
    }

    #[test]
    fn test_file_source_uses_file_url() {
        let url = resolve_page_url(&PageSource::File(PathBuf::from("page.html")), None, true).unwrap();
        assert!(url.starts_with("file:///"), "got {url}");
        assert!(url.ends_with("/page.html"), "got {url}");
    }

    #[tokio::test]
    async fn test_load_page_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, "<a href='a.pdf'>A</a>").unwrap();

        let input = load_page(path.to_str().unwrap(), None, true).await.unwrap();
        assert!(input.html.contains("a.pdf"));
        assert!(input.page_url.starts_with("file://"));
    }
}
