//! Sequential bulk download of extracted links.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use super::error::DownloadError;
use crate::link::ExtractedLink;

/// A file saved to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    /// Final output path.
    pub path: PathBuf,
    /// Bytes written.
    pub bytes: u64,
}

/// Capability for saving one link to disk.
#[async_trait]
pub trait LinkDownloader: Send + Sync {
    /// Saves `url` into `output_dir` as `save_name` (or a suffixed variant).
    async fn download(
        &self,
        url: &str,
        output_dir: &Path,
        save_name: &str,
    ) -> Result<DownloadedFile, DownloadError>;
}

/// Result of one link in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    /// Saved.
    Downloaded(DownloadedFile),
    /// Failed with this message.
    Failed(String),
}

/// One link's outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// The link's URL.
    pub url: String,
    /// Requested save name.
    pub save_name: String,
    /// What happened.
    pub status: DownloadStatus,
}

impl DownloadOutcome {
    /// Whether the link was saved.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, DownloadStatus::Downloaded(_))
    }
}

/// Tally of a batch, with per-link outcomes in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Links saved.
    pub completed: usize,
    /// Links that failed.
    pub failed: usize,
    /// Per-link outcomes.
    pub outcomes: Vec<DownloadOutcome>,
}

impl BatchSummary {
    /// Outcome for `url`, if it was part of the batch.
    #[must_use]
    pub fn outcome_for(&self, url: &str) -> Option<&DownloadOutcome> {
        self.outcomes.iter().find(|outcome| outcome.url == url)
    }
}

/// Downloads `links` one at a time into `output_dir`.
///
/// Each link is saved under its slugified `filename_with_ext`. A failed link
/// is logged and tallied; the remaining links are still attempted.
/// `on_progress` is called after each link.
///
/// # Errors
///
/// Returns [`DownloadError::Io`] only if `output_dir` cannot be created.
#[instrument(skip(downloader, links, on_progress), fields(count = links.len(), dir = %output_dir.display()))]
pub async fn download_links<F>(
    downloader: &dyn LinkDownloader,
    links: &[ExtractedLink],
    output_dir: &Path,
    mut on_progress: F,
) -> Result<BatchSummary, DownloadError>
where
    F: FnMut(&DownloadOutcome),
{
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| DownloadError::io(output_dir, e))?;

    let mut summary = BatchSummary::default();
    for link in links {
        let save_name = link.filename_with_ext.clone();
        let status = match downloader.download(&link.url, output_dir, &save_name).await {
            Ok(file) => {
                summary.completed += 1;
                DownloadStatus::Downloaded(file)
            }
            Err(error) => {
                warn!(url = %link.url, error = %error, "download failed");
                summary.failed += 1;
                DownloadStatus::Failed(error.to_string())
            }
        };
        let outcome = DownloadOutcome {
            url: link.url.clone(),
            save_name,
            status,
        };
        on_progress(&outcome);
        summary.outcomes.push(outcome);
    }

    info!(
        completed = summary.completed,
        failed = summary.failed,
        "download batch finished"
    );
    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::metadata::{FilenameVariants, LinkMetadata};
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records calls and fails any URL containing "bad".
    #[derive(Default)]
    struct RecordingDownloader {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LinkDownloader for RecordingDownloader {
        async fn download(
            &self,
            url: &str,
            output_dir: &Path,
            save_name: &str,
        ) -> Result<DownloadedFile, DownloadError> {
            self.calls.lock().unwrap().push(url.to_string());
            if url.contains("bad") {
                return Err(DownloadError::http_status(url, 500));
            }
            Ok(DownloadedFile {
                path: output_dir.join(save_name),
                bytes: 3,
            })
        }
    }

    fn link(url: &str, name: &str) -> ExtractedLink {
        let metadata = LinkMetadata {
            names: FilenameVariants {
                with_ext: format!("{name}.pdf"),
                without_ext: name.into(),
                extension: "pdf".into(),
            },
            estimated_size: None,
            size_source: None,
        };
        ExtractedLink::new(url.into(), String::new(), metadata, "https://example.com/")
    }

    #[tokio::test]
    async fn test_batch_continues_after_failure() {
        let temp_dir = TempDir::new().unwrap();
        let downloader = RecordingDownloader::default();
        let links = vec![
            link("https://e.com/a.pdf", "a"),
            link("https://e.com/bad.pdf", "bad"),
            link("https://e.com/c.pdf", "c"),
        ];
        let mut seen = 0;
        let summary = download_links(&downloader, &links, temp_dir.path(), |_| seen += 1)
            .await
            .unwrap();

        assert_eq!(summary.completed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(seen, 3);
        assert_eq!(downloader.calls.lock().unwrap().len(), 3);
        assert!(!summary.outcome_for("https://e.com/bad.pdf").unwrap().is_success());
        assert_eq!(
            summary.outcomes[2].status,
            DownloadStatus::Downloaded(DownloadedFile {
                path: temp_dir.path().join("c.pdf"),
                bytes: 3,
            })
        );
    }

    #[tokio::test]
    async fn test_batch_creates_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested/out");
        let summary = download_links(&RecordingDownloader::default(), &[], &nested, |_| {})
            .await
            .unwrap();
        assert_eq!(summary, BatchSummary::default());
        assert!(nested.is_dir());
    }
}
