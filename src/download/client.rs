//! HTTP client wrapper for fetching pages and streaming links to disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::batch::{DownloadedFile, LinkDownloader};
use super::error::DownloadError;
use super::filename::resolve_unique_path;
use crate::user_agent;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large files).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// HTTP client for page fetches and streaming downloads.
///
/// Create once and reuse; the underlying reqwest client pools connections.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client with the default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, DownloadError> {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a client with explicit timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the TLS backend cannot be initialized.
    pub fn with_timeouts(
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(|source| DownloadError::ClientBuild { source })?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the body as text.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] for invalid URLs, network failures, and
    /// non-success statuses.
    #[instrument(skip(self))]
    pub async fn fetch_page(&self, url: &str) -> Result<String, DownloadError> {
        let response = self.get(url).await?;
        let body = response
            .text()
            .await
            .map_err(|e| DownloadError::network(url, e))?;
        debug!(bytes = body.len(), "page fetched");
        Ok(body)
    }

    /// Streams `url` into `output_dir` under `save_name`, suffixing on conflict.
    ///
    /// A partially written file is removed when the transfer fails.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] for invalid URLs, network failures,
    /// non-success statuses, and file system errors.
    #[instrument(skip(self, output_dir))]
    pub async fn download_to_file(
        &self,
        url: &str,
        output_dir: &Path,
        save_name: &str,
    ) -> Result<DownloadedFile, DownloadError> {
        let response = self.get(url).await?;

        let file_path = resolve_unique_path(output_dir, save_name);
        debug!(path = %file_path.display(), "resolved output path");
        let mut file = File::create(&file_path)
            .await
            .map_err(|e| DownloadError::io(file_path.clone(), e))?;

        let stream_result = stream_to_file(&mut file, response, url, &file_path).await;
        if stream_result.is_err() {
            debug!(path = %file_path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&file_path).await;
        }
        let bytes = stream_result?;

        info!(path = %file_path.display(), bytes, "download complete");
        Ok(DownloadedFile {
            path: file_path,
            bytes,
        })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        let parsed = Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DownloadError::invalid_url(url));
        }

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl LinkDownloader for HttpClient {
    async fn download(
        &self,
        url: &str,
        output_dir: &Path,
        save_name: &str,
    ) -> Result<DownloadedFile, DownloadError> {
        self.download_to_file(url, output_dir, save_name).await
    }
}

/// Streams the response body to `file`, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(PathBuf::from(file_path), e))?;

    Ok(bytes_written)
}
