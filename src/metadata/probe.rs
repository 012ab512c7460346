//! Exact size lookup over HTTP.
//!
//! A `HEAD` request's `Content-Length` is tried first; when that is missing
//! or the request fails, a ranged `GET` for the first byte is issued and the
//! total is read from `Content-Range`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_LENGTH, CONTENT_RANGE, RANGE};
use tracing::{debug, instrument};
use url::Url;

use super::error::ProbeError;
use crate::user_agent;

/// Connect timeout for probe requests.
const PROBE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Range requested by the fallback probe.
const FIRST_BYTE_RANGE: &str = "bytes=0-0";

/// Looks up the exact size of a linked file.
#[async_trait]
pub trait SizeProbe: Send + Sync {
    /// Returns the size of the resource at `url` in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when no exact size could be determined.
    async fn probe_size(&self, url: &str) -> Result<u64, ProbeError>;
}

/// [`SizeProbe`] backed by `HEAD` and ranged `GET` requests.
#[derive(Debug, Clone)]
pub struct HttpSizeProbe {
    client: Client,
}

impl HttpSizeProbe {
    /// Creates a probe whose requests time out after `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(
                PROBE_CONNECT_TIMEOUT_SECS.min(timeout_secs),
            ))
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(|source| ProbeError::ClientBuild { source })?;
        Ok(Self { client })
    }

    async fn head_content_length(&self, url: &str) -> Result<u64, ProbeError> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| ProbeError::network(url, e))?;
        if !response.status().is_success() {
            return Err(ProbeError::http_status(url, response.status().as_u16()));
        }
        response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|bytes| *bytes > 0)
            .ok_or_else(|| ProbeError::missing_header(url, "content-length"))
    }

    async fn ranged_total(&self, url: &str) -> Result<u64, ProbeError> {
        let response = self
            .client
            .get(url)
            .header(RANGE, FIRST_BYTE_RANGE)
            .send()
            .await
            .map_err(|e| ProbeError::network(url, e))?;
        if !response.status().is_success() {
            return Err(ProbeError::http_status(url, response.status().as_u16()));
        }
        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| ProbeError::missing_header(url, "content-range"))
    }
}

#[async_trait]
impl SizeProbe for HttpSizeProbe {
    #[instrument(skip(self), fields(url = %url))]
    async fn probe_size(&self, url: &str) -> Result<u64, ProbeError> {
        let parsed = Url::parse(url).map_err(|_| ProbeError::not_absolute(url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ProbeError::not_absolute(url));
        }

        match self.head_content_length(url).await {
            Ok(bytes) => {
                debug!(bytes, "size from HEAD content-length");
                return Ok(bytes);
            }
            Err(error) => debug!(error = %error, "HEAD probe failed; trying ranged GET"),
        }

        let bytes = self.ranged_total(url).await?;
        debug!(bytes, "size from content-range");
        Ok(bytes)
    }
}

/// Extracts the complete length from `bytes 0-0/12345`.
///
/// Returns `None` for an unknown (`*`) or zero length.
#[must_use]
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    let (_, total) = header.rsplit_once('/')?;
    total.trim().parse::<u64>().ok().filter(|bytes| *bytes > 0)
}
