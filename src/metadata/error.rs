//! Error types for metadata derivation and size probing.
//!
//! Neither error ever reaches the caller of an extraction: derivation errors
//! trigger the synthetic-filename fallback, probe errors mean "no exact size".

use thiserror::Error;

/// Errors while deriving a filename for a link.
#[derive(Debug, Clone, Error)]
pub enum MetadataError {
    /// A path segment could not be percent-decoded into UTF-8.
    #[error("cannot decode path segment '{segment}': {reason}")]
    Decode {
        /// The raw segment.
        segment: String,
        /// Decoder message.
        reason: String,
    },
}

impl MetadataError {
    /// Creates a `Decode` error.
    #[must_use]
    pub fn decode(segment: &str, reason: impl Into<String>) -> Self {
        Self::Decode {
            segment: segment.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors while probing a URL for its exact size.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The URL is relative or otherwise unusable for a network request.
    #[error("cannot probe non-absolute URL: {url}")]
    NotAbsolute {
        /// The URL as extracted.
        url: String,
    },

    /// Network-level failure (DNS, connection, TLS, timeout).
    #[error("network error probing {url}: {source}")]
    Network {
        /// The probed URL.
        url: String,
        /// The underlying request error.
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status.
    #[error("HTTP {status} probing {url}")]
    HttpStatus {
        /// The probed URL.
        url: String,
        /// Response status code.
        status: u16,
    },

    /// The response carried no usable size header.
    #[error("no usable {header} header probing {url}")]
    MissingHeader {
        /// The probed URL.
        url: String,
        /// Header that was expected.
        header: &'static str,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build probe HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl ProbeError {
    /// Creates a `NotAbsolute` error.
    pub fn not_absolute(url: impl Into<String>) -> Self {
        Self::NotAbsolute { url: url.into() }
    }

    /// Creates a `Network` error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an `HttpStatus` error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a `MissingHeader` error.
    pub fn missing_header(url: impl Into<String>, header: &'static str) -> Self {
        Self::MissingHeader {
            url: url.into(),
            header,
        }
    }
}
