//! Error types for settings validation and persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while validating, loading, or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A settings value is outside its accepted range.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// The offending field (wire name).
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The settings file could not be read or written.
    #[error("IO error on settings file {path}: {source}")]
    Io {
        /// Settings file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for [`Settings`](super::Settings).
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        /// Settings file path.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// No config directory could be determined from the environment.
    #[error("no settings location: neither XDG_CONFIG_HOME nor HOME is set")]
    NoLocation,
}

impl SettingsError {
    /// Creates an `Invalid` error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }

    /// Creates an `Io` error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a `Parse` error.
    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
