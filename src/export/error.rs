//! Error types for export renderings.

use thiserror::Error;

/// Errors raised while rendering an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A CSV record could not be written.
    #[error("failed to write CSV record: {0}")]
    Csv(#[from] ::csv::Error),

    /// Buffered CSV output could not be flushed.
    #[error("failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),

    /// Rendered output is not valid UTF-8.
    #[error("rendered output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
