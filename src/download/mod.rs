//! Page fetching and bulk download of extracted links.
//!
//! Links are downloaded one at a time, each saved under its slugified
//! filename (with a numeric suffix when the name is taken). A failed link is
//! logged and counted; it never stops the rest of the batch.
//!
//! # Example
//!
//! ```no_run
//! use doclinks_core::download::{HttpClient, download_links};
//! use doclinks_core::ExtractedLink;
//! use std::path::Path;
//!
//! # async fn example(links: Vec<ExtractedLink>) -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let summary = download_links(&client, &links, Path::new("./downloads"), |_| {}).await?;
//! println!("Completed: {}, Failed: {}", summary.completed, summary.failed);
//! # Ok(())
//! # }
//! ```

mod batch;
mod client;
mod error;
mod filename;

pub use batch::{
    BatchSummary, DownloadOutcome, DownloadStatus, DownloadedFile, LinkDownloader, download_links,
};
pub use client::{CONNECT_TIMEOUT_SECS, HttpClient, READ_TIMEOUT_SECS};
pub use error::DownloadError;
