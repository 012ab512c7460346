//! Extraction entry points and the `extractLinks` request/response contract.
//!
//! [`extract_links`] runs in two phases. The DOM phase parses the page and
//! scans it synchronously; the parsed page is dropped before the optional
//! probe phase, which awaits one [`SizeProbe`] call per link, in order.
//! Probe failures leave the markup/default estimate in place.

mod message;

pub use message::{EXTRACT_LINKS_ACTION, ExtractRequest, ExtractResponse};

use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::dom::Page;
use crate::link::ExtractedLink;
use crate::metadata::{SizeProbe, SizeSource};
use crate::scanner::{LinkScanner, ScanError, ScanStats};
use crate::settings::Settings;

/// Errors that abort an extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The request named an action other than `extractLinks`.
    #[error("unsupported action '{action}'")]
    UnsupportedAction {
        /// The action as received.
        action: String,
    },

    /// The scan could not start.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Links found on one page.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Deduplicated links in first-insertion order.
    pub links: Vec<ExtractedLink>,
    /// Scan counters.
    pub stats: ScanStats,
    /// Links whose size was confirmed by a probe.
    pub probed: usize,
}

/// Extracts document links from `html` found at `page_url`.
///
/// When `probe` is given, each link is probed sequentially for an exact size.
///
/// # Errors
///
/// Returns [`ExtractError::Scan`] when the settings or page URL are unusable.
/// Problems with individual selectors, elements, or probes never fail the call.
#[instrument(skip(html, settings, probe), fields(html_len = html.len()))]
pub async fn extract_links(
    html: &str,
    page_url: &str,
    settings: &Settings,
    probe: Option<&dyn SizeProbe>,
) -> Result<Extraction, ExtractError> {
    let outcome = {
        let scanner = LinkScanner::new(settings, page_url)?;
        let page = Page::parse(html);
        scanner.scan(&page)
    };

    let mut links = outcome.links;
    let mut probed = 0;
    if let Some(probe) = probe {
        for link in &mut links {
            match probe.probe_size(&link.url).await {
                Ok(bytes) => {
                    link.set_size(bytes, SizeSource::Exact);
                    probed += 1;
                }
                Err(error) => {
                    debug!(url = %link.url, error = %error, "no exact size; keeping estimate");
                }
            }
        }
        info!(probed, total = links.len(), "size probes finished");
    }

    Ok(Extraction {
        links,
        stats: outcome.stats,
        probed,
    })
}

/// Handles an `extractLinks` request against the page's `html`.
///
/// Never fails: errors are reported as a failure response.
pub async fn handle_request(
    request: &ExtractRequest,
    html: &str,
    probe: Option<&dyn SizeProbe>,
) -> ExtractResponse {
    if request.action != EXTRACT_LINKS_ACTION {
        let error = ExtractError::UnsupportedAction {
            action: request.action.clone(),
        };
        return ExtractResponse::failure(&error);
    }

    match extract_links(html, &request.page_url, &request.settings, probe).await {
        Ok(extraction) => ExtractResponse::success(extraction.links, &request.page_url),
        Err(error) => ExtractResponse::failure(&error),
    }
}
