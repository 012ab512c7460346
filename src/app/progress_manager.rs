//! Progress UI (bar) for download batches.

use std::time::Duration;

use doclinks_core::download::{DownloadOutcome, DownloadStatus};
use indicatif::{ProgressBar, ProgressStyle};

/// Creates the batch progress bar, hidden when `visible` is false.
pub(crate) fn batch_progress_bar(visible: bool, total: usize) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{pos}/{len}] {bar:30} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Advances `bar` for one finished link.
pub(crate) fn record_outcome(bar: &ProgressBar, outcome: &DownloadOutcome) {
    let label = match &outcome.status {
        DownloadStatus::Downloaded(_) => format!("saved {}", outcome.save_name),
        DownloadStatus::Failed(_) => format!("failed {}", outcome.save_name),
    };
    bar.set_message(label);
    bar.inc(1);
}
