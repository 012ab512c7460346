//! CSV export. The header is a plain line; every value is quoted and
//! embedded quotes are doubled.

use ::csv::{QuoteStyle, Terminator, WriterBuilder};

use super::LinkStatus;
use super::error::ExportError;
use crate::download::BatchSummary;
use crate::link::ExtractedLink;
use crate::metadata::human_file_size;

/// Header row.
pub const CSV_HEADER: &str = "original_url,title,slugified_filename,slugified_filename_with_ext,media_constant,file_size_human,tooltip,extension,status";

/// Renders `links` as CSV, one row per link after the header.
///
/// `media_constant` is `media_prefix` followed by the filename with extension.
/// The status column reflects `batch` when given, `found` otherwise.
///
/// # Errors
///
/// Returns [`ExportError`] if a record cannot be written to the buffer.
pub fn render_csv(
    links: &[ExtractedLink],
    media_prefix: &str,
    batch: Option<&BatchSummary>,
) -> Result<String, ExportError> {
    let mut buffer = Vec::with_capacity(CSV_HEADER.len() + 1 + links.len() * 160);
    buffer.extend_from_slice(CSV_HEADER.as_bytes());
    buffer.push(b'\n');

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);

    for link in links {
        let media_constant = format!("{media_prefix}{}", link.filename_with_ext);
        let size = human_file_size(link.estimated_size);
        writer.write_record([
            link.url.as_str(),
            link.title.as_str(),
            link.filename_without_ext.as_str(),
            link.filename_with_ext.as_str(),
            media_constant.as_str(),
            size.as_str(),
            link.tooltip.as_str(),
            link.extension.as_str(),
            LinkStatus::of(link, batch).as_str(),
        ])?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(buffer)?)
}
