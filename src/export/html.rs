//! HTML snippet export: one anchor per link.

use crate::link::ExtractedLink;
use crate::metadata::{extension_label, human_file_size};

/// Renders one `<a>` per line.
///
/// `href` is `href_prefix` followed by the slugified filename. The anchor
/// text is the link title when `inner_content` is on (the filename if the
/// title is empty) and nothing otherwise.
#[must_use]
pub fn render_html_snippet(links: &[ExtractedLink], href_prefix: &str, inner_content: bool) -> String {
    let mut out = String::new();
    for link in links {
        let href = format!("{href_prefix}{}", link.filename_with_ext);
        let title = format!(
            "{}, {} opens in a new window",
            extension_label(&link.extension),
            human_file_size(link.estimated_size)
        );
        let text = match (inner_content, link.title.is_empty()) {
            (false, _) => "",
            (true, true) => link.filename_with_ext.as_str(),
            (true, false) => link.title.as_str(),
        };
        out.push_str(&format!(
            "<a href=\"{}\" title=\"{}\" target=\"_blank\">{}</a>\n",
            escape_html(&href),
            escape_html(&title),
            escape_html(text)
        ));
    }
    out
}

/// Escapes `&`, `<`, `>`, `"` and `'` for attribute and text content.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
