//! HTML and XML helpers

use crate::content::OutlineEntry;

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Render a nested outline as table-of-contents list markup
pub fn outline_html(entries: &[OutlineEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut html = String::from("<ul class=\"toc-section\">");
    for entry in entries {
        html.push_str("<li class=\"toc-item\"><a href=\"#");
        html.push_str(&entry.id);
        html.push_str("\">");
        html.push_str(&html_escape(&entry.text));
        html.push_str("</a>");
        html.push_str(&outline_html(&entry.children));
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}
