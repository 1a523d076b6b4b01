//! `<head>` injection for rendered documents.

/// Insert `snippet` right before the closing `</head>` tag.
///
/// Returns `None` if the document has no `</head>`.
pub fn inject_head(html: &str, snippet: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets
    let at = html.to_ascii_lowercase().find("</head>")?;

    let mut out = String::with_capacity(html.len() + snippet.len());
    out.push_str(&html[..at]);
    out.push_str(snippet);
    out.push_str(&html[at..]);
    Some(out)
}
