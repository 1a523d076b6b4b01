//! Content file kinds.

use std::path::Path;

/// How a content file becomes a page body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// `.md` / `.markdown`, rendered with pulldown-cmark
    Markdown,
    /// `.html` / `.htm`, used as-is
    Html,
}

impl ContentKind {
    /// Classify `path` by extension (case-insensitive).
    ///
    /// Anything else under the content directory is a static asset.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown") {
            Some(Self::Markdown)
        } else if ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm") {
            Some(Self::Html)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_content_file(path: &Path) -> bool {
        Self::from_path(path).is_some()
    }
}
