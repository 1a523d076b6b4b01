//! Page types: metadata, front matter and routing.

mod frontmatter;
mod meta;
pub mod route;

use std::path::PathBuf;

pub use frontmatter::split_front_matter;
pub use meta::{LangSpec, PageMeta};

use crate::core::ContentKind;

/// A JSON object map for storing arbitrary metadata fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Another language version of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternate {
    pub lang: String,
    /// Output path of the alternate page.
    pub output_path: String,
}

/// A page on its way from source to output.
///
/// ```text
/// load      source, kind, markup, output_path, meta
/// expand    lang, output_path prefix, alternates
/// render    body (markup -> HTML fragment), content (full document)
/// pipeline  content rewritten in place
/// ```
#[derive(Debug, Clone)]
pub struct Page {
    /// Source file, `None` for generated pages.
    pub source: Option<PathBuf>,
    /// How `markup` is rendered.
    pub kind: ContentKind,
    /// Source text after the front matter.
    pub markup: String,
    /// Site-rooted output path without the base path, e.g. `/blog/post/index.html`.
    pub output_path: String,
    /// Language code, set by the multilingual plugin.
    pub lang: Option<String>,
    pub meta: PageMeta,
    /// Other language versions of this page.
    pub alternates: Vec<Alternate>,
    /// Rendered HTML fragment.
    pub body: String,
    /// Final HTML document.
    pub content: String,
}

impl Page {
    /// Page loaded from a content file.
    pub fn from_source(
        source: PathBuf,
        kind: ContentKind,
        markup: String,
        output_path: String,
        meta: PageMeta,
    ) -> Self {
        Self {
            source: Some(source),
            kind,
            markup,
            output_path,
            lang: None,
            meta,
            alternates: Vec::new(),
            body: String::new(),
            content: String::new(),
        }
    }

    /// Page generated from HTML, such as an archive listing.
    pub fn generated(output_path: String, title: String, html: String) -> Self {
        Self {
            source: None,
            kind: ContentKind::Html,
            markup: html,
            output_path,
            lang: None,
            meta: PageMeta {
                title: Some(title),
                ..PageMeta::default()
            },
            alternates: Vec::new(),
            body: String::new(),
            content: String::new(),
        }
    }

    /// Public path: `/posts/hello/index.html` -> `/posts/hello/`.
    pub fn permalink(&self) -> &str {
        route::permalink(&self.output_path)
    }

    /// Title, falling back to the permalink.
    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or_else(|| self.permalink())
    }

    #[inline]
    pub fn is_draft(&self) -> bool {
        self.meta.draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_page() {
        let page = Page::generated(
            "/archive/index.html".into(),
            "Archive".into(),
            "<ul></ul>".into(),
        );
        assert!(page.source.is_none());
        assert_eq!(page.kind, ContentKind::Html);
        assert_eq!(page.permalink(), "/archive/");
        assert_eq!(page.title(), "Archive");
    }

    #[test]
    fn test_title_falls_back_to_permalink() {
        let page = Page::from_source(
            PathBuf::from("/site/content/about.md"),
            ContentKind::Markdown,
            String::new(),
            "/about/index.html".into(),
            PageMeta::default(),
        );
        assert_eq!(page.title(), "/about/");
        assert!(!page.is_draft());
    }
}
