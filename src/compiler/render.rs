//! Page rendering: markup -> body -> full document.

use std::fs;

use anyhow::{Context, Result};

use super::markdown::{MarkdownOptions, render_markdown};
use crate::config::SiteConfig;
use crate::core::ContentKind;
use crate::embed::{LAYOUT_HTML, LayoutVars, Template};
use crate::page::Page;
use crate::utils::html::escape;

/// Renders pages into complete HTML documents.
pub struct Renderer {
    layout: Template,
    markdown: MarkdownOptions,
    site_title: String,
    site_description: String,
    default_language: String,
}

impl Renderer {
    /// Renderer using `build.layout`, or the built-in layout.
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let layout = match &config.build.layout {
            Some(path) => Template::from_string(
                fs::read_to_string(path)
                    .with_context(|| format!("failed to read layout {}", path.display()))?,
            ),
            None => LAYOUT_HTML,
        };

        Ok(Self {
            layout,
            markdown: MarkdownOptions::all(),
            site_title: config.site.title.clone(),
            site_description: config.site.description.clone(),
            default_language: config.site.default_language().to_string(),
        })
    }

    /// Fill `page.body` and `page.content`.
    ///
    /// An HTML source that is already a full document is used as-is.
    pub fn render(&self, page: &mut Page) {
        page.body = match page.kind {
            ContentKind::Markdown => render_markdown(&page.markup, &self.markdown),
            ContentKind::Html => page.markup.clone(),
        };

        if page.kind == ContentKind::Html && is_full_document(&page.body) {
            page.content = page.body.clone();
            return;
        }

        let title = self.document_title(page);
        let head = self.head(page);
        page.content = self.layout.render(&LayoutVars {
            lang: page.lang.as_deref().unwrap_or(&self.default_language),
            title: &title,
            head: &head,
            content: &page.body,
        });
    }

    /// `Page - Site`, or whichever of the two exists.
    fn document_title(&self, page: &Page) -> String {
        match (page.meta.title.as_deref(), self.site_title.as_str()) {
            (Some(title), "") => title.to_string(),
            (Some(title), site) if title != site => format!("{title} - {site}"),
            (_, "") => page.permalink().to_string(),
            (_, site) => site.to_string(),
        }
    }

    /// Head elements derived from page metadata.
    fn head(&self, page: &Page) -> String {
        let mut head = String::new();

        let description = page
            .meta
            .summary
            .as_deref()
            .unwrap_or(&self.site_description);
        if !description.is_empty() {
            head.push_str(&format!(
                "<meta name=\"description\" content=\"{}\">\n",
                escape(description)
            ));
        }
        if let Some(author) = &page.meta.author {
            head.push_str(&format!(
                "<meta name=\"author\" content=\"{}\">\n",
                escape(author)
            ));
        }

        head.truncate(head.trim_end().len());
        head
    }
}

/// Whether HTML text carries its own document shell.
fn is_full_document(html: &str) -> bool {
    let prefix: String = html.trim_start().chars().take(9).collect();
    let prefix = prefix.to_ascii_lowercase();
    prefix.starts_with("<!doctype") || prefix.starts_with("<html")
}
