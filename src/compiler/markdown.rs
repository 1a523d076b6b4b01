//! Markdown rendering using pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};

/// Options for markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `# Heading {#custom-id}`)
    pub heading_attributes: bool,
}

impl MarkdownOptions {
    /// Create options with all extensions enabled
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
        }
    }

    /// Convert to pulldown-cmark Options
    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        if self.heading_attributes {
            opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        opts
    }
}

/// Render Markdown to an HTML fragment.
pub fn render_markdown(markdown: &str, options: &MarkdownOptions) -> String {
    let parser = Parser::new_ext(markdown, options.to_pulldown_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(
            render_markdown("Hello *world*", &MarkdownOptions::default()),
            "<p>Hello <em>world</em></p>\n"
        );
    }

    #[test]
    fn test_site_rooted_link_kept() {
        let html = render_markdown("[cat](/img/cat.png)", &MarkdownOptions::all());
        assert_eq!(html, "<p><a href=\"/img/cat.png\">cat</a></p>\n");
    }

    #[test]
    fn test_extensions() {
        let md = "| a |\n|---|\n| 1 |\n\n~~old~~\n\n- [x] done\n\n# Title {#custom}";
        let html = render_markdown(md, &MarkdownOptions::all());
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>old</del>"));
        assert!(html.contains("checked"));
        assert!(html.contains("id=\"custom\""));

        let plain = render_markdown("~~old~~", &MarkdownOptions::default());
        assert!(!plain.contains("<del>"));
    }

    #[test]
    fn test_raw_html_passthrough() {
        let html = render_markdown("<img src=\"/a.png\">", &MarkdownOptions::all());
        assert!(html.contains("<img src=\"/a.png\">"));
    }
}
