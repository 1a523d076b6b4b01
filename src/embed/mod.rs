//! Embedded templates.
//!
//! ```ignore
//! use embed::{LAYOUT_HTML, LayoutVars};
//!
//! let html = LAYOUT_HTML.render(&LayoutVars {
//!     lang: "en",
//!     title: "Hello",
//!     head: "",
//!     content: "<p>Hi</p>",
//! });
//! ```

mod template;

pub use template::{Template, TemplateVars};

/// Variables for the page layout.
///
/// `title` is escaped on substitution; `head` and `content` are HTML.
pub struct LayoutVars<'a> {
    pub lang: &'a str,
    pub title: &'a str,
    pub head: &'a str,
    pub content: &'a str,
}

impl TemplateVars for LayoutVars<'_> {
    fn apply(&self, content: &str) -> String {
        use crate::utils::html::escape;

        // `content` last, so placeholders inside page text stay literal
        content
            .replace("{{ lang }}", &escape(self.lang))
            .replace("{{ title }}", &escape(self.title))
            .replace("{{ head }}", self.head)
            .replace("{{ content }}", self.content)
    }
}

/// Built-in page layout.
pub const LAYOUT_HTML: Template = Template::new(include_str!("layout.html"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_layout() {
        let html = LAYOUT_HTML.render(&LayoutVars {
            lang: "gl",
            title: "Tom & Jerry",
            head: "<meta name=\"x\">",
            content: "<p>Hi</p>",
        });
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"gl\">"));
        assert!(html.contains("<title>Tom &amp; Jerry</title>"));
        assert!(html.contains("<meta name=\"x\">\n</head>"));
        assert!(html.contains("<main>\n<p>Hi</p>\n</main>"));
    }

    #[test]
    fn test_content_placeholders_stay_literal() {
        let layout = Template::from_string("<body>{{ content }}</body>".into());
        let html = layout.render(&LayoutVars {
            lang: "en",
            title: "t",
            head: "",
            content: "write {{ title }} in layouts",
        });
        assert_eq!(html, "<body>write {{ title }} in layouts</body>");
    }
}
