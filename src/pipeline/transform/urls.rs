//! URL rewriting over rendered HTML.
//!
//! Start tags are scanned for URL-bearing attributes. Each value goes through
//! a [`UrlRewriter`] and is written back in its original quoting style.
//!
//! | Attribute               | Elements                  |
//! |-------------------------|---------------------------|
//! | `href` `src` `poster`   | any                       |
//! | `action` `cite`         | any                       |
//! | `srcset` `imagesrcset`  | any, per candidate URL    |
//! | `data`                  | `object`                  |
//!
//! Contents of `<script>`, `<style>` and comments are copied untouched.
//! Values are HTML-unescaped before the hook sees them and escaped again on
//! write. Unchanged values keep their original bytes.

use std::sync::LazyLock;

use regex::Regex;

use crate::page::Page;
use crate::pipeline::PageTransform;
use crate::utils::html;

/// A comment, or a start tag with its name (1) and raw attribute text (2).
///
/// Unquoted values may contain quotes (`alt=it's`), as browsers accept them.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<!--.*?-->|<([a-zA-Z][a-zA-Z0-9:-]*)((?:"[^"]*"|'[^']*'|=\s*[^\s"'=<>`][^\s>]*|[^>"'])*)>"#,
    )
    .unwrap()
});

/// One attribute: name (1), then a double (2), single (3) or unquoted (4) value.
static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`][^\s>]*)))?"#)
        .unwrap()
});

/// Hook called for every URL found in a page.
///
/// Closures `Fn(&str, &Page) -> String` implement it directly.
pub trait UrlRewriter: Send + Sync {
    fn rewrite(&self, url: &str, page: &Page) -> String;
}

impl<F> UrlRewriter for F
where
    F: Fn(&str, &Page) -> String + Send + Sync,
{
    #[inline]
    fn rewrite(&self, url: &str, page: &Page) -> String {
        self(url, page)
    }
}

/// Transform applying a [`UrlRewriter`] to every URL attribute of a page.
///
/// The hook sees the page with its `content` taken out.
pub struct ModifyUrls {
    name: &'static str,
    rewriter: Box<dyn UrlRewriter>,
}

impl ModifyUrls {
    pub fn new(name: &'static str, rewriter: impl UrlRewriter + 'static) -> Self {
        Self {
            name,
            rewriter: Box::new(rewriter),
        }
    }
}

impl PageTransform for ModifyUrls {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, page: &mut Page) {
        let content = std::mem::take(&mut page.content);
        let rewritten = rewrite_urls(&content, |url| self.rewriter.rewrite(url, page));
        page.content = rewritten.unwrap_or(content);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrKind {
    Url,
    SrcSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Double,
    Single,
    None,
}

fn url_attr(tag: &str, attr: &str) -> Option<AttrKind> {
    match attr {
        "href" | "src" | "poster" | "action" | "cite" => Some(AttrKind::Url),
        "srcset" | "imagesrcset" => Some(AttrKind::SrcSet),
        "data" if tag == "object" => Some(AttrKind::Url),
        _ => None,
    }
}

/// Rewrite every URL attribute in `html`.
///
/// Returns `None` when nothing changed.
pub fn rewrite_urls(html: &str, mut rewrite: impl FnMut(&str) -> String) -> Option<String> {
    let mut out = String::new();
    let mut copied = 0;
    let mut pos = 0;

    while let Some(caps) = TAG.captures_at(html, pos) {
        let Some(whole) = caps.get(0) else { break };
        pos = whole.end();

        // Comments have no name group
        let (Some(name), Some(attrs)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let tag = name.as_str().to_ascii_lowercase();

        if let Some(new_attrs) = rewrite_attrs(&tag, attrs.as_str(), &mut rewrite) {
            out.push_str(&html[copied..attrs.start()]);
            out.push_str(&new_attrs);
            copied = attrs.end();
        }

        if matches!(tag.as_str(), "script" | "style") && !whole.as_str().ends_with("/>") {
            pos = find_close_tag(html, pos, &tag);
        }
    }

    if copied == 0 {
        return None;
    }
    out.push_str(&html[copied..]);
    Some(out)
}

/// Offset of `</tag` at or after `from`, or the end of input.
fn find_close_tag(html: &str, from: usize, tag: &str) -> usize {
    let needle = format!("</{tag}");
    html[from..]
        .to_ascii_lowercase()
        .find(&needle)
        .map_or(html.len(), |i| from + i)
}

/// Rewrite the URL attributes of one start tag. `None` if none changed.
fn rewrite_attrs(
    tag: &str,
    attrs: &str,
    rewrite: &mut impl FnMut(&str) -> String,
) -> Option<String> {
    let mut out = String::new();
    let mut copied = 0;

    for caps in ATTR.captures_iter(attrs) {
        let Some(name) = caps.get(1) else { continue };
        let Some(kind) = url_attr(tag, &name.as_str().to_ascii_lowercase()) else {
            continue;
        };
        let Some((value, quote)) = [(2, Quote::Double), (3, Quote::Single), (4, Quote::None)]
            .into_iter()
            .find_map(|(group, quote)| caps.get(group).map(|m| (m, quote)))
        else {
            continue;
        };

        let decoded = html::unescape(value.as_str());
        let rewritten = match kind {
            AttrKind::Url => rewrite(&*decoded),
            AttrKind::SrcSet => rewrite_srcset(&*decoded, rewrite),
        };
        if rewritten == decoded {
            continue;
        }

        out.push_str(&attrs[copied..value.start()]);
        write_value(&mut out, &rewritten, quote);
        copied = value.end();
    }

    if copied == 0 {
        return None;
    }
    out.push_str(&attrs[copied..]);
    Some(out)
}

/// Rewrite each candidate URL of a `srcset`, keeping descriptors and spacing.
///
/// `a.png 1x, b.png 2x` -> `A 1x, B 2x`
fn rewrite_srcset(value: &str, rewrite: &mut impl FnMut(&str) -> String) -> String {
    value
        .split(',')
        .map(|candidate| {
            let trimmed = candidate.trim_start();
            let lead = &candidate[..candidate.len() - trimmed.len()];
            let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
            let (url, descriptor) = trimmed.split_at(end);
            if url.is_empty() {
                return candidate.to_string();
            }
            format!("{lead}{}{descriptor}", rewrite(url))
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Write an attribute value in its original quoting.
///
/// An unquoted value that no longer fits unquoted syntax gets double quotes.
fn write_value(out: &mut String, value: &str, quote: Quote) {
    let escaped = html::escape(value);
    match quote {
        Quote::Double | Quote::Single => out.push_str(&escaped),
        Quote::None => {
            let needs_quotes = value.is_empty()
                || value
                    .chars()
                    .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '=' | '<' | '>' | '`'));
            if needs_quotes {
                out.push('"');
                out.push_str(&escaped);
                out.push('"');
            } else {
                out.push_str(&escaped);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix(html: &str) -> String {
        rewrite_urls(html, |url| {
            if url.starts_with('/') {
                format!("/base{url}")
            } else {
                url.to_string()
            }
        })
        .unwrap_or_else(|| html.to_string())
    }

    #[test]
    fn test_rewrites_href_and_src() {
        let html = r#"<a href="/about/">About</a><img src="/img/cat.png" alt="/not-a-url">"#;
        assert_eq!(
            prefix(html),
            r#"<a href="/base/about/">About</a><img src="/base/img/cat.png" alt="/not-a-url">"#
        );
    }

    #[test]
    fn test_preserves_quoting_style() {
        assert_eq!(prefix("<a href='/x'>"), "<a href='/base/x'>");
        assert_eq!(prefix("<a href=/x>"), "<a href=/base/x>");
        assert_eq!(prefix("<a class=c href = \"/x\">"), "<a class=c href = \"/base/x\">");
    }

    #[test]
    fn test_quote_inside_unquoted_value() {
        assert_eq!(
            prefix(r#"<img alt=it's src="/a.png">"#),
            r#"<img alt=it's src="/base/a.png">"#
        );
        assert_eq!(prefix(r#"<a title=say"hi" href=/x>"#), r#"<a title=say"hi" href=/base/x>"#);
    }

    #[test]
    fn test_unchanged_returns_none() {
        assert!(rewrite_urls(r#"<a href="https://x.org">x</a>"#, |u| u.to_string()).is_none());
        assert!(rewrite_urls("plain text", |_| "changed".into()).is_none());
    }

    #[test]
    fn test_srcset_candidates() {
        let html = r#"<img srcset="/a.png 1x, /b.png 2x,/c.png">"#;
        assert_eq!(
            prefix(html),
            r#"<img srcset="/base/a.png 1x, /base/b.png 2x,/base/c.png">"#
        );

        let html = r#"<link rel="preload" imagesrcset="/a.png 480w">"#;
        assert_eq!(prefix(html), r#"<link rel="preload" imagesrcset="/base/a.png 480w">"#);
    }

    #[test]
    fn test_other_url_attributes() {
        assert_eq!(
            prefix(r#"<video poster="/p.jpg"></video>"#),
            r#"<video poster="/base/p.jpg"></video>"#
        );
        assert_eq!(
            prefix(r#"<form action="/search"></form>"#),
            r#"<form action="/base/search"></form>"#
        );
        assert_eq!(
            prefix(r#"<blockquote cite="/src"></blockquote>"#),
            r#"<blockquote cite="/base/src"></blockquote>"#
        );
        assert_eq!(
            prefix(r#"<object data="/movie.swf"></object>"#),
            r#"<object data="/base/movie.swf"></object>"#
        );
        // `data` on other elements is not a URL
        assert_eq!(prefix(r#"<div data="/x"></div>"#), r#"<div data="/x"></div>"#);
    }

    #[test]
    fn test_skips_script_style_and_comments() {
        let html = concat!(
            r#"<script src="/app.js">var a = '<a href="/x">';</script>"#,
            r#"<style>a { background: url("/bg.png") }</style>"#,
            r#"<!-- <a href="/hidden"> -->"#,
            r#"<a href="/shown">"#,
        );
        let expected = concat!(
            r#"<script src="/base/app.js">var a = '<a href="/x">';</script>"#,
            r#"<style>a { background: url("/bg.png") }</style>"#,
            r#"<!-- <a href="/hidden"> -->"#,
            r#"<a href="/base/shown">"#,
        );
        assert_eq!(prefix(html), expected);
    }

    #[test]
    fn test_unclosed_script_swallows_rest() {
        let html = r#"<script>document.write('<a href="/x">')"#;
        assert_eq!(prefix(html), html);
    }

    #[test]
    fn test_unescape_then_escape() {
        let mut seen = Vec::new();
        let out = rewrite_urls(r#"<a href="/s?a=1&amp;b=2">"#, |url| {
            seen.push(url.to_string());
            format!("/base{url}")
        })
        .unwrap();
        assert_eq!(seen, vec!["/s?a=1&b=2"]);
        assert_eq!(out, r#"<a href="/base/s?a=1&amp;b=2">"#);
    }

    #[test]
    fn test_unquoted_value_gains_quotes_when_needed() {
        let out = rewrite_urls("<a href=/x>", |_| "a b".into()).unwrap();
        assert_eq!(out, r#"<a href="a b">"#);
    }

    #[test]
    fn test_attribute_names_case_insensitive() {
        assert_eq!(prefix(r#"<A HREF="/x">"#), r#"<A HREF="/base/x">"#);
    }

    #[test]
    fn test_quoted_gt_inside_value() {
        let html = r#"<a title="a > b" href="/x">"#;
        assert_eq!(prefix(html), r#"<a title="a > b" href="/base/x">"#);
    }

    #[test]
    fn test_multibyte_text_around_tags() {
        let html = "<p>Olá → <a href=\"/ç\">ç</a></p>";
        assert_eq!(prefix(html), "<p>Olá → <a href=\"/base/ç\">ç</a></p>");
    }

    #[test]
    fn test_modify_urls_transform() {
        let transform = ModifyUrls::new("test", |url: &str, page: &Page| {
            format!("{}{url}", page.output_path.len())
        });
        let mut page = Page::generated("/index.html".into(), "T".into(), String::new());
        page.content = r#"<a href="/x">"#.into();
        transform.apply(&mut page);
        assert_eq!(page.content, r#"<a href="11/x">"#);
        assert_eq!(transform.name(), "test");
    }
}
