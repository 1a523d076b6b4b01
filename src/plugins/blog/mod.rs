//! Blog preset.
//!
//! Pages whose source lives under `plugins.blog.posts` are posts, newest
//! first. The plugin generates listing pages per language and an RSS feed.
//!
//! ```text
//! /archive/index.html          all posts, plus the tag list
//! /archive/<tag>/index.html    posts with that tag
//! /gl/archive/...              same, for each other language with posts
//! /feed.xml                    newest posts in the default language
//! ```

mod feed;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::multilingual::link_alternates;
use super::{BuildContext, Plugin, page_href};
use crate::config::{BlogConfig, SiteConfig};
use crate::core::BasePath;
use crate::page::{Page, route};
use crate::utils::html::escape;
use crate::utils::plural::plural_count;
use crate::utils::slug::slugify;
use crate::{debug, log};

const ARCHIVE_PATH: &str = "/archive/index.html";

fn tag_path(slug: &str) -> String {
    format!("/archive/{slug}/index.html")
}

pub struct Blog {
    config: BlogConfig,
    /// Absolute posts directory.
    posts_dir: PathBuf,
    base: BasePath,
}

impl Blog {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            config: config.plugins.blog.clone(),
            posts_dir: config.build.content.join(&config.plugins.blog.posts),
            base: config.build.base_path.clone(),
        }
    }

    /// Whether `page` is a post. Section indexes under the posts dir are not.
    fn is_post(&self, page: &Page) -> bool {
        page.source.as_deref().is_some_and(|source| {
            source.starts_with(&self.posts_dir)
                && source.file_stem().is_some_and(|stem| stem != "index")
        })
    }

    /// Posts in `lang`, newest first. Undated posts go last.
    fn posts<'p>(&self, pages: &'p [Page], lang: &str, ctx: &BuildContext<'_>) -> Vec<&'p Page> {
        let mut posts: Vec<&Page> = pages
            .iter()
            .filter(|page| self.is_post(page) && ctx.page_language(page) == lang)
            .collect();
        posts.sort_by(|a, b| {
            b.meta
                .datetime()
                .cmp(&a.meta.datetime())
                .then_with(|| a.output_path.cmp(&b.output_path))
        });
        posts
    }

    /// Languages that get their own listing pages.
    fn languages(ctx: &BuildContext<'_>) -> Vec<String> {
        if ctx.config.plugins.multilingual {
            ctx.config.site.languages.clone()
        } else {
            vec![ctx.default_language().to_string()]
        }
    }

    /// Archive and tag pages for one language, each with its unprefixed path.
    fn listing_pages(
        &self,
        posts: &[&Page],
        lang: &str,
        ctx: &BuildContext<'_>,
    ) -> Vec<(String, Page)> {
        let localize = |output_path: &str| {
            if lang == ctx.default_language() {
                output_path.to_string()
            } else {
                route::with_language_prefix(output_path, lang)
            }
        };

        let mut tags: BTreeMap<String, (&str, Vec<&Page>)> = BTreeMap::new();
        for &post in posts {
            for tag in &post.meta.tags {
                let slug = slugify(tag);
                if slug.is_empty() {
                    continue;
                }
                tags.entry(slug)
                    .or_insert_with(|| (tag.as_str(), Vec::new()))
                    .1
                    .push(post);
            }
        }

        let mut archive_html = String::from("<h1>Archive</h1>\n");
        archive_html.push_str(&self.post_list(posts));
        if !tags.is_empty() {
            archive_html.push_str("<h2>Tags</h2>\n<ul class=\"tags\">\n");
            for (slug, (name, tagged)) in &tags {
                let href = page_href(&self.base, &localize(&tag_path(slug)));
                archive_html.push_str(&format!(
                    "<li><a href=\"{}\">{}</a> ({})</li>\n",
                    escape(&href),
                    escape(name),
                    tagged.len()
                ));
            }
            archive_html.push_str("</ul>\n");
        }

        let mut listings = vec![(ARCHIVE_PATH.to_string(), "Archive".to_string(), archive_html)];
        for (slug, (name, tagged)) in &tags {
            let html = format!("<h1>Tag: {}</h1>\n{}", escape(name), self.post_list(tagged));
            listings.push((tag_path(slug), format!("Tag: {name}"), html));
        }

        let page_lang = ctx.config.plugins.multilingual.then(|| lang.to_string());
        listings
            .into_iter()
            .map(|(path, title, html)| {
                let mut page = Page::generated(localize(&path), title, html);
                page.lang = page_lang.clone();
                (path, page)
            })
            .collect()
    }

    /// `<ul>` of posts with date and title.
    fn post_list(&self, posts: &[&Page]) -> String {
        let mut html = String::from("<ul class=\"posts\">\n");
        for post in posts {
            html.push_str("<li>");
            if let Some(date) = post.meta.datetime() {
                let ymd = date.to_ymd();
                html.push_str(&format!("<time datetime=\"{ymd}\">{ymd}</time> "));
            }
            html.push_str(&format!(
                "<a href=\"{}\">{}</a></li>\n",
                escape(&page_href(&self.base, &post.output_path)),
                escape(post.title())
            ));
        }
        html.push_str("</ul>\n");
        html
    }

    fn write_feed(&self, feed_path: &Path, pages: &[Page], ctx: &BuildContext<'_>) -> Result<()> {
        let mut posts = self.posts(pages, ctx.default_language(), ctx);
        posts.truncate(self.config.feed_limit);

        let xml = feed::build_rss(&posts, ctx.config)?;
        let path = ctx.output_dir().join(feed_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&path, xml).with_context(|| format!("failed to write {}", path.display()))?;

        log!("rss"; "{} ({})", feed_path.display(), plural_count(posts.len(), "item"));
        Ok(())
    }
}

impl Plugin for Blog {
    fn name(&self) -> &'static str {
        "blog"
    }

    fn expand(&self, pages: &mut Vec<Page>, ctx: &BuildContext<'_>) -> Result<()> {
        let mut generated = Vec::new();
        let mut keys = Vec::new();

        for lang in Self::languages(ctx) {
            let posts = self.posts(pages, &lang, ctx);
            if posts.is_empty() && lang != ctx.default_language() {
                continue;
            }
            debug!("blog"; "{}: {}", lang, plural_count(posts.len(), "post"));
            for (key, page) in self.listing_pages(&posts, &lang, ctx) {
                keys.push(Some(key));
                generated.push(page);
            }
        }

        if ctx.config.plugins.multilingual {
            link_alternates(&mut generated, &keys);
        }

        pages.extend(generated);
        Ok(())
    }

    fn finish(&self, pages: &[Page], ctx: &BuildContext<'_>) -> Result<()> {
        match &self.config.feed {
            Some(feed_path) if ctx.config.site.location.is_some() => {
                self.write_feed(feed_path, pages, ctx)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::core::ContentKind;
    use crate::page::split_front_matter;
    use crate::plugins::Multilingual;

    fn config(extra: &str) -> SiteConfig {
        let mut config = test_parse_config(extra);
        config.build.content = PathBuf::from("/site/content");
        config
    }

    fn post(rel: &str, front_matter: &str) -> Page {
        let (meta, body) = split_front_matter(front_matter).unwrap();
        let kind = ContentKind::Markdown;
        Page::from_source(
            PathBuf::from("/site/content").join(rel),
            kind,
            body.to_string(),
            route::output_path_for(rel, kind),
            meta,
        )
    }

    fn site() -> Vec<Page> {
        vec![
            post("index.md", "# Home"),
            post("posts/index.md", "# Posts"),
            post("posts/old.md", "---\ntitle: Old\ndate: 2023-05-01\ntags: rust\n---\n"),
            post("posts/new.md", "---\ntitle: New\ndate: 2024-02-01\ntags: Rust, Web Dev\n---\n"),
            post("posts/undated.md", "---\ntitle: Undated\n---\n"),
        ]
    }

    fn find<'a>(pages: &'a [Page], output_path: &str) -> &'a Page {
        pages
            .iter()
            .find(|p| p.output_path == output_path)
            .unwrap_or_else(|| panic!("missing {output_path}"))
    }

    #[test]
    fn test_posts_sorted_newest_first() {
        let config = config("");
        let ctx = BuildContext::new(&config);
        let blog = Blog::new(&config);
        let pages = site();

        let titles: Vec<_> = blog.posts(&pages, "en", &ctx).iter().map(|p| p.title()).collect();
        assert_eq!(titles, vec!["New", "Old", "Undated"]);
    }

    #[test]
    fn test_archive_and_tag_pages() {
        let config = config("[plugins]\nmultilingual = false");
        let ctx = BuildContext::new(&config);
        let mut pages = site();
        Blog::new(&config).expand(&mut pages, &ctx).unwrap();

        let archive = find(&pages, "/archive/index.html");
        assert!(archive.source.is_none());
        assert!(archive.lang.is_none());
        let new = archive.markup.find("/posts/new/").unwrap();
        let old = archive.markup.find("/posts/old/").unwrap();
        assert!(new < old);
        assert!(archive.markup.contains("<time datetime=\"2024-02-01\">"));
        // Display name comes from the newest post using the tag
        assert!(archive.markup.contains("<a href=\"/archive/rust/\">Rust</a> (2)"));
        assert!(!archive.markup.contains("/posts/\""));

        let rust = find(&pages, "/archive/rust/index.html");
        assert_eq!(rust.title(), "Tag: Rust");
        assert!(rust.markup.contains("/posts/old/"));
        assert!(rust.markup.contains("/posts/new/"));

        let web = find(&pages, "/archive/web-dev/index.html");
        assert!(!web.markup.contains("/posts/old/"));
    }

    #[test]
    fn test_listing_links_carry_base_path() {
        let mut config = config("location = \"https://example.com/docs/\"\n[plugins]\nmultilingual = false");
        config.build.base_path = BasePath::from_location(config.site.location.as_deref());
        let ctx = BuildContext::new(&config);
        let mut pages = site();
        Blog::new(&config).expand(&mut pages, &ctx).unwrap();

        let archive = find(&pages, "/archive/index.html");
        assert!(archive.markup.contains("href=\"/docs/posts/new/\""));
    }

    #[test]
    fn test_per_language_archives() {
        let config = config("languages = [\"en\", \"gl\", \"fr\"]");
        let ctx = BuildContext::new(&config);
        let mut pages = vec![post(
            "posts/hello.md",
            "---\ntitle: Hello\nlang: [en, gl]\ndate: 2024-01-01\n---\n",
        )];
        Multilingual::new(BasePath::root()).expand(&mut pages, &ctx).unwrap();
        Blog::new(&config).expand(&mut pages, &ctx).unwrap();

        let en = find(&pages, "/archive/index.html");
        assert_eq!(en.lang.as_deref(), Some("en"));
        assert!(en.markup.contains("href=\"/posts/hello/\""));

        let gl = find(&pages, "/gl/archive/index.html");
        assert_eq!(gl.lang.as_deref(), Some("gl"));
        assert!(gl.markup.contains("href=\"/gl/posts/hello/\""));
        assert_eq!(gl.alternates[0].output_path, "/archive/index.html");

        // No posts in fr: no archive
        assert!(pages.iter().all(|p| !p.output_path.starts_with("/fr/")));
    }

    #[test]
    fn test_feed_written_on_finish() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = config(
            "location = \"https://example.com/\"\n[plugins]\nmultilingual = false\n[plugins.blog]\nfeed_limit = 1",
        );
        config.build.output = dir.path().to_path_buf();
        let ctx = BuildContext::new(&config);
        let pages = site();

        Blog::new(&config).finish(&pages, &ctx).unwrap();
        let xml = fs::read_to_string(dir.path().join("feed.xml")).unwrap();
        assert!(xml.contains("<title>New</title>"));
        assert!(!xml.contains("<title>Old</title>"));
    }

    #[test]
    fn test_no_feed_without_location() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = config("");
        config.build.output = dir.path().to_path_buf();
        let ctx = BuildContext::new(&config);

        Blog::new(&config).finish(&site(), &ctx).unwrap();
        assert!(!dir.path().join("feed.xml").exists());
    }
}
