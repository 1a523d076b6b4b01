//! RSS 2.0 feed for blog posts.
//!
//! Item links are absolute, built from `site.location`.

use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow};
use regex::Regex;
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use url::Url;

use crate::config::{SiteConfig, SiteSectionConfig};
use crate::page::Page;
use crate::utils::date::DateTimeUtc;

/// Render the feed for `posts` (already sorted and limited).
pub fn build_rss(posts: &[&Page], config: &SiteConfig) -> Result<String> {
    let location = config
        .site
        .location
        .as_deref()
        .ok_or_else(|| anyhow!("feed requires site.location"))?;
    let root = site_root(location)?;

    let items = posts
        .iter()
        .map(|post| post_to_rss_item(post, &root, &config.site))
        .collect::<Result<Vec<_>>>()?;

    let channel = ChannelBuilder::default()
        .title(&config.site.title)
        .link(root.as_str())
        .description(&config.site.description)
        .language(config.site.default_language().to_string())
        .generator("quill".to_string())
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("RSS validation failed: {e}"))?;
    Ok(channel.to_string())
}

/// `https://example.com/docs` -> `https://example.com/docs/`, ready for `join`.
fn site_root(location: &str) -> Result<Url> {
    let mut root = location.to_string();
    if !root.ends_with('/') {
        root.push('/');
    }
    Url::parse(&root).with_context(|| format!("invalid site.location: {location}"))
}

fn post_to_rss_item(post: &Page, root: &Url, site: &SiteSectionConfig) -> Result<rss::Item> {
    let link = root
        .join(post.permalink().trim_start_matches('/'))
        .with_context(|| format!("invalid feed link for {}", post.permalink()))?
        .to_string();

    Ok(ItemBuilder::default()
        .title(Some(post.title().to_string()))
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(post.meta.summary.clone())
        .pub_date(post.meta.datetime().map(DateTimeUtc::to_rfc2822))
        .author(rss_author(post.meta.author.as_deref(), site))
        .categories(
            post.meta
                .tags
                .iter()
                .map(|tag| rss::CategoryBuilder::default().name(tag.as_str()).build())
                .collect::<Vec<_>>(),
        )
        .build())
}

/// RSS wants `email (Name)`.
///
/// An author already in that form is kept. Otherwise the site email is
/// combined with the post or site author name. No email, no author.
fn rss_author(author: Option<&str>, site: &SiteSectionConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$").unwrap()
    });

    let name = author.unwrap_or(&site.author);
    if RE_VALID_AUTHOR.is_match(name) {
        return Some(name.to_string());
    }
    if site.email.is_empty() {
        return None;
    }
    if name.is_empty() {
        return Some(site.email.clone());
    }
    Some(format!("{} ({})", site.email, name))
}
