//! `[plugins]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [plugins]
//! relative_urls = true
//! multilingual = true
//!
//! [plugins.blog]
//! enable = true
//! posts = "posts"        # Posts directory (relative to content)
//! feed = "feed.xml"      # RSS output path, remove to disable
//! feed_limit = 20
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginsConfig {
    /// Rewrite site-rooted URLs into page-relative ones.
    pub relative_urls: bool,

    /// Per-language page copies, prefixes and alternates.
    pub multilingual: bool,

    /// Blog preset.
    pub blog: BlogConfig,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            relative_urls: true,
            multilingual: true,
            blog: BlogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub enable: bool,

    /// Directory (relative to content) whose pages are posts.
    pub posts: PathBuf,

    /// Feed output path (relative to output).
    pub feed: Option<PathBuf>,

    /// Maximum number of feed items.
    pub feed_limit: usize,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            enable: true,
            posts: "posts".into(),
            feed: Some("feed.xml".into()),
            feed_limit: 20,
        }
    }
}

impl BlogConfig {
    /// Feed requires an absolute site location for item links.
    pub fn validate(&self, location: Option<&str>, diag: &mut ConfigDiagnostics) {
        if self.enable && self.feed.is_some() && location.is_none() {
            diag.error_with_hint(
                FieldPath::new("plugins.blog.feed"),
                "feed is enabled but site.location is not configured",
                "set site.location, e.g.: \"https://example.com\"",
            );
        }
        if self.feed_limit == 0 {
            diag.error(
                FieldPath::new("plugins.blog.feed_limit"),
                "must be greater than 0",
            );
        }
    }
}
