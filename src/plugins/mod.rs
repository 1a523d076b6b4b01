//! Build plugins.
//!
//! Each plugin hooks into up to three points of `quill build`:
//!
//! | Hook       | When                             | Used by                 |
//! |------------|----------------------------------|-------------------------|
//! | `expand`   | after loading, before rendering  | multilingual, blog      |
//! | `register` | before the post-render pipeline  | multilingual, relative_urls |
//! | `finish`   | after pages are written          | blog (feed)             |
//!
//! Plugins run in a fixed order: multilingual, blog, relative_urls. Blog
//! pages are generated after language prefixes exist, and URL rewriting
//! sees every URL other transforms add.

mod blog;
mod multilingual;
mod relative_urls;

use std::path::PathBuf;

use anyhow::Result;

use crate::config::SiteConfig;
use crate::core::BasePath;
use crate::page::{Page, route};
use crate::pipeline::Pipeline;

pub use blog::Blog;
pub use multilingual::Multilingual;
pub use relative_urls::RelativeUrls;

/// Shared read-only state handed to every plugin hook.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub config: &'a SiteConfig,
}

impl<'a> BuildContext<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn output_dir(&self) -> &PathBuf {
        &self.config.build.output
    }

    /// Language every page without an explicit one belongs to.
    #[inline]
    pub fn default_language(&self) -> &str {
        self.config.site.default_language()
    }

    /// Language of `page`, falling back to the default.
    pub fn page_language<'p>(&'p self, page: &'p Page) -> &'p str {
        page.lang.as_deref().unwrap_or_else(|| self.default_language())
    }
}

/// A build extension.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Add, remove or reshape pages before rendering.
    fn expand(&self, _pages: &mut Vec<Page>, _ctx: &BuildContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Register post-render transforms.
    fn register(&self, _pipeline: &mut Pipeline) {}

    /// Emit extra output once every page is written.
    fn finish(&self, _pages: &[Page], _ctx: &BuildContext<'_>) -> Result<()> {
        Ok(())
    }
}

/// Link to an output path as a browser sees it: `/posts/a/index.html` -> `/docs/posts/a/`.
pub(crate) fn page_href(base: &BasePath, output_path: &str) -> String {
    base.join(route::permalink(output_path))
}

/// Plugins enabled in `[plugins]`, in run order.
pub fn enabled_plugins(config: &SiteConfig) -> Vec<Box<dyn Plugin>> {
    let mut plugins: Vec<Box<dyn Plugin>> = Vec::new();

    if config.plugins.multilingual {
        plugins.push(Box::new(Multilingual::new(config.build.base_path.clone())));
    }
    if config.plugins.blog.enable {
        plugins.push(Box::new(Blog::new(config)));
    }
    if config.plugins.relative_urls {
        plugins.push(Box::new(RelativeUrls::new(config.build.base_path.clone())));
    }

    plugins
}

/// Pipeline holding every transform the plugins register, in plugin order.
pub fn build_pipeline(plugins: &[Box<dyn Plugin>]) -> Pipeline {
    let mut pipeline = Pipeline::new();
    for plugin in plugins {
        plugin.register(&mut pipeline);
    }
    pipeline
}
