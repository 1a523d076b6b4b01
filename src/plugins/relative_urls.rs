//! Relative URL rewriting.
//!
//! Every site-rooted URL in a page becomes a path relative to the page's own
//! final location, so the output works under any mount prefix.
//!
//! ```text
//! base /docs/, page /guide/index.html
//!   /guide/other.html  -> other.html
//!   /img/logo.png      -> ../img/logo.png
//!   https://x.org/     -> https://x.org/
//! ```

use super::Plugin;
use crate::core::{BasePath, relativize};
use crate::page::Page;
use crate::pipeline::{ModifyUrls, Pipeline};

pub struct RelativeUrls {
    base: BasePath,
}

impl RelativeUrls {
    pub fn new(base: BasePath) -> Self {
        Self { base }
    }
}

impl Plugin for RelativeUrls {
    fn name(&self) -> &'static str {
        "relative_urls"
    }

    fn register(&self, pipeline: &mut Pipeline) {
        let base = self.base.clone();
        pipeline.push(ModifyUrls::new(
            "relative_urls",
            move |url: &str, page: &Page| {
                relativize(url, &base.url_for(&page.output_path), base.as_str())
            },
        ));
    }
}
