//! Post-render page pipeline.
//!
//! Runs after every page has its final HTML document and before anything is
//! written. Plugins register transforms; the build runs them.
//!
//! ```text
//! render ──► Pipeline::run ──► write
//!                 │
//!                 ├─ AlternateLinks   (multilingual)
//!                 └─ ModifyUrls       (relative_urls, always last)
//! ```
//!
//! Transforms run in registration order on each page. Pages are independent
//! and run in parallel on the rayon pool.

pub mod transform;

use rayon::prelude::*;

use crate::page::Page;

pub use transform::{ModifyUrls, inject_head};

/// A rewrite of a page's final HTML.
pub trait PageTransform: Send + Sync {
    /// Short name for debug output.
    fn name(&self) -> &'static str;

    /// Mutate `page.content` in place.
    fn apply(&self, page: &mut Page);
}

/// Ordered list of post-render transforms.
#[derive(Default)]
pub struct Pipeline {
    transforms: Vec<Box<dyn PageTransform>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transform. It runs after every transform pushed before it.
    pub fn push(&mut self, transform: impl PageTransform + 'static) {
        self.transforms.push(Box::new(transform));
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Transform names in run order.
    pub fn names(&self) -> Vec<&'static str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }

    /// Apply every transform to one page.
    pub fn apply(&self, page: &mut Page) {
        for transform in &self.transforms {
            transform.apply(page);
        }
    }

    /// Apply every transform to every page.
    pub fn run(&self, pages: &mut [Page]) {
        if self.is_empty() {
            return;
        }
        pages.par_iter_mut().for_each(|page| self.apply(page));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Append(&'static str);

    impl PageTransform for Append {
        fn name(&self) -> &'static str {
            self.0
        }

        fn apply(&self, page: &mut Page) {
            page.content.push_str(self.0);
        }
    }

    fn page(path: &str) -> Page {
        Page::generated(path.into(), "T".into(), String::new())
    }

    #[test]
    fn test_runs_in_registration_order() {
        let mut pipeline = Pipeline::new();
        pipeline.push(Append("a"));
        pipeline.push(Append("b"));
        pipeline.push(Append("c"));
        assert_eq!(pipeline.names(), vec!["a", "b", "c"]);

        let mut pages = vec![page("/x/index.html"), page("/y/index.html")];
        pipeline.run(&mut pages);
        assert!(pages.iter().all(|p| p.content == "abc"));
    }

    #[test]
    fn test_empty_pipeline_leaves_pages() {
        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());

        let mut pages = vec![page("/index.html")];
        pages[0].content = "<p>x</p>".into();
        pipeline.run(&mut pages);
        assert_eq!(pages[0].content, "<p>x</p>");
    }

    #[test]
    fn test_closure_rewriter_in_pipeline() {
        let mut pipeline = Pipeline::new();
        pipeline.push(ModifyUrls::new("prefix", |url: &str, page: &Page| {
            format!("{}{url}", page.lang.as_deref().unwrap_or(""))
        }));

        let mut p = page("/index.html");
        p.lang = Some("gl".into());
        p.content = r#"<a href="/a">a</a>"#.into();
        pipeline.apply(&mut p);
        assert_eq!(p.content, r#"<a href="gl/a">a</a>"#);
    }
}
