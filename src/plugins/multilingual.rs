//! Multilingual pages.
//!
//! ```text
//! about.md  lang = ["en", "gl"]   ->  /about/index.html     (en, default)
//!                                     /gl/about/index.html  (gl)
//! ```
//!
//! - A page whose `lang` is a list is copied once per language; `[gl]`
//!   front matter tables override `title` and `summary` of that copy
//! - A page without `lang` belongs to the default language
//! - Non-default languages get a `/<lang>` prefix
//! - Copies of one source, or pages sharing an `id`, are alternates and get
//!   `<link rel="alternate" hreflang>` tags in their `<head>`

use std::hash::Hash;
use std::path::PathBuf;

use anyhow::Result;
use rustc_hash::FxHashMap;

use super::{BuildContext, Plugin, page_href};
use crate::core::BasePath;
use crate::log;
use crate::page::{Alternate, Page, route};
use crate::pipeline::{PageTransform, Pipeline, inject_head};
use crate::utils::html::escape;

pub struct Multilingual {
    base: BasePath,
}

impl Multilingual {
    pub fn new(base: BasePath) -> Self {
        Self { base }
    }
}

/// What makes two pages versions of each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TranslationKey {
    Id(String),
    Source(PathBuf),
}

impl TranslationKey {
    fn of(page: &Page) -> Option<Self> {
        match (&page.meta.id, &page.source) {
            (Some(id), _) => Some(Self::Id(id.clone())),
            (None, Some(source)) => Some(Self::Source(source.clone())),
            (None, None) => None,
        }
    }
}

impl Plugin for Multilingual {
    fn name(&self) -> &'static str {
        "multilingual"
    }

    fn expand(&self, pages: &mut Vec<Page>, ctx: &BuildContext<'_>) -> Result<()> {
        let site = &ctx.config.site;
        let default = ctx.default_language();

        let mut expanded = Vec::with_capacity(pages.len());
        let mut keys = Vec::with_capacity(pages.len());

        for page in pages.drain(..) {
            let codes: Vec<String> = match &page.meta.lang {
                Some(spec) => spec.codes().into_iter().map(String::from).collect(),
                None => vec![default.to_string()],
            };
            let key = TranslationKey::of(&page);

            for code in codes {
                if !site.has_language(&code) {
                    log!("warning"; "{}: language `{code}` is not in site.languages", page.permalink());
                }

                let mut copy = page.clone();
                copy.meta.localize(&code, &site.languages);
                if code != default {
                    copy.output_path = route::with_language_prefix(&copy.output_path, &code);
                }
                copy.lang = Some(code);

                keys.push(key.clone());
                expanded.push(copy);
            }
        }

        link_alternates(&mut expanded, &keys);
        *pages = expanded;
        Ok(())
    }

    fn register(&self, pipeline: &mut Pipeline) {
        pipeline.push(AlternateLinks {
            base: self.base.clone(),
        });
    }
}

/// Fill `alternates` for every group of pages sharing a key.
///
/// `keys[i]` belongs to `pages[i]`; pages without a key stand alone. Only
/// pages in a different language count as alternates.
pub(super) fn link_alternates<K: Hash + Eq>(pages: &mut [Page], keys: &[Option<K>]) {
    let mut groups: FxHashMap<&K, Vec<usize>> = FxHashMap::default();
    for (i, key) in keys.iter().enumerate() {
        if let Some(key) = key {
            groups.entry(key).or_default().push(i);
        }
    }

    for members in groups.values().filter(|m| m.len() > 1) {
        for &i in members {
            let lang = pages[i].lang.clone();
            let alternates: Vec<Alternate> = members
                .iter()
                .filter(|&&j| j != i && pages[j].lang != lang)
                .filter_map(|&j| {
                    Some(Alternate {
                        lang: pages[j].lang.clone()?,
                        output_path: pages[j].output_path.clone(),
                    })
                })
                .collect();
            pages[i].alternates = alternates;
        }
    }
}

/// Injects `<link rel="alternate" hreflang="…">` for each alternate.
///
/// Hrefs are site-rooted, so `relative_urls` rewrites them like any link.
struct AlternateLinks {
    base: BasePath,
}

impl PageTransform for AlternateLinks {
    fn name(&self) -> &'static str {
        "alternate_links"
    }

    fn apply(&self, page: &mut Page) {
        if page.alternates.is_empty() {
            return;
        }
        let links: String = page
            .alternates
            .iter()
            .map(|alt| {
                format!(
                    "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\">\n",
                    escape(&alt.lang),
                    escape(&page_href(&self.base, &alt.output_path))
                )
            })
            .collect();

        if let Some(html) = inject_head(&page.content, &links) {
            page.content = html;
        }
    }
}
