//! Content file -> `Page`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;

use crate::config::SiteConfig;
use crate::core::ContentKind;
use crate::page::{Page, route, split_front_matter};
use crate::utils::path::to_slash_relative;

/// Pages loaded from the content directory.
#[derive(Debug, Default)]
pub struct Loaded {
    /// Published pages, sorted by output path.
    pub pages: Vec<Page>,
    /// Drafts left out (no `--drafts`).
    pub drafts_skipped: usize,
}

/// Load every content file in parallel.
pub fn load_pages(files: &[PathBuf], config: &SiteConfig) -> Result<Loaded> {
    let loaded: Vec<Page> = files
        .par_iter()
        .map(|path| load_page(path, config))
        .collect::<Result<_>>()?;

    let total = loaded.len();
    let mut pages: Vec<Page> = loaded
        .into_iter()
        .filter(|page| config.build.drafts || !page.is_draft())
        .collect();
    pages.sort_by(|a, b| a.output_path.cmp(&b.output_path));

    Ok(Loaded {
        drafts_skipped: total - pages.len(),
        pages,
    })
}

/// Load one content file: front matter, markup and output path.
pub fn load_page(path: &Path, config: &SiteConfig) -> Result<Page> {
    let kind = ContentKind::from_path(path)
        .ok_or_else(|| anyhow!("not a content file: {}", path.display()))?;
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let (meta, markup) = split_front_matter(&source)
        .with_context(|| format!("in front matter of {}", path.display()))?;

    let output_path = match &meta.url {
        Some(url) => route::output_path_from_url(url),
        None => route::output_path_for(&to_slash_relative(path, &config.build.content), kind),
    };

    Ok(Page::from_source(
        path.to_path_buf(),
        kind,
        markup.to_string(),
        output_path,
        meta,
    ))
}
