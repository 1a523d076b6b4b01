//! Static asset copy.
//!
//! Every non-page file under the content directory, and everything under a
//! `build.copy` entry, is copied to the same relative path in the output:
//!
//! ```text
//! content/static/css/site.css   -> _site/static/css/site.css
//! content/posts/hello/cat.png   -> _site/posts/hello/cat.png
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::config::SiteConfig;
use crate::debug;

/// Output location of a content asset.
pub fn asset_output(path: &Path, config: &SiteConfig) -> Result<PathBuf> {
    let relative = path.strip_prefix(&config.build.content).map_err(|_| {
        anyhow!(
            "asset {} is outside the content directory",
            path.display()
        )
    })?;
    Ok(config.build.output.join(relative))
}

/// Copy one asset. Unless `clean`, an output at least as new as the source is kept.
///
/// Returns whether the file was copied.
pub fn copy_asset(path: &Path, config: &SiteConfig, clean: bool) -> Result<bool> {
    let output = asset_output(path, config)?;

    if !clean && output.exists() && !is_newer_than(path, &output) {
        return Ok(false);
    }

    debug!("assets"; "{}", config.root_relative(path).display());

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::copy(path, &output)
        .with_context(|| format!("failed to copy {} to {}", path.display(), output.display()))?;
    Ok(true)
}

/// Whether `a` was modified after `b`. False when either time is unknown.
pub fn is_newer_than(a: &Path, b: &Path) -> bool {
    let mtime = |p: &Path| p.metadata().and_then(|m| m.modified()).ok();
    match (mtime(a), mtime(b)) {
        (Some(a), Some(b)) => a > b,
        _ => false,
    }
}
