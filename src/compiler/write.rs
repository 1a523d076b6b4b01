//! Output writing and output path conflict detection.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;

use crate::page::Page;

/// File a site-rooted output path is written to.
pub fn output_file(output_dir: &Path, output_path: &str) -> PathBuf {
    output_dir.join(output_path.trim_start_matches('/'))
}

/// Write a page's final HTML to disk.
pub fn write_page(page: &Page, output_dir: &Path) -> Result<PathBuf> {
    let path = output_file(output_dir, &page.output_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, &page.content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Fail if two pages claim the same output path.
///
/// All conflicts are reported, each with every source claiming it.
pub fn check_conflicts(pages: &[Page]) -> Result<()> {
    let mut claims: FxHashMap<&str, Vec<String>> = FxHashMap::default();
    for page in pages {
        let source = page.source.as_ref().map_or_else(
            || "(generated)".to_string(),
            |p| p.display().to_string(),
        );
        claims.entry(&page.output_path).or_default().push(source);
    }

    let mut conflicts: Vec<_> = claims
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .collect();
    if conflicts.is_empty() {
        return Ok(());
    }
    conflicts.sort();

    let detail = conflicts
        .iter()
        .map(|(path, sources)| format!("{path} <- {}", sources.join(", ")))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("output path conflict:\n{detail}")
}
