//! Content compilation: discovery, loading, rendering and writing.
//!
//! | Module     | Purpose                                          |
//! |------------|--------------------------------------------------|
//! | `load`     | Content file -> `Page` (front matter, route)     |
//! | `markdown` | Markdown -> HTML fragment                        |
//! | `render`   | Body + layout -> full document                   |
//! | `write`    | Page -> output file, output path conflicts       |

pub mod load;
pub mod markdown;
pub mod render;
pub mod write;

use jwalk::WalkDir;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::core::ContentKind;

const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Collect all files from a directory recursively, in a stable order.
///
/// Hidden entries (`.git`, `.draft.md`) are skipped.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .skip_hidden(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(|e| e.path())
        .collect();
    files.sort();
    files
}

/// Files found under the content directory.
#[derive(Debug, Default)]
pub struct ContentFiles {
    /// Markdown and HTML sources.
    pub pages: Vec<PathBuf>,
    /// Everything else, copied verbatim.
    pub assets: Vec<PathBuf>,
}

impl ContentFiles {
    /// Partition the content directory.
    ///
    /// Files under a `build.copy` entry are assets even when they look like pages.
    pub fn collect(config: &SiteConfig) -> Self {
        let mut files = Self::default();
        for path in collect_all_files(&config.build.content) {
            if !config.build.is_copied(&path) && ContentKind::is_content_file(&path) {
                files.pages.push(path);
            } else {
                files.assets.push(path);
            }
        }
        files
    }
}
