//! Site directory structure and starter content.

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Directories every new site gets.
pub const SITE_DIRS: &[&str] = &["content/posts", "content/static"];

/// Starter pages, relative to the site root.
pub const STARTER_FILES: &[(&str, &str)] = &[
    (
        "content/index.md",
        r#"+++
title = "Home"
+++

# Welcome

This site is built with quill. Read the [first post](/posts/hello/) or
browse the [archive](/archive/).
"#,
    ),
    (
        "content/posts/hello.md",
        r#"+++
title = "Hello, world"
date = 2024-01-01
summary = "The first post."
tags = ["meta"]
+++

Posts live in `content/posts`. Links such as [home](/) are rewritten
relative to each page, so the site works under any path.
"#,
    ),
];

/// Create site directory structure at the given root.
///
/// The root directory is created if it doesn't exist.
pub fn create_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory '{}'", path.display()))?;
    }
    Ok(())
}

/// Write starter pages, keeping any file that already exists.
pub fn write_starter_content(root: &Path) -> Result<()> {
    for (rel, text) in STARTER_FILES {
        let path = root.join(rel);
        if path.exists() {
            continue;
        }
        fs::write(&path, text).with_context(|| format!("Failed to write '{}'", path.display()))?;
    }
    Ok(())
}
