//! Configuration file generation.
//!
//! Creates quill.toml and ignore files for new sites.

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Default config filename
pub const CONFIG_FILE: &str = "quill.toml";

/// Files to write ignore patterns to
pub const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

const CONFIG_BODY: &str = r#"[site]
title = "My Blog"
description = ""
author = ""
email = ""
# Public URL. Its path (e.g. /blog/) is where the site is mounted.
location = "https://example.com/"
languages = ["en"]
default_language = "en"

[build]
content = "content"
output = "_site"
# Copied verbatim, relative to content
copy = ["static"]
# layout = "layout.html"

[plugins]
relative_urls = true
multilingual = true

[plugins.blog]
enable = true
posts = "posts"
feed = "feed.xml"
feed_limit = 20
"#;

/// Generate quill.toml content with comments
pub fn generate_config_template() -> String {
    format!(
        "# quill configuration file (v{})\n\n{CONFIG_BODY}",
        env!("CARGO_PKG_VERSION")
    )
}

/// Write default quill.toml configuration
pub fn write_config(root: &Path) -> Result<()> {
    let content = generate_config_template();

    let path = root.join(CONFIG_FILE);
    fs::write(&path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    Ok(())
}

/// Write .gitignore and .ignore files with standard patterns
///
/// Patterns include:
/// - Output directory (e.g., `/_site/`)
/// - OS-specific files (`.DS_Store`)
pub fn write_ignore_files(root: &Path, output_dir: &Path) -> Result<()> {
    let output_pattern = Path::new("/").join(output_dir);
    let patterns = [
        output_pattern.to_string_lossy().into_owned(),
        ".DS_Store".to_string(),
    ];

    let content = patterns.join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        // Only create if doesn't exist (don't overwrite user's ignore files)
        if !path.exists() {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}
