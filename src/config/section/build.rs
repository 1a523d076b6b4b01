//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "content"       # Source directory (relative to site root)
//! output = "_site"          # Output directory (relative to site root)
//! copy = ["static"]         # Copied verbatim (relative to content)
//! layout = "layout.html"    # Optional page shell (relative to site root)
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::core::BasePath;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// URL path prefix the site is mounted under.
    /// Derived from `site.location`.
    #[serde(skip)]
    pub base_path: BasePath,

    /// Content source directory.
    pub content: PathBuf,

    /// Build output directory.
    pub output: PathBuf,

    /// Files and directories copied as-is, relative to `content`.
    pub copy: Vec<PathBuf>,

    /// Page layout with `{{ lang }}`, `{{ title }}`, `{{ head }}`, `{{ content }}`.
    pub layout: Option<PathBuf>,

    /// Clean output directory before building (CLI only).
    #[serde(skip)]
    pub clean: bool,

    /// Include draft pages (CLI only).
    #[serde(skip)]
    pub drafts: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            base_path: BasePath::root(),
            content: "content".into(),
            output: "_site".into(),
            copy: vec!["static".into()],
            layout: None,
            clean: false,
            drafts: false,
        }
    }
}

impl BuildSectionConfig {
    /// Validate build configuration (after path normalization).
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.content.is_dir() {
            diag.error_with_hint(
                FieldPath::new("build.content"),
                format!("directory '{}' not found", self.content.display()),
                "create it or point build.content at your pages",
            );
        }

        if let Some(layout) = &self.layout
            && !layout.is_file()
        {
            diag.error(
                FieldPath::new("build.layout"),
                format!("layout file '{}' not found", layout.display()),
            );
        }

        for entry in &self.copy {
            if !self.content.join(entry).exists() {
                diag.hint(
                    FieldPath::new("build.copy"),
                    format!("'{}' not found, skipping", entry.display()),
                );
            }
        }
    }

    /// Absolute source paths of the static copy entries.
    pub fn copy_sources(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.copy.iter().map(|entry| self.content.join(entry))
    }

    /// Whether a content file belongs to a static copy entry.
    pub fn is_copied(&self, path: &Path) -> bool {
        self.copy_sources().any(|source| path.starts_with(&source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.content, PathBuf::from("content"));
        assert_eq!(config.build.output, PathBuf::from("_site"));
        assert_eq!(config.build.copy, vec![PathBuf::from("static")]);
        assert!(config.build.layout.is_none());
        assert!(config.build.base_path.is_root());
    }

    #[test]
    fn test_custom_build() {
        let config = test_parse_config(
            r#"
[build]
content = "src"
output = "public"
copy = ["img", "favicon.ico"]
layout = "layout.html"
"#,
        );
        assert_eq!(config.build.content, PathBuf::from("src"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.copy.len(), 2);
        assert_eq!(config.build.layout, Some(PathBuf::from("layout.html")));
    }

    #[test]
    fn test_is_copied() {
        let mut build = BuildSectionConfig::default();
        build.content = PathBuf::from("/site/content");
        build.copy = vec!["static".into(), "favicon.ico".into()];

        assert!(build.is_copied(Path::new("/site/content/static/a.css")));
        assert!(build.is_copied(Path::new("/site/content/favicon.ico")));
        assert!(!build.is_copied(Path::new("/site/content/staticky.md")));
        assert!(!build.is_copied(Path::new("/site/content/posts/a.md")));
    }

    #[test]
    fn test_validate_missing_content() {
        let mut build = BuildSectionConfig::default();
        build.content = PathBuf::from("/definitely/not/here");
        build.copy.clear();
        let mut diag = ConfigDiagnostics::new();
        build.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
