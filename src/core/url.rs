//! Site base path handling.
//!
//! - Internal representation: always starts and ends with `/`
//! - Built once from `site.location` and shared read-only during a build

use std::sync::Arc;

use crate::config::extract_url_path;

/// URL-space prefix under which the whole site is mounted.
///
/// Invariants:
/// - Always starts with `/`
/// - Always ends with `/`
/// - Never contains empty segments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasePath(Arc<str>);

impl BasePath {
    /// Normalize a raw prefix (`docs`, `/docs`, `/docs//`) into `/docs/`.
    pub fn new(raw: &str) -> Self {
        let segments: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return Self::root();
        }
        Self(Arc::from(format!("/{}/", segments.join("/"))))
    }

    /// The root mount (`/`).
    pub fn root() -> Self {
        Self(Arc::from("/"))
    }

    /// Derive from a site location such as `https://example.com/docs/`.
    ///
    /// Invalid or missing locations mount the site at `/`.
    pub fn from_location(location: Option<&str>) -> Self {
        location
            .and_then(extract_url_path)
            .map(|path| Self::new(&path))
            .unwrap_or_else(Self::root)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.as_ref() == "/"
    }

    /// Whether `path` already starts with this prefix.
    ///
    /// `/docs` is not inside `/docs/`; it gets the prefix like any other path.
    pub fn contains(&self, path: &str) -> bool {
        path.starts_with(self.as_str())
    }

    /// Join a site-rooted path onto the prefix without duplicate separators.
    ///
    /// `/docs/` + `/guide/a.html` -> `/docs/guide/a.html`
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.0, path.trim_start_matches('/'))
    }

    /// Final URL of an output path (the path a browser sees).
    ///
    /// Output paths never carry the prefix, so it is always added.
    #[inline]
    pub fn url_for(&self, output_path: &str) -> String {
        self.join(output_path)
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::root()
    }
}

impl std::fmt::Display for BasePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for BasePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
