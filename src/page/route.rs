//! Source to output path mapping.
//!
//! Output paths are site-rooted and never include the base path.
//!
//! ```text
//! content/index.md            -> /index.html
//! content/about.md            -> /about/index.html
//! content/posts/index.md      -> /posts/index.html
//! content/posts/hello.md      -> /posts/hello/index.html
//! content/legacy/page.html    -> /legacy/page.html
//! url = "/custom/"            -> /custom/index.html
//! ```

use crate::core::ContentKind;

/// Output path for a content file at slash-separated `relative` path.
pub fn output_path_for(relative: &str, kind: ContentKind) -> String {
    let relative = relative.trim_start_matches('/');
    let (dir, file) = match relative.rsplit_once('/') {
        Some((dir, file)) => (format!("/{dir}/"), file),
        None => ("/".to_string(), relative),
    };
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);

    match kind {
        ContentKind::Html => format!("{dir}{file}"),
        ContentKind::Markdown if stem == "index" => format!("{dir}index.html"),
        ContentKind::Markdown => format!("{dir}{stem}/index.html"),
    }
}

/// Output path for a front matter `url` override.
///
/// A value ending in `/` (or empty) names a directory and gets `index.html`.
pub fn output_path_from_url(url: &str) -> String {
    let path = format!("/{}", url.trim_start_matches('/'));
    if path.ends_with('/') {
        format!("{path}index.html")
    } else {
        path
    }
}

/// Public path of a page: `/posts/hello/index.html` -> `/posts/hello/`.
pub fn permalink(output_path: &str) -> &str {
    output_path
        .strip_suffix("index.html")
        .filter(|dir| dir.ends_with('/'))
        .unwrap_or(output_path)
}

/// Prefix an output path with a language segment: `/about/` -> `/gl/about/`.
pub fn with_language_prefix(output_path: &str, lang: &str) -> String {
    format!("/{lang}{output_path}")
}
