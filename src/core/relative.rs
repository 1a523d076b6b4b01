//! Site-rooted URL relativization.
//!
//! Rewrites `/img/cat.png` found in `/blog/post/index.html` into
//! `../../img/cat.png`, so the generated site works under any mount point.
//!
//! | Input | Result |
//! |-------|--------|
//! | `//cdn.example.com/x.js` | unchanged |
//! | `https://…`, `#top`, `./a.png`, `""` | unchanged |
//! | `/guide/a.html` (base `/docs/`) | prefixed to `/docs/guide/a.html`, then relativized |
//! | `/img/cat.png` | path from the page's directory to the target |

use std::iter;

use super::{BasePath, LinkKind};
use crate::utils::path::route::split_path_suffix;

/// Compute the URL that reaches `url` from the page emitted at `page_output_path`.
///
/// `page_output_path` is the page's final, site-rooted URL (including the base
/// path). Anything that is not a site-rooted path is returned unchanged, which
/// also makes the function a no-op on its own output.
pub fn relativize(url: &str, page_output_path: &str, base_path: &str) -> String {
    if !LinkKind::parse(url).is_site_root() {
        return url.to_string();
    }

    let base = BasePath::new(base_path);
    let (path, suffix) = split_path_suffix(url);
    let target = if base.contains(path) {
        path.to_string()
    } else {
        base.join(path)
    };

    let from = Segments::parse(page_output_path).directory();
    let mut relative = relative_path(&from, &Segments::parse(&target));
    relative.push_str(suffix);
    relative
}

/// Normalized path segments (`.` and `..` resolved, empty segments dropped).
#[derive(Debug, PartialEq, Eq)]
struct Segments<'a> {
    parts: Vec<&'a str>,
    /// Path names a directory (trailing `/`, `.` or `..`, or the root).
    is_dir: bool,
}

impl<'a> Segments<'a> {
    fn parse(path: &'a str) -> Self {
        let mut parts = Vec::new();
        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    parts.pop();
                }
                name => parts.push(name),
            }
        }

        let last = path.rsplit('/').next().unwrap_or_default();
        let is_dir = parts.is_empty() || matches!(last, "" | "." | "..");
        Self { parts, is_dir }
    }

    /// Directory a browser resolves relative links against.
    fn directory(mut self) -> Vec<&'a str> {
        if !self.is_dir {
            self.parts.pop();
        }
        self.parts
    }
}

/// Shortest `../`-prefixed or bare path from directory `from` to `target`.
fn relative_path(from: &[&str], target: &Segments<'_>) -> String {
    // A file target must always be named, even when it shares a name with
    // one of `from`'s directories.
    let shareable = if target.is_dir {
        target.parts.len()
    } else {
        target.parts.len() - 1
    };

    let common = from
        .iter()
        .zip(&target.parts[..shareable])
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = iter::repeat_n("..", from.len() - common).collect();
    parts.extend_from_slice(&target.parts[common..]);

    let mut relative = parts.join("/");

    // `a:b` would be read as a URL scheme
    if parts.first().is_some_and(|first| first.contains(':')) {
        relative.insert_str(0, "./");
    }

    if target.is_dir {
        if relative.is_empty() {
            relative.push_str("./");
        } else {
            relative.push('/');
        }
    }

    relative
}
