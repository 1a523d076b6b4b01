//! Config field paths.

/// Dotted path of a config field, e.g. `site.location`.
///
/// Paths are spelled out at each validation site so diagnostics name the
/// key exactly as it appears in `quill.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(&'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Top-level table this field lives in (`site`, `build`, `plugins`).
    pub fn section(&self) -> &'static str {
        self.0.split('.').next().unwrap_or(self.0)
    }
}
