//! Link classification utilities.

use crate::utils::path::route::is_external_link;

/// Syntactic classification of links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// Protocol-relative link (//cdn.example.com/lib.js).
    ProtocolRelative(&'a str),
    /// External link with URL scheme (https://, mailto:, javascript:, etc.)
    External(&'a str),
    /// Pure fragment/anchor link (#section). Value is anchor without `#`.
    Fragment(&'a str),
    /// Site-root-relative path (/about, /posts/hello).
    SiteRoot(&'a str),
    /// Document-relative path (./image.png, ../other, other.html) or empty.
    Relative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a link string into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if link.starts_with("//") {
            Self::ProtocolRelative(link)
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else if is_external_link(link) {
            Self::External(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else {
            Self::Relative(link)
        }
    }

    /// Whether this link is rewritten when relativizing a page.
    #[inline]
    pub const fn is_site_root(&self) -> bool {
        matches!(self, Self::SiteRoot(_))
    }
}
