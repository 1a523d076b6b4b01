//! URL processing utilities.
//!
//! Provides consistent URL handling across the codebase:
//! - Link type detection (external vs internal)
//! - Query/fragment splitting

/// Check if a link is external (has a URL scheme like http:, mailto:, etc.)
///
/// A valid scheme must:
/// - Have at least 1 character before the colon
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
///
/// # Examples
/// ```ignore
/// assert!(is_external_link("https://example.com"));
/// assert!(is_external_link("mailto:user@example.com"));
/// assert!(!is_external_link("/about"));
/// assert!(!is_external_link("./file.txt"));
/// ```
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Split a URL into its path and the `?query#fragment` suffix.
///
/// The suffix keeps its leading `?` or `#` so it can be re-appended verbatim.
///
/// # Examples
/// ```ignore
/// assert_eq!(split_path_suffix("/about?x=1#team"), ("/about", "?x=1#team"));
/// assert_eq!(split_path_suffix("/about#team"), ("/about", "#team"));
/// assert_eq!(split_path_suffix("/about"), ("/about", ""));
/// ```
#[inline]
pub fn split_path_suffix(url: &str) -> (&str, &str) {
    match url.find(['?', '#']) {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_external_link() {
        assert!(is_external_link("https://example.com"));
        assert!(is_external_link("http://example.com"));
        assert!(is_external_link("mailto:user@example.com"));
        assert!(is_external_link("tel:+1234567890"));
        assert!(!is_external_link("/about"));
        assert!(!is_external_link("./file.txt"));
        assert!(!is_external_link("#section"));
        assert!(!is_external_link(":nothing"));
    }

    #[test]
    fn test_split_path_suffix() {
        assert_eq!(split_path_suffix("/about?x=1#team"), ("/about", "?x=1#team"));
        assert_eq!(split_path_suffix("/about#team"), ("/about", "#team"));
        assert_eq!(split_path_suffix("/about#a?b"), ("/about", "#a?b"));
        assert_eq!(split_path_suffix("/about"), ("/about", ""));
        assert_eq!(split_path_suffix("#top"), ("", "#top"));
    }
}
