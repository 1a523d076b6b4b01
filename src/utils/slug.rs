//! URL slugs for generated pages.

use deunicode::deunicode;

/// Lowercase ASCII slug: runs of non-alphanumerics collapse to one `-`.
///
/// Non-ASCII text is transliterated first.
///
/// ```ignore
/// assert_eq!(slugify("Rust & WebAssembly"), "rust-webassembly");
/// assert_eq!(slugify("Café Ñu"), "cafe-nu");
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Rust"), "rust");
        assert_eq!(slugify("Rust & WebAssembly"), "rust-webassembly");
        assert_eq!(slugify("  spaced  out  "), "spaced-out");
        assert_eq!(slugify("C++"), "c");
        assert_eq!(slugify("Café Ñu"), "cafe-nu");
        assert_eq!(slugify("!!!"), "");
    }
}
