//! Front matter extraction.
//!
//! Two fence styles at the very start of a file:
//!
//! ```text
//! +++                      ---
//! title = "Hello"          title: Hello
//! tags = ["a", "b"]        tags: [a, b]
//! +++                      ---
//! ```
//!
//! `+++` is parsed as TOML and `---` as YAML, both straight into [`PageMeta`].

use anyhow::{Context, Result};
use serde::Deserialize;

use super::PageMeta;

/// Split `content` into metadata and body.
///
/// Files without front matter get default metadata and the whole content as body.
pub fn split_front_matter(content: &str) -> Result<(PageMeta, &str)> {
    match detect(content) {
        Some((fm, body, Fence::Toml)) => Ok((parse_toml(fm)?, body)),
        Some((fm, body, Fence::Yaml)) => Ok((parse_yaml(fm)?, body)),
        None => Ok((PageMeta::default(), content)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fence {
    Toml,
    Yaml,
}

/// Returns `(front matter, body, fence)` if a fenced block opens the file.
fn detect(content: &str) -> Option<(&str, &str, Fence)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    let (marker, fence) = if trimmed.starts_with("+++") {
        ("\n+++", Fence::Toml)
    } else if trimmed.starts_with("---") {
        ("\n---", Fence::Yaml)
    } else {
        return None;
    };

    let inner = &trimmed[3..];
    let end = inner.find(marker)?;
    let fm = inner[..end].trim();
    let body = inner[end + marker.len()..]
        .trim_start_matches(['\r', '\n']);
    Some((fm, body, fence))
}

/// Parse TOML front matter.
///
/// Unquoted TOML dates (`date = 2024-01-01`) are kept as their text.
fn parse_toml(content: &str) -> Result<PageMeta> {
    let mut table: toml::Table = toml::from_str(content).context("invalid TOML front matter")?;
    for (_, value) in table.iter_mut() {
        if let toml::Value::Datetime(dt) = value {
            *value = toml::Value::String(dt.to_string());
        }
    }
    PageMeta::deserialize(toml::Value::Table(table)).context("invalid TOML front matter")
}

/// Parse YAML front matter.
///
/// YAML has no date type here, so `date: 2024-01-01` already arrives as text.
fn parse_yaml(content: &str) -> Result<PageMeta> {
    // An empty document is `null`, which a struct rejects
    if content.is_empty() {
        return Ok(PageMeta::default());
    }
    serde_yaml::from_str(content).context("invalid YAML front matter")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::LangSpec;
    use serde_json::json;

    #[test]
    fn test_yaml_front_matter() {
        let content = "---\ntitle: Hello\ndate: 2024-01-01\ntags: a, b\n---\n\n# Body";
        let (meta, body) = split_front_matter(content).unwrap();

        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.date.as_deref(), Some("2024-01-01"));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_yaml_block_lists() {
        let content = "---\ntitle: Hello\ntags:\n  - rust\n  - web\nlang:\n  - en\n  - gl\n---\nbody";
        let (meta, body) = split_front_matter(content).unwrap();

        assert_eq!(meta.tags, vec!["rust", "web"]);
        assert_eq!(meta.lang.unwrap().codes(), vec!["en", "gl"]);
        assert!(meta.extra.is_empty());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_yaml_language_tables() {
        let content = "---\ntitle: Hi\nlang: [en, gl]\ngl:\n  title: Ola\n---\n";
        let (mut meta, _) = split_front_matter(content).unwrap();
        assert_eq!(meta.extra.get("gl"), Some(&json!({"title": "Ola"})));

        meta.localize("gl", &["en".into(), "gl".into()]);
        assert_eq!(meta.title.as_deref(), Some("Ola"));
        assert!(meta.extra.is_empty());
    }

    #[test]
    fn test_yaml_lang_and_quotes() {
        let content = "---\ntitle: \"Quoted: yes\"\nlang: [en, gl]\nid: 'post'\n---\nx";
        let (meta, _) = split_front_matter(content).unwrap();

        assert_eq!(meta.title.as_deref(), Some("Quoted: yes"));
        assert_eq!(meta.lang.unwrap().codes(), vec!["en", "gl"]);
        assert_eq!(meta.id.as_deref(), Some("post"));

        let (meta, _) = split_front_matter("---\nlang: gl\n---\n").unwrap();
        assert_eq!(meta.lang, Some(LangSpec::One("gl".into())));
    }

    #[test]
    fn test_empty_and_invalid_yaml() {
        let (meta, body) = split_front_matter("---\n---\nbody").unwrap();
        assert!(meta.title.is_none());
        assert_eq!(body, "body");

        assert!(split_front_matter("---\ntitle: [unclosed\n---\n").is_err());
    }

    #[test]
    fn test_toml_front_matter() {
        let content = "+++\ntitle = \"Hello\"\ntags = [\"a\", \"b\"]\ndate = 2024-03-01\n+++\n\nBody";
        let (meta, body) = split_front_matter(content).unwrap();

        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert_eq!(meta.date.as_deref(), Some("2024-03-01"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_toml_language_tables() {
        let content = "+++\ntitle = \"Hi\"\nlang = [\"en\", \"gl\"]\n[gl]\ntitle = \"Ola\"\n+++\n";
        let (meta, _) = split_front_matter(content).unwrap();
        assert_eq!(meta.extra.get("gl"), Some(&json!({"title": "Ola"})));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(split_front_matter("+++\ntitle = \n+++\n").is_err());
    }

    #[test]
    fn test_no_front_matter() {
        let (meta, body) = split_front_matter("# Just content").unwrap();
        assert!(meta.title.is_none());
        assert_eq!(body, "# Just content");

        // Unterminated fence is content
        let (meta, body) = split_front_matter("---\ntitle: x").unwrap();
        assert!(meta.title.is_none());
        assert_eq!(body, "---\ntitle: x");
    }

    #[test]
    fn test_yaml_extra_fields() {
        let content = "---\ntitle: Hello\ncustom: world\ncount: 42\nflag: true\nitems: [x, y, z]\n---\n";
        let (meta, _) = split_front_matter(content).unwrap();

        assert_eq!(meta.extra.get("custom"), Some(&json!("world")));
        assert_eq!(meta.extra.get("count"), Some(&json!(42)));
        assert_eq!(meta.extra.get("flag"), Some(&json!(true)));
        assert_eq!(meta.extra.get("items"), Some(&json!(["x", "y", "z"])));
    }
}
