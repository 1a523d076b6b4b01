//! Page metadata from front matter.

use serde::{Deserialize, Serialize};

use super::JsonMap;
use crate::utils::date::DateTimeUtc;

/// Deserialize tags from a list or a comma-separated string.
///
/// `null` gives an empty vec.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        List(Vec<String>),
        Csv(String),
    }

    Ok(match Option::<Tags>::deserialize(deserializer)? {
        Some(Tags::List(tags)) => tags,
        Some(Tags::Csv(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect(),
        None => Vec::new(),
    })
}

/// Languages a source file is published in.
///
/// `lang = "en"` or `lang = ["en", "gl"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LangSpec {
    One(String),
    Many(Vec<String>),
}

impl LangSpec {
    /// Language codes in declaration order.
    pub fn codes(&self) -> Vec<&str> {
        match self {
            Self::One(code) => vec![code.as_str()],
            Self::Many(codes) => codes.iter().map(String::as_str).collect(),
        }
    }
}

/// Page metadata from front matter
///
/// # Standard Fields
///
/// | Field     | Type              | Description                          |
/// |-----------|-------------------|--------------------------------------|
/// | `title`   | `String`          | Page title                           |
/// | `summary` | `String`          | Brief description (feed, meta tag)   |
/// | `date`    | `String`          | Publication date                     |
/// | `author`  | `String`          | Author name                          |
/// | `draft`   | `bool`            | Draft status (default: false)        |
/// | `tags`    | `Vec<String>`     | Categorization tags                  |
/// | `lang`    | `String` or list  | Language(s) of the page              |
/// | `id`      | `String`          | Links translations of the same page  |
/// | `url`     | `String`          | Custom output location               |
///
/// # Custom Fields (`extra`)
///
/// Anything else lands in `extra`. Tables keyed by a language code
/// (`[gl] title = "Ola"`) hold per-language overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub draft: bool,
    /// Tags for categorizing the page.
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub lang: Option<LangSpec>,
    /// Translation key shared by alternates.
    pub id: Option<String>,
    /// Custom output location.
    ///
    /// `/custom/` writes `/custom/index.html`, `/feed.html` writes as-is.
    pub url: Option<String>,
    /// Additional user-defined fields.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl PageMeta {
    /// Parsed `date`, `None` when missing or malformed.
    pub fn datetime(&self) -> Option<DateTimeUtc> {
        self.date.as_deref().and_then(DateTimeUtc::parse)
    }

    /// Apply the `[<lang>]` override table, if any.
    ///
    /// Only `title` and `summary` are overridable. The table itself is
    /// removed from every copy's `extra`.
    pub fn localize(&mut self, lang: &str, languages: &[String]) {
        if let Some(table) = self.extra.get(lang).and_then(|v| v.as_object()) {
            if let Some(title) = table.get("title").and_then(|v| v.as_str()) {
                self.title = Some(title.to_string());
            }
            if let Some(summary) = table.get("summary").and_then(|v| v.as_str()) {
                self.summary = Some(summary.to_string());
            }
        }
        self.extra
            .retain(|key, value| !(value.is_object() && languages.contains(key)));
    }
}
