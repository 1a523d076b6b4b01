//! `[site]` section configuration.
//!
//! Site metadata, the mount location and the language list.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "My Blog"
//! description = "A personal blog"
//! author = "Alice"
//! location = "https://example.com/blog/"
//! languages = ["en", "gl"]
//! default_language = "en"
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site title.
    pub title: String,

    /// Site description (feed channel, `<meta name="description">`).
    pub description: String,

    /// Author name.
    pub author: String,

    /// Author email.
    pub email: String,

    /// Public location of the site. Its path component is the base path.
    pub location: Option<String>,

    /// Language codes the site is published in.
    pub languages: Vec<String>,

    /// Language served without a `/<lang>` prefix. Defaults to the first language.
    pub default_language: Option<String>,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            author: String::new(),
            email: String::new(),
            location: None,
            languages: vec!["en".into()],
            default_language: None,
        }
    }
}

impl SiteSectionConfig {
    /// Resolved default language.
    pub fn default_language(&self) -> &str {
        self.default_language
            .as_deref()
            .or_else(|| self.languages.first().map(String::as_str))
            .unwrap_or("en")
    }

    /// Whether `lang` is one of the configured languages.
    pub fn has_language(&self, lang: &str) -> bool {
        self.languages.iter().any(|l| l == lang)
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `location` must be an http(s) URL with a host
    /// - `languages` must not be empty or contain duplicates
    /// - `default_language` must be one of `languages`
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        self.validate_location(diag);
        self.validate_languages(diag);
    }

    fn validate_location(&self, diag: &mut ConfigDiagnostics) {
        let Some(location) = &self.location else {
            return;
        };
        let field = FieldPath::new("site.location");

        match url::Url::parse(location) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        field,
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://example.com/blog/",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error_with_hint(
                        field,
                        "URL must have a valid host",
                        "use format like https://example.com/blog/",
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    field,
                    format!("invalid URL: {e}"),
                    "use format like https://example.com/blog/",
                );
            }
        }
    }

    fn validate_languages(&self, diag: &mut ConfigDiagnostics) {
        let field = FieldPath::new("site.languages");

        if self.languages.is_empty() {
            diag.error_with_hint(field, "at least one language is required", "e.g. [\"en\"]");
            return;
        }

        let mut seen = FxHashSet::default();
        for lang in &self.languages {
            if lang.trim().is_empty() || lang.contains('/') {
                diag.error(field, format!("invalid language code '{lang}'"));
            } else if !seen.insert(lang.as_str()) {
                diag.error(field, format!("language '{lang}' listed twice"));
            }
        }

        if let Some(default) = &self.default_language
            && !self.has_language(default)
        {
            diag.error_with_hint(
                FieldPath::new("site.default_language"),
                format!("'{default}' is not in site.languages"),
                format!("add it to languages, or use one of {:?}", self.languages),
            );
        }
    }
}
