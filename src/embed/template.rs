//! Template with variable injection.

use std::borrow::Cow;

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Template text. Built-in templates are `'static`; user templates are
/// loaded at runtime.
#[derive(Debug, Clone)]
pub struct Template {
    content: Cow<'static, str>,
}

impl Template {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content: Cow::Borrowed(content),
        }
    }

    pub fn from_string(content: String) -> Self {
        Self {
            content: Cow::Owned(content),
        }
    }

    pub fn render(&self, vars: &impl TemplateVars) -> String {
        vars.apply(&self.content)
    }
}
