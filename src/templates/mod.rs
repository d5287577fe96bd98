//! Placeholder templates
//!
//! Page templates use `{{ name }}` placeholders, with any amount of
//! whitespace inside the braces. Substitution is a single literal pass:
//! values are never escaped and never scanned for placeholders themselves.

mod landing;

pub use landing::{
    inject_section, LandingPage, FEATURED_END_MARKER, FEATURED_MARKER, RECENT_END_MARKER,
    RECENT_MARKER,
};

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_-]*)\s*\}\}").unwrap();
}

/// Values available to a template render
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: Vec<(String, String)>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, replacing any earlier value
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// The page template shared by every post
#[derive(Debug, Clone)]
pub struct PageTemplate {
    source: String,
    path: PathBuf,
}

impl PageTemplate {
    /// Load the template file. A missing template is fatal for the build.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(BuildError::MissingTemplate(path.to_path_buf()));
        }
        let source = fs::read_to_string(path).map_err(|source| BuildError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            source,
            path: path.to_path_buf(),
        })
    }

    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            path: PathBuf::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace every known placeholder; unknown ones are left as written
    pub fn render(&self, context: &Context) -> String {
        substitute(&self.source, context)
    }
}

/// Replace `{{ name }}` placeholders in `text` with values from `context`
pub fn substitute(text: &str, context: &Context) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| match context.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        let mut ctx = Context::new();
        ctx.insert("title", "Hello");
        ctx.insert("description", "World");
        ctx.insert("content", "<h1>Hi</h1>");
        ctx
    }

    #[test]
    fn test_whitespace_tolerant() {
        let tpl = PageTemplate::from_source("{{title}}|{{ title }}|{{  title\t}}|{{\ntitle\n}}");
        assert_eq!(tpl.render(&context()), "Hello|Hello|Hello|Hello");
    }

    #[test]
    fn test_page_placeholders() {
        let tpl = PageTemplate::from_source(
            "<title>{{ title }}</title><meta content=\"{{ description }}\"><main>{{ content }}</main>",
        );
        assert_eq!(
            tpl.render(&context()),
            "<title>Hello</title><meta content=\"World\"><main><h1>Hi</h1></main>"
        );
    }

    #[test]
    fn test_unknown_placeholders_untouched() {
        let tpl = PageTemplate::from_source("{{ title }} {{ author }} {{ not valid! }} {title}");
        assert_eq!(
            tpl.render(&context()),
            "Hello {{ author }} {{ not valid! }} {title}"
        );
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let mut ctx = context();
        ctx.insert("title", "{{ content }}");
        ctx.insert("content", "Use {{ title }} in templates, costs $1 or $title");
        let tpl = PageTemplate::from_source("{{ title }}\n{{ content }}");
        assert_eq!(
            tpl.render(&ctx),
            "{{ content }}\nUse {{ title }} in templates, costs $1 or $title"
        );
    }

    #[test]
    fn test_insert_replaces() {
        let mut ctx = Context::new();
        ctx.insert("title", "a");
        ctx.insert("title", String::from("b"));
        assert_eq!(ctx.get("title"), Some("b"));
        assert_eq!(ctx.get("missing"), None);
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = PageTemplate::load(dir.path().join("blog.html")).unwrap_err();
        assert!(matches!(err, BuildError::MissingTemplate(_)));
    }
}
