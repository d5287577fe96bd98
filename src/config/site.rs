//! Site configuration (blog.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};

/// Name of the optional configuration file in the base directory
pub const CONFIG_FILE: &str = "blog.yml";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Directory
    pub content_dir: PathBuf,
    pub template: PathBuf,
    pub output_dir: PathBuf,

    // Landing page
    /// Landing page file inside the output directory
    pub landing_page: String,
    /// Index file written inside the output directory
    pub index_file: String,
    /// Label of the link at the bottom of each post card
    pub read_more: String,
    pub featured_limit: Option<usize>,
    pub recent_limit: Option<usize>,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            template: PathBuf::from("template/blog.html"),
            output_dir: PathBuf::from("dist"),

            landing_page: "index.html".to_string(),
            index_file: "index.html".to_string(),
            read_more: "Read more".to_string(),
            featured_limit: None,
            recent_limit: None,

            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| BuildError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| BuildError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from YAML text. An empty document yields the defaults.
    pub fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

/// Code block highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    /// syntect theme name
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, PathBuf::from("content"));
        assert_eq!(config.template, PathBuf::from("template/blog.html"));
        assert_eq!(config.output_dir, PathBuf::from("dist"));
        assert_eq!(config.index_file, "index.html");
        assert!(config.recent_limit.is_none());
        assert!(config.highlight.enable);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
content_dir: posts
output_dir: public
read_more: Continue reading
recent_limit: 5
highlight:
  enable: false
"#;
        let config = SiteConfig::parse(yaml).unwrap();
        assert_eq!(config.content_dir, PathBuf::from("posts"));
        assert_eq!(config.output_dir, PathBuf::from("public"));
        assert_eq!(config.template, PathBuf::from("template/blog.html"));
        assert_eq!(config.read_more, "Continue reading");
        assert_eq!(config.recent_limit, Some(5));
        assert!(!config.highlight.enable);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = SiteConfig::parse("\n").unwrap();
        assert_eq!(config.landing_page, "index.html");
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "recent_limit: [oops").unwrap();

        let err = SiteConfig::load(&path).unwrap_err();
        assert!(matches!(err, BuildError::Config { .. }));
        assert!(err.to_string().contains("blog.yml"));
    }
}
