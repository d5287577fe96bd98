//! blogforge: a small static blog generator
//!
//! Markdown posts with a leading metadata block are rendered into a shared
//! page template, and a landing page in the output directory gets cards for
//! the featured and recent posts.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod templates;

use anyhow::Result;
use chrono::Local;
use std::path::{Path, PathBuf};

pub use error::BuildError;
pub use generator::BuildSummary;

/// The blog being built
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the markdown posts
    pub content_dir: PathBuf,
    /// Shared page template
    pub template_path: PathBuf,
    /// Output directory, also home of the landing page
    pub output_dir: PathBuf,
}

impl Blog {
    /// Create a blog from a directory, reading `blog.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        Self::with_config_file(base_dir, None)
    }

    /// Like [`Blog::new`] but reading configuration from `config_path`
    pub fn with_config_file<P: AsRef<Path>>(base_dir: P, config_path: Option<&Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();

        let config = match config_path {
            Some(path) => config::SiteConfig::load(base_dir.join(path))?,
            None => {
                let default_path = base_dir.join(config::CONFIG_FILE);
                if default_path.exists() {
                    config::SiteConfig::load(&default_path)?
                } else {
                    config::SiteConfig::default()
                }
            }
        };

        Ok(Self::from_config(base_dir, config))
    }

    /// Resolve the configured paths against `base_dir`
    pub fn from_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let template_path = base_dir.join(&config.template);
        let output_dir = base_dir.join(&config.output_dir);

        Self {
            config,
            base_dir,
            content_dir,
            template_path,
            output_dir,
        }
    }

    /// Build the site, dating undated posts with the current time
    pub fn build(&self) -> Result<BuildSummary> {
        commands::build::run(self, Local::now())
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, description: Option<&str>, featured: bool) -> Result<PathBuf> {
        commands::new::create_post(self, title, description, featured)
    }
}
