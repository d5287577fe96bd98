//! Post model

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::FrontMatter;

pub const DEFAULT_TITLE: &str = "Default Title";
pub const DEFAULT_DESCRIPTION: &str = "Default Description";

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Short summary shown on the landing page
    pub description: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// Listed in the featured section of the landing page
    pub featured: bool,

    /// File stem of the source, names the output page
    pub slug: String,

    /// Source file path
    pub source: PathBuf,

    /// Markdown body without the metadata block
    #[serde(skip)]
    pub raw: String,
}

impl Post {
    /// Build a post from parsed metadata, falling back to defaults.
    /// `now` stands in for a missing or unparseable date.
    pub fn from_front_matter(
        source: &Path,
        fm: FrontMatter,
        body: &str,
        now: DateTime<Local>,
    ) -> Self {
        let date = match fm.date.as_deref() {
            Some(raw) => fm.parse_date().unwrap_or_else(|| {
                tracing::warn!("Unrecognized date {:?} in {:?}, using build time", raw, source);
                now
            }),
            None => now,
        };

        Self {
            title: fm.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: fm
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            date,
            featured: fm.featured.unwrap_or(false),
            slug: slug_for(source),
            source: source.to_path_buf(),
            raw: body.to_string(),
        }
    }

    /// File name of the generated page
    pub fn output_file(&self) -> String {
        format!("{}.html", self.slug)
    }
}

/// Slug of a source file: its name without the extension
pub fn slug_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled".to_string())
}
