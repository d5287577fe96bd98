//! Landing page marker injection

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};

pub const FEATURED_MARKER: &str = "<!-- Dynamically add featured blog posts -->";
pub const RECENT_MARKER: &str = "<!-- Dynamically add recent blog posts -->";

/// Closes the generated region after each marker so later builds can replace it
pub const FEATURED_END_MARKER: &str = "<!-- End featured blog posts -->";
pub const RECENT_END_MARKER: &str = "<!-- End recent blog posts -->";

/// The landing page found in the output directory
#[derive(Debug, Clone)]
pub struct LandingPage {
    source: String,
    path: PathBuf,
}

impl LandingPage {
    /// Load the landing page. It must already exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(BuildError::MissingLandingPage(path.to_path_buf()));
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

    /// Fill both sections with the given card markup
    pub fn render(&self, featured: &str, recent: &str) -> String {
        let page = self.fill(&self.source, FEATURED_MARKER, FEATURED_END_MARKER, featured);
        self.fill(&page, RECENT_MARKER, RECENT_END_MARKER, recent)
    }

    fn fill(&self, page: &str, marker: &str, end_marker: &str, fragment: &str) -> String {
        match inject_section(page, marker, end_marker, fragment) {
            Some(filled) => filled,
            None => {
                tracing::warn!("Marker {:?} not found in {:?}", marker, self.path);
                page.to_string()
            }
        }
    }
}

/// Put `fragment` right after the first `marker`, closed by `end_marker`.
///
/// Anything between `marker` and an existing `end_marker` is replaced, so
/// injecting into an already generated page gives the same result as
/// injecting into the pristine one. Returns `None` when `marker` is absent.
pub fn inject_section(page: &str, marker: &str, end_marker: &str, fragment: &str) -> Option<String> {
    let start = page.find(marker)? + marker.len();
    let tail = &page[start..];
    let rest = match tail.find(end_marker) {
        Some(end) => &tail[end + end_marker.len()..],
        None => tail,
    };

    Some(format!("{}\n{}{}{}", &page[..start], fragment, end_marker, rest))
}
