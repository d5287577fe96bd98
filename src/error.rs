//! Build error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading inputs or writing the site
#[derive(Debug, Error)]
pub enum BuildError {
    /// A source file could not be opened or is not valid UTF-8
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("page template not found at {}", .0.display())]
    MissingTemplate(PathBuf),

    #[error(
        "landing page not found at {}; it must exist in the output directory before building",
        .0.display()
    )]
    MissingLandingPage(PathBuf),

    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, BuildError>;
