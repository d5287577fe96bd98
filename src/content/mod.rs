//! Content module - metadata extraction, markdown rendering and post aggregation

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::{parse_date_string, FrontMatter};
pub use loader::{PostLoader, PostSet};
pub use markdown::MarkdownRenderer;
pub use post::{slug_for, Post, DEFAULT_DESCRIPTION, DEFAULT_TITLE};
