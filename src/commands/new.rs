//! Create a new post

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::DEFAULT_DESCRIPTION;
use crate::Blog;

/// Scaffold `<content_dir>/<slugified title>.md` and return its path
pub fn create_post(
    blog: &Blog,
    title: &str,
    description: Option<&str>,
    featured: bool,
) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        bail!("Cannot derive a file name from title {:?}", title);
    }

    fs::create_dir_all(&blog.content_dir)
        .with_context(|| format!("failed to create {:?}", blog.content_dir))?;

    let file_path = blog.content_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    let content = format!(
        "---\ntitle: {}\ndescription: {}\ndate: {}\nfeatured: {}\n---\n\n",
        yaml_scalar(title),
        yaml_scalar(description.unwrap_or(DEFAULT_DESCRIPTION)),
        now.format("%Y-%m-%d %H:%M:%S"),
        featured
    );

    fs::write(&file_path, content).with_context(|| format!("failed to write {:?}", file_path))?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Quote a value so YAML reads it back as the same string
fn yaml_scalar(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
}
