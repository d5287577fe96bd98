//! Build the site

use anyhow::Result;
use chrono::{DateTime, Local};

use crate::content::PostLoader;
use crate::generator::{BuildSummary, Generator};
use crate::Blog;

/// Rebuild the index and every post page. `now` dates posts without a date.
pub fn run(blog: &Blog, now: DateTime<Local>) -> Result<BuildSummary> {
    let start = std::time::Instant::now();

    // Load the template first so a missing one aborts before any write
    let generator = Generator::new(blog)?;

    let posts = PostLoader::new(&blog.content_dir, now).load();
    tracing::info!(
        "Loaded {} posts ({} featured, {} skipped)",
        posts.len(),
        posts.featured().count(),
        posts.skipped().len()
    );

    let summary = generator.generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} files in {:.2}s",
        summary.written.len(),
        duration.as_secs_f64()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::templates::{FEATURED_MARKER, RECENT_MARKER};
    use chrono::TimeZone;
    use std::fs;

    #[test]
    fn test_run_builds_site() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("content")).unwrap();
        fs::create_dir_all(root.join("template")).unwrap();
        fs::create_dir_all(root.join("dist")).unwrap();
        fs::write(root.join("template/blog.html"), "<h1>{{ title }}</h1>{{ content }}").unwrap();
        fs::write(
            root.join("dist/index.html"),
            format!("{}\n{}\n", FEATURED_MARKER, RECENT_MARKER),
        )
        .unwrap();
        fs::write(root.join("content/hello.md"), "---\ntitle: Hello\n---\nHi there\n").unwrap();

        let blog = Blog::from_config(root, SiteConfig::default());
        let now = Local.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let summary = run(&blog, now).unwrap();

        assert_eq!(summary.posts, 1);
        assert_eq!(summary.written.len(), 2);
        assert_eq!(
            fs::read_to_string(root.join("dist/hello.html")).unwrap(),
            "<h1>Hello</h1><p>Hi there</p>\n"
        );
    }

    #[test]
    fn test_run_fails_without_template() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::from_config(dir.path(), SiteConfig::default());
        let err = run(&blog, Local::now()).unwrap_err();
        assert!(err.to_string().contains("page template not found"));
        assert!(!dir.path().join("dist").exists());
    }
}
