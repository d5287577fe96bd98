//! Content loader - aggregates posts from the content directory

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, Post};
use crate::error::{BuildError, Result};

/// Posts found in the content directory, newest first
#[derive(Debug, Clone, Default)]
pub struct PostSet {
    posts: Vec<Post>,
    skipped: Vec<PathBuf>,
}

impl PostSet {
    /// Sort by date descending. The sort is stable so equal dates keep scan order.
    pub fn new(mut posts: Vec<Post>, skipped: Vec<PathBuf>) -> Self {
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Self { posts, skipped }
    }

    /// All posts, newest first
    pub fn recent(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter()
    }

    /// Featured posts in the same order as [`PostSet::recent`]
    pub fn featured(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| p.featured)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Markdown files that could not be read
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Loads posts from a single directory (not recursive)
pub struct PostLoader<'a> {
    content_dir: &'a Path,
    now: DateTime<Local>,
}

impl<'a> PostLoader<'a> {
    /// `now` is the date given to posts that do not declare one
    pub fn new(content_dir: &'a Path, now: DateTime<Local>) -> Self {
        Self { content_dir, now }
    }

    /// Load every markdown file. Unreadable files are logged and skipped.
    pub fn load(&self) -> PostSet {
        if !self.content_dir.is_dir() {
            tracing::warn!("Content directory {:?} does not exist", self.content_dir);
            return PostSet::default();
        }

        let mut posts = Vec::new();
        let mut skipped = Vec::new();

        for entry in WalkDir::new(self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Failed to read entry in {:?}: {}", self.content_dir, e);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown_file(path) {
                continue;
            }

            match self.load_post(path) {
                Ok(post) => {
                    tracing::info!("Processed file: {}", path.display());
                    posts.push(post);
                }
                Err(e) => {
                    tracing::warn!("Skipping post: {}", e);
                    skipped.push(path.to_path_buf());
                }
            }
        }

        PostSet::new(posts, skipped)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path).map_err(|source| BuildError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let (fm, body) = FrontMatter::parse(&content);

        Ok(Post::from_front_matter(path, fm, body, self.now))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{DEFAULT_DESCRIPTION, DEFAULT_TITLE};
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn post_file(dir: &Path, name: &str, title: &str, date: &str, featured: bool) {
        let content = format!(
            "---\ntitle: {}\ndescription: About {}\ndate: {}\nfeatured: {}\n---\n\nBody of {}\n",
            title, title, date, featured, title
        );
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_extracts_metadata() {
        let dir = tempfile::tempdir().unwrap();
        post_file(dir.path(), "post.md", "Hello", "2024-01-01", true);

        let set = PostLoader::new(dir.path(), now()).load();
        assert_eq!(set.len(), 1);
        let post = &set.posts()[0];
        assert_eq!(post.title, "Hello");
        assert_eq!(post.description, "About Hello");
        assert_eq!(post.date.format("%Y-%m-%d").to_string(), "2024-01-01");
        assert!(post.featured);
        assert_eq!(post.slug, "post");
        assert_eq!(post.source, dir.path().join("post.md"));
        assert_eq!(post.raw, "Body of Hello\n");
    }

    #[test]
    fn test_missing_metadata_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bare.md"), "No metadata here.\n").unwrap();

        let set = PostLoader::new(dir.path(), now()).load();
        let post = &set.posts()[0];
        assert_eq!(post.title, DEFAULT_TITLE);
        assert_eq!(post.description, DEFAULT_DESCRIPTION);
        assert_eq!(post.date, now());
        assert!(!post.featured);
        assert_eq!(set.featured().count(), 0);
    }

    #[test]
    fn test_sorted_newest_first_and_featured_subset() {
        let dir = tempfile::tempdir().unwrap();
        post_file(dir.path(), "a.md", "Old", "2022-05-01", true);
        post_file(dir.path(), "b.md", "New", "2024-05-01", false);
        post_file(dir.path(), "c.md", "Middle", "2023-05-01", true);
        post_file(dir.path(), "d.md", "Newest", "2024-12-24 08:00", true);

        let set = PostLoader::new(dir.path(), now()).load();
        let recent: Vec<&str> = set.recent().map(|p| p.title.as_str()).collect();
        assert_eq!(recent, vec!["Newest", "New", "Middle", "Old"]);

        let dates: Vec<_> = set.recent().map(|p| p.date).collect();
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));

        let featured: Vec<&str> = set.featured().map(|p| p.title.as_str()).collect();
        assert_eq!(featured, vec!["Newest", "Middle", "Old"]);

        // featured is an order-preserving subsequence of recent
        let mut remaining = set.recent();
        for f in set.featured() {
            assert!(remaining.any(|r| r.slug == f.slug));
        }
    }

    #[test]
    fn test_equal_dates_keep_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        post_file(dir.path(), "zeta.md", "Zeta", "2024-01-01", false);
        post_file(dir.path(), "alpha.md", "Alpha", "2024-01-01", false);
        post_file(dir.path(), "mid.md", "Mid", "2024-01-01", false);

        let first: Vec<String> = PostLoader::new(dir.path(), now())
            .load()
            .recent()
            .map(|p| p.slug.clone())
            .collect();
        assert_eq!(first, vec!["alpha", "mid", "zeta"]);

        let second: Vec<String> = PostLoader::new(dir.path(), now())
            .load()
            .recent()
            .map(|p| p.slug.clone())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        post_file(dir.path(), "good.md", "Good", "2024-01-01", false);
        fs::write(dir.path().join("broken.md"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

        let set = PostLoader::new(dir.path(), now()).load();
        assert_eq!(set.len(), 1);
        assert_eq!(set.posts()[0].slug, "good");
        assert_eq!(set.skipped(), &[dir.path().join("broken.md")]);
    }

    #[test]
    fn test_only_top_level_markdown_files() {
        let dir = tempfile::tempdir().unwrap();
        post_file(dir.path(), "top.md", "Top", "2024-01-01", false);
        post_file(dir.path(), "long.markdown", "Long", "2024-01-02", false);
        fs::write(dir.path().join("notes.txt"), "not a post").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        post_file(&dir.path().join("nested"), "deep.md", "Deep", "2024-01-03", false);
        fs::create_dir(dir.path().join("folder.md")).unwrap();

        let set = PostLoader::new(dir.path(), now()).load();
        let slugs: Vec<&str> = set.recent().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["long", "top"]);
    }

    #[test]
    fn test_missing_content_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let set = PostLoader::new(&dir.path().join("nope"), now()).load();
        assert!(set.is_empty());
        assert!(set.skipped().is_empty());
    }
}
