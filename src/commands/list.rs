//! List posts

use anyhow::Result;
use chrono::Local;

use crate::content::{Post, PostLoader};
use crate::Blog;

/// Print the posts a build would publish, newest first
pub fn run(blog: &Blog, featured_only: bool, json: bool) -> Result<()> {
    let posts = PostLoader::new(&blog.content_dir, Local::now()).load();
    let selected: Vec<&Post> = if featured_only {
        posts.featured().collect()
    } else {
        posts.recent().collect()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    println!("Posts ({}):", selected.len());
    for post in selected {
        println!(
            "  {} {} {} - {}",
            post.date.format("%Y-%m-%d"),
            if post.featured { "*" } else { " " },
            post.output_file(),
            post.title
        );
    }

    for path in posts.skipped() {
        println!("  skipped: {}", path.display());
    }

    Ok(())
}
