//! Generator module - writes the landing page and one page per post

use std::fs;
use std::path::{Path, PathBuf};

use crate::content::{MarkdownRenderer, Post, PostSet};
use crate::error::{BuildError, Result};
use crate::helpers::{escape_html, link_to, page_href};
use crate::templates::{Context, LandingPage, PageTemplate};
use crate::Blog;

/// What a build produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildSummary {
    pub posts: usize,
    pub featured: usize,
    pub skipped: usize,
    /// Files written, index first
    pub written: Vec<PathBuf>,
}

/// Static site generator
pub struct Generator {
    blog: Blog,
    renderer: MarkdownRenderer,
    template: PageTemplate,
}

impl Generator {
    /// Create a new generator. Fails if the page template cannot be loaded.
    pub fn new(blog: &Blog) -> Result<Self> {
        let template = PageTemplate::load(&blog.template_path)?;
        let renderer = MarkdownRenderer::with_options(&blog.config.highlight);

        Ok(Self {
            blog: blog.clone(),
            renderer,
            template,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, posts: &PostSet) -> Result<BuildSummary> {
        let output_dir = &self.blog.output_dir;
        fs::create_dir_all(output_dir).map_err(|source| BuildError::CreateDir {
            path: output_dir.clone(),
            source,
        })?;

        let landing_path = output_dir.join(&self.blog.config.landing_page);
        let landing = LandingPage::load(&landing_path)?;

        let mut summary = BuildSummary {
            posts: posts.len(),
            featured: posts.featured().count(),
            skipped: posts.skipped().len(),
            written: Vec::new(),
        };

        let index_path = self.generate_index(&landing, posts)?;
        summary.written.push(index_path.clone());

        for post in posts.recent() {
            let output_path = output_dir.join(post.output_file());
            if output_path == index_path || output_path == landing_path {
                tracing::warn!(
                    "Skipping {:?}: its page would overwrite {:?}",
                    post.source,
                    output_path
                );
                continue;
            }

            let html = self.render_post(post);
            write_file(&output_path, &html)?;
            tracing::info!("Rendered {} -> {}", post.source.display(), output_path.display());
            summary.written.push(output_path);
        }

        Ok(summary)
    }

    /// Write the landing page with the featured and recent cards
    fn generate_index(&self, landing: &LandingPage, posts: &PostSet) -> Result<PathBuf> {
        let config = &self.blog.config;

        let featured = self.render_cards(posts.featured(), config.featured_limit);
        let recent = self.render_cards(posts.recent(), config.recent_limit);
        let html = landing.render(&featured, &recent);

        let output_path = self.blog.output_dir.join(&config.index_file);
        write_file(&output_path, &html)?;
        tracing::info!("Generated {}", output_path.display());

        Ok(output_path)
    }

    fn render_cards<'p>(
        &self,
        posts: impl Iterator<Item = &'p Post>,
        limit: Option<usize>,
    ) -> String {
        posts
            .take(limit.unwrap_or(usize::MAX))
            .map(|post| render_card(post, &self.blog.config.read_more))
            .collect()
    }

    /// Render a post into the page template
    pub fn render_post(&self, post: &Post) -> String {
        let mut context = Context::new();
        context.insert("title", post.title.as_str());
        context.insert("description", post.description.as_str());
        context.insert("content", self.renderer.render(&post.raw));
        self.template.render(&context)
    }
}

/// Landing page card linking to the post's page
pub fn render_card(post: &Post, read_more: &str) -> String {
    let href = page_href(&post.slug);
    format!(
        "<article class=\"blog-card\">\n  <h3 class=\"blog-card-title\">{}</h3>\n  <p class=\"blog-card-description\">{}</p>\n  {}\n</article>\n",
        link_to(&href, &escape_html(&post.title), None),
        escape_html(&post.description),
        link_to(&href, &escape_html(read_more), Some("blog-card-read-more")),
    )
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}
