//! CLI entry point for blogforge

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blogforge")]
#[command(version)]
#[command(about = "Build a static blog from markdown posts", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Configuration file (defaults to blog.yml in the base directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the markdown posts
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Page template used for every post
    #[arg(long, global = true)]
    template: Option<PathBuf>,

    /// Output directory, must contain the landing page
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site (the default)
    #[command(alias = "b")]
    Build,

    /// List posts, newest first
    List {
        /// Only featured posts
        #[arg(short, long)]
        featured: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Description shown on the landing page
        #[arg(long)]
        description: Option<String>,

        /// Mark the post as featured
        #[arg(short, long)]
        featured: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogforge=debug,info"
    } else {
        "blogforge=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let mut blog = blogforge::Blog::with_config_file(&base_dir, cli.config.as_deref())?;
    if let Some(content) = cli.content {
        blog.content_dir = base_dir.join(content);
    }
    if let Some(template) = cli.template {
        blog.template_path = base_dir.join(template);
    }
    if let Some(output) = cli.output {
        blog.output_dir = base_dir.join(output);
    }

    match cli.command.unwrap_or(Commands::Build) {
        Commands::Build => {
            tracing::info!("Building {:?} into {:?}", blog.content_dir, blog.output_dir);
            let summary = blog.build()?;
            println!(
                "Built {} posts ({} featured, {} skipped) into {:?}",
                summary.posts, summary.featured, summary.skipped, blog.output_dir
            );
        }

        Commands::List { featured, json } => {
            blogforge::commands::list::run(&blog, featured, json)?;
        }

        Commands::New {
            title,
            description,
            featured,
        } => {
            let path = blog.new_post(&title, description.as_deref(), featured)?;
            println!("Created: {:?}", path);
        }

        Commands::Version => {
            println!("blogforge version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
