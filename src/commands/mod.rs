//! CLI commands

pub mod build;
pub mod list;
pub mod new;
