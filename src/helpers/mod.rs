//! Helper functions for generated HTML

mod html;

pub use html::*;
