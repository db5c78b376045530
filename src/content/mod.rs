//! Content module - front-matter, markdown rendering, and outlines

mod frontmatter;
mod markdown;
pub mod outline;

pub use frontmatter::FrontMatter;
pub use markdown::{MarkdownRenderer, Rendered};
pub use outline::{Outline, OutlineEntry};
