//! Page content model with frontmatter extraction and Markdown loading.
//!
//! This crate defines the immutable node tree a documentation page is made of,
//! and builds it from Markdown sources with YAML frontmatter.

pub mod content;
pub mod frontmatter;
pub mod parser;

pub use content::{Block, Inline, Page, PageContent};
pub use frontmatter::{extract_frontmatter, FrontMatter, FrontmatterError};
pub use parser::{parse_page, ParseError};
