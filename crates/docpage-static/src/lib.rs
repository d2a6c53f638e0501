//! Page layout and HTML output for docpage.
//!
//! Wraps a rendered page fragment in a document layout and writes it to disk.

pub mod builder;
pub mod templates;

pub use builder::{
    default_output_path, BuildConfig, BuildError, BuildResult, OutputFormat, PageBuilder,
};
pub use templates::{Context, TemplateEngine};
