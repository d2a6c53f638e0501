//! Single-page builder.

use std::path::{Path, PathBuf};
use std::time::Instant;

use docpage_mdx::parse_page;
use docpage_render::{ComponentMap, RenderedPage, StaticPageRenderer};

use crate::templates::{Context, TemplateEngine};

/// What the builder writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// HTML document or fragment
    #[default]
    Html,
    /// Markup tree as pretty-printed JSON
    Json,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

/// Configuration for building one page.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source page
    pub input: PathBuf,

    /// Output file
    pub output: PathBuf,

    /// Site title used by the layout
    pub site_title: String,

    /// Document language
    pub lang: String,

    /// Stylesheet URLs linked from the layout
    pub styles: Vec<String>,

    /// Custom layout template file
    pub template: Option<PathBuf>,

    /// Write the bare fragment without the layout
    pub fragment: bool,

    /// Output format
    pub format: OutputFormat,

    /// Element overrides
    pub components: ComponentMap,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("pages/index.mdx"),
            output: PathBuf::from("dist/index.html"),
            site_title: "Documentation".to_string(),
            lang: "en".to_string(),
            styles: vec![],
            template: None,
            fragment: false,
            format: OutputFormat::Html,
            components: ComponentMap::new(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of top-level content nodes rendered
    pub nodes: usize,

    /// Bytes written
    pub bytes: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// File written
    pub output_path: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to parse page: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to serialize markup: {0}")]
    SerializeError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Output path for `input` inside `output_dir`: the file stem with the
/// format's extension.
pub fn default_output_path(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("index");

    output_dir.join(format!("{}.{}", stem, format.extension()))
}

/// Builds a single page from a source file.
pub struct PageBuilder {
    config: BuildConfig,
    renderer: StaticPageRenderer,
}

impl PageBuilder {
    /// Create a new page builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            renderer: StaticPageRenderer::new(),
        }
    }

    /// Read, render and write the page.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let input = &self.config.input;

        let source = tokio::fs::read_to_string(input)
            .await
            .map_err(|e| read_error(input, e))?;

        let templates = if self.uses_layout() {
            self.load_templates().await?
        } else {
            TemplateEngine::new()
        };

        let (nodes, output) = self.render_source(&source, &templates)?;

        if let Some(parent) = self.config.output.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        tokio::fs::write(&self.config.output, &output)
            .await
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(BuildResult {
            nodes,
            bytes: output.len(),
            duration_ms: start.elapsed().as_millis() as u64,
            output_path: self.config.output.clone(),
        })
    }

    /// Whether the output is wrapped in the page layout.
    fn uses_layout(&self) -> bool {
        self.config.format == OutputFormat::Html && !self.config.fragment
    }

    async fn load_templates(&self) -> Result<TemplateEngine, BuildError> {
        let Some(path) = &self.config.template else {
            return Ok(TemplateEngine::new());
        };

        let layout = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| read_error(path, e))?;
        tracing::debug!("Using layout template {}", path.display());
        TemplateEngine::with_layout(layout).map_err(|e| BuildError::TemplateError(e.to_string()))
    }

    /// Render page source to the configured output format.
    ///
    /// Returns the number of top-level content nodes and the output text.
    pub fn render_source(
        &self,
        source: &str,
        templates: &TemplateEngine,
    ) -> Result<(usize, String), BuildError> {
        let page = parse_page(source).map_err(|e| BuildError::ParseError {
            path: self.config.input.display().to_string(),
            message: e.to_string(),
        })?;

        let rendered = self.renderer.render_page(&page, &self.config.components);

        if rendered.markup.text_content().trim().is_empty() {
            tracing::warn!("{} renders no text", self.config.input.display());
        }

        let elements = rendered.markup.elements();
        tracing::debug!(
            "Rendered {} nodes ({} headings, {} elements, {} links) from {}",
            page.content.len(),
            page.content.headings().count(),
            elements.len(),
            elements.iter().filter(|e| e.get_attr("href").is_some()).count(),
            self.config.input.display()
        );

        let output = match self.config.format {
            OutputFormat::Json => serde_json::to_string_pretty(&rendered.markup)
                .map_err(|e| BuildError::SerializeError(e.to_string()))?,
            OutputFormat::Html if self.config.fragment => rendered.to_html(),
            OutputFormat::Html => self.wrap_in_layout(&rendered, templates)?,
        };

        Ok((page.content.len(), output))
    }

    fn wrap_in_layout(
        &self,
        rendered: &RenderedPage,
        templates: &TemplateEngine,
    ) -> Result<String, BuildError> {
        let frontmatter = &rendered.frontmatter;

        let context = Context {
            title: frontmatter.title.clone(),
            site_title: self.config.site_title.clone(),
            description: frontmatter.description.clone(),
            tags: frontmatter.tags.clone(),
            content: rendered.to_html(),
            styles: self.config.styles.clone(),
            lang: self.config.lang.clone(),
        };

        templates
            .render_page(&context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))
    }
}

fn read_error(path: &Path, e: std::io::Error) -> BuildError {
    BuildError::ReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
