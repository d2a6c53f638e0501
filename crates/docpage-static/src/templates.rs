//! Template engine for wrapping page fragments in a document layout.

use minijinja::Environment;

/// Name the layout template is registered under.
const PAGE: &str = "page.html";

/// Context for rendering the layout template.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Context {
    /// Page title from frontmatter
    pub title: Option<String>,
    /// Site title
    pub site_title: String,
    /// Page description from frontmatter
    pub description: Option<String>,
    /// Page tags from frontmatter
    pub tags: Vec<String>,
    /// Rendered content HTML
    pub content: String,
    /// Stylesheet URLs to link
    pub styles: Vec<String>,
    /// Document language
    pub lang: String,
}

/// Template engine using minijinja.
#[derive(Debug)]
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in layout.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned(PAGE.to_string(), PAGE_TEMPLATE.to_string())
            .expect("Failed to add page template");

        Self { env }
    }

    /// Create a template engine whose layout is `source`.
    ///
    /// The template receives the same variables as the built-in one.
    pub fn with_layout(source: String) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template_owned(PAGE.to_string(), source)?;
        Ok(Self { env })
    }

    /// Render the layout around the content in `context`.
    pub fn render_page(&self, context: &Context) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(PAGE)?;
        tmpl.render(context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% if title %}{{ title }} - {% endif %}{{ site_title }}</title>
  {% if description %}<meta name="description" content="{{ description }}">
  {% endif %}{% if tags %}<meta name="keywords" content="{{ tags | join(", ") }}">
  {% endif %}{% for style in styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}
</head>
<body>
  <main class="content">{{ content | safe }}</main>
</body>
</html>"##;
