//! Content to markup rendering.

use docpage_mdx::{Block, FrontMatter, Inline, Page, PageContent};

use crate::components::{ComponentMap, ElementName};
use crate::markup::{Element, Markup};

/// Inputs a page is rendered with besides its content.
#[derive(Debug, Clone, Copy)]
pub struct Props<'a> {
    /// Element overrides
    pub components: &'a ComponentMap,

    /// Page metadata, handed through to the layout
    pub frontmatter: &'a FrontMatter,
}

impl<'a> Props<'a> {
    pub fn new(components: &'a ComponentMap, frontmatter: &'a FrontMatter) -> Self {
        Self {
            components,
            frontmatter,
        }
    }
}

/// The result of rendering one page.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    /// Rendered markup tree
    pub markup: Markup,

    /// Frontmatter the page was rendered with
    pub frontmatter: FrontMatter,
}

impl RenderedPage {
    /// Serialize the markup to an HTML fragment.
    pub fn to_html(&self) -> String {
        self.markup.to_html()
    }
}

/// Renders page content to static markup.
///
/// Rendering is a pure mapping: the same content and props always produce the
/// same tree, and code block text is emitted exactly as stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPageRenderer;

impl StaticPageRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render content with the given props.
    pub fn render(&self, content: &PageContent, props: &Props<'_>) -> RenderedPage {
        let components = props.components;
        let blocks: Vec<Markup> = content
            .blocks()
            .iter()
            .map(|block| render_block(block, components))
            .collect();

        let markup = if components.contains(ElementName::Wrapper) {
            components
                .element(ElementName::Wrapper)
                .children(blocks)
                .into()
        } else {
            Markup::fragment(blocks)
        };

        RenderedPage {
            markup,
            frontmatter: props.frontmatter.clone(),
        }
    }

    /// Render a loaded page with its own frontmatter.
    pub fn render_page(&self, page: &Page, components: &ComponentMap) -> RenderedPage {
        self.render(&page.content, &Props::new(components, &page.frontmatter))
    }
}

fn render_block(block: &Block, components: &ComponentMap) -> Markup {
    match block {
        Block::Heading { level, text } => components
            .element(ElementName::Heading((*level).clamp(1, 6)))
            .child(Markup::text(text.as_str()))
            .into(),

        Block::Paragraph(children) => components
            .element(ElementName::Paragraph)
            .children(children.iter().map(|inline| render_inline(inline, components)))
            .into(),

        Block::CodeBlock { text, info } => {
            let mut code = components.element(ElementName::Code);
            if let Some(info) = info {
                code = code.add_class(&format!("language-{}", info));
            }

            components
                .element(ElementName::Pre)
                .child(code.child(Markup::text(text.as_str())).into())
                .into()
        }
    }
}

fn render_inline(inline: &Inline, components: &ComponentMap) -> Markup {
    match inline {
        Inline::Text(text) => Markup::text(text.as_str()),
        Inline::InlineCode(code) => components
            .element(ElementName::InlineCode)
            .child(Markup::text(code.as_str()))
            .into(),
        Inline::Link { text, href } => link(components, href, text).into(),
    }
}

fn link(components: &ComponentMap, href: &str, text: &str) -> Element {
    components
        .element(ElementName::Anchor)
        .attr("href", href)
        .child(Markup::text(text))
}
