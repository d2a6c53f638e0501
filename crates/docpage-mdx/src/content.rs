//! Content nodes that make up a page.

use crate::frontmatter::FrontMatter;

/// An inline node inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Literal text
    Text(String),
    /// Inline code span
    InlineCode(String),
    /// Hyperlink with literal visible text
    Link { text: String, href: String },
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn code(code: impl Into<String>) -> Self {
        Self::InlineCode(code.into())
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self::Link {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading with a level from 1 to 6
    Heading { level: u8, text: String },

    /// Paragraph of inline nodes in document order
    Paragraph(Vec<Inline>),

    /// Preformatted code, stored verbatim
    CodeBlock {
        text: String,
        /// First word of the fence info string (e.g. `sql`)
        info: Option<String>,
    },
}

impl Block {
    /// Create a level-1 heading.
    pub fn heading(text: impl Into<String>) -> Self {
        Self::heading_with_level(1, text)
    }

    /// Create a heading, clamping the level into `1..=6`.
    pub fn heading_with_level(level: u8, text: impl Into<String>) -> Self {
        Self::Heading {
            level: level.clamp(1, 6),
            text: text.into(),
        }
    }

    pub fn paragraph(children: Vec<Inline>) -> Self {
        Self::Paragraph(children)
    }

    pub fn code_block(text: impl Into<String>) -> Self {
        Self::CodeBlock {
            text: text.into(),
            info: None,
        }
    }

    pub fn code_block_with_info(text: impl Into<String>, info: impl Into<String>) -> Self {
        let info = info.into();
        Self::CodeBlock {
            text: text.into(),
            info: (!info.is_empty()).then_some(info),
        }
    }
}

/// An ordered, immutable sequence of blocks.
///
/// Content is assembled once with [`PageContent::push`] (or collected from an
/// iterator) and afterwards only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    blocks: Vec<Block>,
}

impl PageContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block, returning the content for chaining.
    pub fn push(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over all headings as `(level, text)`.
    pub fn headings(&self) -> impl Iterator<Item = (u8, &str)> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Heading { level, text } => Some((*level, text.as_str())),
            _ => None,
        })
    }
}

impl FromIterator<Block> for PageContent {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PageContent {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// A loaded page: frontmatter plus content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub frontmatter: FrontMatter,
    pub content: PageContent,
}
