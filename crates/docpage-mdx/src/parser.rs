//! Markdown source loader.
//!
//! Maps a CommonMark body onto [`PageContent`]. Only the node kinds the
//! content model knows are accepted; anything else is reported with the line
//! it starts on.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

use crate::content::{Block, Inline, Page, PageContent};
use crate::frontmatter::{extract_frontmatter, FrontmatterError};

/// Errors that can occur when loading a page.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),

    #[error("Unsupported {construct} at line {line}")]
    Unsupported { line: usize, construct: &'static str },
}

/// Block currently being assembled.
enum OpenBlock {
    Heading { level: u8, text: String },
    Paragraph(Vec<Inline>),
    CodeBlock { info: Option<String>, text: String },
}

/// Link currently being assembled: `(href, visible text)`.
type OpenLink = (String, String);

/// Parse a source document into a [`Page`].
pub fn parse_page(source: &str) -> Result<Page, ParseError> {
    let (frontmatter, body) = extract_frontmatter(source)?;

    // `body` is a suffix of `source`, so this is its byte offset.
    let body_offset = source.len() - body.len();
    let line_at = |pos: usize| source[..body_offset + pos].matches('\n').count() + 1;

    let mut blocks = Vec::new();
    let mut open: Option<OpenBlock> = None;
    let mut link: Option<OpenLink> = None;

    for (event, range) in Parser::new(body).into_offset_iter() {
        let unsupported = |construct| ParseError::Unsupported {
            line: line_at(range.start),
            construct,
        };

        match event {
            Event::Start(Tag::Paragraph) => {
                open = Some(OpenBlock::Paragraph(Vec::new()));
            }

            Event::Start(Tag::Heading { level, .. }) => {
                open = Some(OpenBlock::Heading {
                    level: level as u8,
                    text: String::new(),
                });
            }

            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(String::from)
                    }
                    CodeBlockKind::Indented => None,
                };
                open = Some(OpenBlock::CodeBlock {
                    info,
                    text: String::new(),
                });
            }

            Event::Start(Tag::Link { dest_url, .. }) => {
                let in_text_block = matches!(
                    open,
                    Some(OpenBlock::Paragraph(_) | OpenBlock::Heading { .. })
                );
                if link.is_some() || !in_text_block {
                    return Err(unsupported("nested link"));
                }
                link = Some((dest_url.into_string(), String::new()));
            }

            Event::Start(tag) => return Err(unsupported(describe(&tag))),

            Event::Text(text) => push_text(&mut open, &mut link, &text),

            Event::SoftBreak | Event::HardBreak => push_text(&mut open, &mut link, "\n"),

            Event::Code(code) => {
                if let Some((_, link_text)) = link.as_mut() {
                    link_text.push_str(&code);
                } else {
                    match open.as_mut() {
                        Some(OpenBlock::Paragraph(children)) => {
                            children.push(Inline::InlineCode(code.into_string()));
                        }
                        Some(OpenBlock::Heading { text, .. }) => text.push_str(&code),
                        _ => return Err(unsupported("code span")),
                    }
                }
            }

            Event::End(TagEnd::Link) => {
                if let Some((href, text)) = link.take() {
                    match open.as_mut() {
                        Some(OpenBlock::Paragraph(children)) => {
                            children.push(Inline::Link { text, href });
                        }
                        Some(OpenBlock::Heading { text: heading, .. }) => heading.push_str(&text),
                        _ => {}
                    }
                }
            }

            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::CodeBlock) => {
                if let Some(block) = open.take() {
                    blocks.push(finish(block));
                }
            }

            Event::End(_) => {}

            Event::Html(_) | Event::InlineHtml(_) => return Err(unsupported("raw HTML")),
            Event::Rule => return Err(unsupported("thematic break")),
            Event::FootnoteReference(_) => return Err(unsupported("footnote")),
            Event::TaskListMarker(_) => return Err(unsupported("task list")),
            _ => return Err(unsupported("math")),
        }
    }

    Ok(Page {
        frontmatter,
        content: blocks.into_iter().collect::<PageContent>(),
    })
}

fn push_text(open: &mut Option<OpenBlock>, link: &mut Option<OpenLink>, text: &str) {
    if let Some((_, link_text)) = link.as_mut() {
        link_text.push_str(text);
        return;
    }

    match open.as_mut() {
        Some(OpenBlock::Heading { text: heading, .. }) => heading.push_str(text),
        Some(OpenBlock::CodeBlock { text: code, .. }) => code.push_str(text),
        Some(OpenBlock::Paragraph(children)) => match children.last_mut() {
            Some(Inline::Text(last)) => last.push_str(text),
            _ => children.push(Inline::Text(text.to_string())),
        },
        None => {}
    }
}

fn finish(block: OpenBlock) -> Block {
    match block {
        OpenBlock::Heading { level, text } => Block::Heading { level, text },
        OpenBlock::Paragraph(children) => Block::Paragraph(children),
        OpenBlock::CodeBlock { info, text } => Block::CodeBlock { text, info },
    }
}

/// Human-readable name of a construct the content model has no node for.
fn describe(tag: &Tag<'_>) -> &'static str {
    match tag {
        Tag::BlockQuote(..) => "block quote",
        Tag::List(_) | Tag::Item => "list",
        Tag::Table(_) | Tag::TableHead | Tag::TableRow | Tag::TableCell => "table",
        Tag::Emphasis => "emphasis",
        Tag::Strong => "strong emphasis",
        Tag::Strikethrough => "strikethrough",
        Tag::Image { .. } => "image",
        Tag::HtmlBlock => "raw HTML",
        Tag::FootnoteDefinition(_) => "footnote",
        _ => "element",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_headings_paragraphs_and_code() {
        let source = r#"---
title: Tips
---

These are the tips.

# DB2 Error 42501

```
42501   The authorization ID does not have the privilege.
```

`SELECT * FROM syscat.procedures WHERE procschema = 'FHIRDATA'`

See <https://www.ibm.com/support/knowledgecenter/>
"#;

        let page = parse_page(source).unwrap();

        assert_eq!(page.frontmatter.title.as_deref(), Some("Tips"));
        assert_eq!(
            page.content.blocks(),
            &[
                Block::paragraph(vec![Inline::text("These are the tips.")]),
                Block::heading("DB2 Error 42501"),
                Block::code_block("42501   The authorization ID does not have the privilege.\n"),
                Block::paragraph(vec![Inline::code(
                    "SELECT * FROM syscat.procedures WHERE procschema = 'FHIRDATA'"
                )]),
                Block::paragraph(vec![
                    Inline::text("See "),
                    Inline::link(
                        "https://www.ibm.com/support/knowledgecenter/",
                        "https://www.ibm.com/support/knowledgecenter/"
                    ),
                ]),
            ]
        );
    }

    #[test]
    fn code_block_text_is_verbatim() {
        let source = "```sql\n select x\n    , y \nfrom t\n```\n";

        let page = parse_page(source).unwrap();

        assert_eq!(
            page.content.blocks(),
            &[Block::code_block_with_info(" select x\n    , y \nfrom t\n", "sql")]
        );
    }

    #[test]
    fn indented_code_block_after_frontmatter() {
        let source = "---\ntitle: Indented\n---\n\n    SELECT 1\n      FROM t\n";

        let page = parse_page(source).unwrap();

        assert_eq!(page.frontmatter.title.as_deref(), Some("Indented"));
        assert_eq!(
            page.content.blocks(),
            &[Block::code_block("SELECT 1\n  FROM t\n")]
        );
    }

    #[test]
    fn indented_code_block_without_frontmatter() {
        let page = parse_page("    SELECT 1\n      FROM t\n").unwrap();

        assert_eq!(
            page.content.blocks(),
            &[Block::code_block("SELECT 1\n  FROM t\n")]
        );
    }

    #[test]
    fn soft_break_becomes_newline() {
        let source = "If missing, run a grant\n`GRANT EXECUTE ON PROCEDURE X TO Y`\n";

        let page = parse_page(source).unwrap();

        assert_eq!(
            page.content.blocks(),
            &[Block::paragraph(vec![
                Inline::text("If missing, run a grant\n"),
                Inline::code("GRANT EXECUTE ON PROCEDURE X TO Y"),
            ])]
        );
    }

    #[test]
    fn link_text_is_flattened() {
        let page = parse_page("[the `grant` docs](https://example.com/grant)").unwrap();

        assert_eq!(
            page.content.blocks(),
            &[Block::paragraph(vec![Inline::link(
                "the grant docs",
                "https://example.com/grant"
            )])]
        );
    }

    #[test]
    fn heading_levels_are_kept() {
        let page = parse_page("## Second\n\n### Third `code`\n").unwrap();

        let headings: Vec<_> = page.content.headings().collect();
        assert_eq!(headings, vec![(2, "Second"), (3, "Third code")]);
    }

    #[test]
    fn reports_unsupported_construct_with_line() {
        let source = "---\ntitle: Lists\n---\n\nIntro.\n\n- one\n- two\n";

        let err = parse_page(source).unwrap_err();

        match err {
            ParseError::Unsupported { line, construct } => {
                assert_eq!(line, 7);
                assert_eq!(construct, "list");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_emphasis() {
        let err = parse_page("Some *emphasis* here.").unwrap_err();

        assert!(matches!(
            err,
            ParseError::Unsupported {
                line: 1,
                construct: "emphasis"
            }
        ));
    }

    #[test]
    fn propagates_frontmatter_errors() {
        let err = parse_page("---\ntitle: x\n").unwrap_err();

        assert!(matches!(
            err,
            ParseError::Frontmatter(FrontmatterError::Unclosed)
        ));
    }
}
