//! Frontmatter extraction and parsing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Page metadata declared in a YAML block at the top of a source file.
///
/// Every field is optional; a page without a frontmatter block gets the empty
/// mapping.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct FrontMatter {
    /// Page title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Page description for the meta tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Free-form tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Any other keys, kept in key order
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Whether no metadata was declared at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.tags.is_empty()
            && self.extra.is_empty()
    }
}

/// Extract frontmatter from a source document.
///
/// Returns the parsed frontmatter and the remaining content after the
/// frontmatter block. The remaining content is always a suffix of `source`.
pub fn extract_frontmatter(source: &str) -> Result<(FrontMatter, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((FrontMatter::default(), source));
    }

    // Find the closing ---
    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let frontmatter = if yaml_content.is_empty() {
        FrontMatter::default()
    } else {
        serde_yaml::from_str(yaml_content)
            .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?
    };

    Ok((frontmatter, skip_blank_lines(remaining)))
}

/// Drop the rest of the closing fence line and any blank lines after it.
/// Leading spaces of the first content line are kept, they can open an
/// indented code block.
fn skip_blank_lines(mut rest: &str) -> &str {
    while let Some(pos) = rest.find('\n') {
        if !rest[..pos].trim().is_empty() {
            return rest;
        }
        rest = &rest[pos + 1..];
    }
    if rest.trim().is_empty() {
        &rest[rest.len()..]
    } else {
        rest
    }
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}
