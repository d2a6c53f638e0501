//! Component overrides.
//!
//! An override swaps the tag an element is rendered with and can attach a
//! class and extra attributes. Overrides are validated when inserted so that
//! rendering itself never fails.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::markup::Element;

/// An element the renderer can emit, named the way MDX names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementName {
    /// Root element around the whole page
    Wrapper,
    Paragraph,
    /// Heading with its level (1-6)
    Heading(u8),
    Pre,
    /// Code inside a `pre` block
    Code,
    InlineCode,
    Anchor,
}

impl ElementName {
    /// Tag used when no override is present.
    pub fn default_tag(&self) -> String {
        match self {
            Self::Wrapper => "div".to_string(),
            Self::Paragraph => "p".to_string(),
            Self::Heading(level) => format!("h{}", level),
            Self::Pre => "pre".to_string(),
            Self::Code | Self::InlineCode => "code".to_string(),
            Self::Anchor => "a".to_string(),
        }
    }
}

impl fmt::Display for ElementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wrapper => f.write_str("wrapper"),
            Self::Paragraph => f.write_str("p"),
            Self::Heading(level) => write!(f, "h{}", level),
            Self::Pre => f.write_str("pre"),
            Self::Code => f.write_str("code"),
            Self::InlineCode => f.write_str("inlineCode"),
            Self::Anchor => f.write_str("a"),
        }
    }
}

impl FromStr for ElementName {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wrapper" => Ok(Self::Wrapper),
            "p" => Ok(Self::Paragraph),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Ok(Self::Heading(s.as_bytes()[1] - b'0')),
            "pre" => Ok(Self::Pre),
            "code" => Ok(Self::Code),
            "inlineCode" => Ok(Self::InlineCode),
            "a" => Ok(Self::Anchor),
            _ => Err(ComponentError::UnknownElement(s.to_string())),
        }
    }
}

/// Replacement for one element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentOverride {
    /// Tag name to emit
    pub tag: String,

    /// Class added to the element
    #[serde(default)]
    pub class: Option<String>,

    /// Extra attributes, emitted in name order. A `class` entry is merged
    /// with `class` above.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

impl ComponentOverride {
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class: None,
            attrs: BTreeMap::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    fn validate(&self) -> Result<(), ComponentError> {
        if !is_valid_name(&self.tag, false) {
            return Err(ComponentError::InvalidTag(self.tag.clone()));
        }
        if let Some(name) = self.attrs.keys().find(|name| !is_valid_name(name, true)) {
            return Err(ComponentError::InvalidAttribute(name.clone()));
        }
        Ok(())
    }
}

/// Overrides by element name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentMap {
    overrides: BTreeMap<ElementName, ComponentOverride>,
}

impl ComponentMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an override under an MDX element name (`p`, `h1`, `pre`,
    /// `code`, `inlineCode`, `a`, `wrapper`).
    pub fn insert(&mut self, name: &str, component: ComponentOverride) -> Result<(), ComponentError> {
        let element: ElementName = name.parse()?;
        component.validate()?;
        self.overrides.insert(element, component);
        Ok(())
    }

    /// Build a map from a table of names to overrides.
    pub fn from_table(
        table: impl IntoIterator<Item = (String, ComponentOverride)>,
    ) -> Result<Self, ComponentError> {
        let mut map = Self::new();
        for (name, component) in table {
            map.insert(&name, component)?;
        }
        Ok(map)
    }

    pub fn get(&self, element: ElementName) -> Option<&ComponentOverride> {
        self.overrides.get(&element)
    }

    pub fn contains(&self, element: ElementName) -> bool {
        self.overrides.contains_key(&element)
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Start an element, applying the override if one is registered.
    pub fn element(&self, element: ElementName) -> Element {
        let Some(component) = self.get(element) else {
            return Element::new(element.default_tag());
        };

        let mut out = Element::new(component.tag.as_str());
        if let Some(class) = &component.class {
            out = out.add_class(class);
        }
        for (name, value) in &component.attrs {
            out = if name == "class" {
                out.add_class(value)
            } else {
                out.attr(name.as_str(), value.as_str())
            };
        }
        out
    }
}

/// Tag names start with a letter; attribute names may also start with `_`
/// or `:` and contain them.
fn is_valid_name(name: &str, attribute: bool) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let first_ok = first.is_ascii_alphabetic() || (attribute && matches!(first, '_' | ':'));
    first_ok
        && chars.all(|c| {
            c.is_ascii_alphanumeric() || c == '-' || (attribute && matches!(c, '_' | ':' | '.'))
        })
}

/// Errors that can occur when registering overrides.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    #[error("Unknown element: {0}")]
    UnknownElement(String),

    #[error("Invalid tag name: {0:?}")]
    InvalidTag(String),

    #[error("Invalid attribute name: {0:?}")]
    InvalidAttribute(String),
}
