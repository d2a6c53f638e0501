//! Markup tree and HTML serialization.

use serde::Serialize;

/// A node of rendered markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Markup {
    /// An element with attributes and children
    Element(Element),
    /// Literal text, escaped on output
    Text { value: String },
    /// A sequence of nodes without an enclosing element
    Fragment { children: Vec<Markup> },
}

/// An HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    /// Tag name
    pub tag: String,

    /// Attributes in output order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<Attribute>,

    /// Child nodes
    pub children: Vec<Markup>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute. A repeated name replaces the earlier value in place.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attrs.push(Attribute { name, value }),
        }
        self
    }

    /// Append a class to the `class` attribute, creating it if needed.
    pub fn add_class(mut self, class: &str) -> Self {
        match self.attrs.iter_mut().find(|a| a.name == "class") {
            Some(existing) if !existing.value.is_empty() => {
                existing.value.push(' ');
                existing.value.push_str(class);
            }
            Some(existing) => existing.value = class.to_string(),
            None => self.attrs.push(Attribute {
                name: "class".to_string(),
                value: class.to_string(),
            }),
        }
        self
    }

    pub fn child(mut self, child: Markup) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Markup>) -> Self {
        self.children.extend(children);
        self
    }

    /// Look up an attribute value by name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

impl From<Element> for Markup {
    fn from(element: Element) -> Self {
        Markup::Element(element)
    }
}

impl Markup {
    pub fn text(value: impl Into<String>) -> Self {
        Markup::Text {
            value: value.into(),
        }
    }

    pub fn fragment(children: Vec<Markup>) -> Self {
        Markup::Fragment { children }
    }

    /// Serialize to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Append the HTML for this node to `out`.
    ///
    /// No whitespace is added or removed anywhere.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Markup::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for attr in &element.attrs {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(&attr.value));
                    out.push('"');
                }
                out.push('>');
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            }
            Markup::Text { value } => out.push_str(&escape_text(value)),
            Markup::Fragment { children } => {
                for child in children {
                    child.write_html(out);
                }
            }
        }
    }

    /// All elements in the tree, depth-first.
    pub fn elements(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_elements(self, &mut found);
        found
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        match self {
            Markup::Element(element) => {
                element.children.iter().map(Markup::text_content).collect()
            }
            Markup::Text { value } => value.clone(),
            Markup::Fragment { children } => children.iter().map(Markup::text_content).collect(),
        }
    }
}

fn collect_elements<'a>(node: &'a Markup, found: &mut Vec<&'a Element>) {
    match node {
        Markup::Element(element) => {
            found.push(element);
            for child in &element.children {
                collect_elements(child, found);
            }
        }
        Markup::Text { .. } => {}
        Markup::Fragment { children } => {
            for child in children {
                collect_elements(child, found);
            }
        }
    }
}

/// Escape text content.
fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape HTML special characters including quotes for attribute values.
fn escape_attr(s: &str) -> String {
    escape_text(s)
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_nested_elements() {
        let markup: Markup = Element::new("p")
            .child(Markup::text("See "))
            .child(
                Element::new("a")
                    .attr("href", "https://example.com/?a=1&b=2")
                    .child(Markup::text("docs"))
                    .into(),
            )
            .into();

        assert_eq!(
            markup.to_html(),
            r#"<p>See <a href="https://example.com/?a=1&amp;b=2">docs</a></p>"#
        );
    }

    #[test]
    fn escapes_text_but_keeps_quotes() {
        let markup = Markup::text("WHERE schema = 'SYS%' AND x < 3 && \"y\"");

        assert_eq!(
            markup.to_html(),
            "WHERE schema = 'SYS%' AND x &lt; 3 &amp;&amp; \"y\""
        );
    }

    #[test]
    fn escapes_quotes_in_attributes() {
        let markup: Markup = Element::new("a").attr("title", "it's \"here\"").into();

        assert_eq!(
            markup.to_html(),
            r#"<a title="it&#x27;s &quot;here&quot;"></a>"#
        );
    }

    #[test]
    fn repeated_attribute_replaces_value() {
        let element = Element::new("code")
            .attr("class", "a")
            .attr("id", "x")
            .attr("class", "b");

        assert_eq!(element.attrs.len(), 2);
        assert_eq!(element.get_attr("class"), Some("b"));
        assert_eq!(element.attrs[0].name, "class");
    }

    #[test]
    fn add_class_appends() {
        let element = Element::new("code")
            .add_class("language-sql")
            .attr("id", "q")
            .add_class("numbered");

        assert_eq!(element.get_attr("class"), Some("language-sql numbered"));
    }

    #[test]
    fn fragment_has_no_enclosing_tag() {
        let markup = Markup::fragment(vec![
            Element::new("h1").child(Markup::text("A")).into(),
            Element::new("p").child(Markup::text("B")).into(),
        ]);

        assert_eq!(markup.to_html(), "<h1>A</h1><p>B</p>");
        assert_eq!(markup.text_content(), "AB");
        assert_eq!(markup.elements().len(), 2);
    }

    #[test]
    fn serializes_to_tagged_json() {
        let markup: Markup = Element::new("code").child(Markup::text("x")).into();

        let json = serde_json::to_value(&markup).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "element",
                "tag": "code",
                "children": [{ "type": "text", "value": "x" }]
            })
        );
    }
}
