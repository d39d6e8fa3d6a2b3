use crate::error::{RenderError, Result};

/// An element of the HTML render tree.
///
/// Attributes are kept in insertion order so output is deterministic.
/// Text and attribute values are emitted as-is, without HTML escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A node without children. A missing tag means bare text.
    Leaf {
        tag: Option<String>,
        content: String,
        attributes: Vec<(String, String)>,
    },
    Parent {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<Node>,
    },
}

impl Node {
    /// Bare text without a surrounding tag.
    pub fn text(content: impl Into<String>) -> Self {
        Node::Leaf {
            tag: None,
            content: content.into(),
            attributes: Vec::new(),
        }
    }

    pub fn leaf(tag: impl Into<String>, content: impl Into<String>) -> Self {
        Node::Leaf {
            tag: Some(tag.into()),
            content: content.into(),
            attributes: Vec::new(),
        }
    }

    pub fn parent(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Parent {
            tag: tag.into(),
            attributes: Vec::new(),
            children,
        }
    }

    /// Add an attribute, consuming and returning the node.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            Node::Leaf { attributes, .. } | Node::Parent { attributes, .. } => {
                attributes.push((key.into(), value.into()));
            }
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf { tag, .. } => tag.as_deref(),
            Node::Parent { tag, .. } => Some(tag),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Parent { children, .. } => children,
        }
    }

    /// Serialize the tree to an HTML string.
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        match self {
            Node::Leaf {
                tag,
                content,
                attributes,
            } => match tag.as_deref() {
                Some("img") => {
                    out.push_str("<img");
                    attributes_to_html(attributes, out);
                    out.push('>');
                }
                _ if content.is_empty() => {
                    return Err(RenderError::EmptyLeaf {
                        tag: tag.clone().unwrap_or_default(),
                    });
                }
                None => out.push_str(content),
                Some(tag) => {
                    open_tag(tag, attributes, out);
                    out.push_str(content);
                    close_tag(tag, out);
                }
            },
            Node::Parent {
                tag,
                attributes,
                children,
            } => {
                if tag.is_empty() {
                    return Err(RenderError::MissingTag);
                }
                if children.is_empty() {
                    return Err(RenderError::EmptyChildren { tag: tag.clone() });
                }
                open_tag(tag, attributes, out);
                for child in children {
                    child.write_html(out)?;
                }
                close_tag(tag, out);
            }
        }
        Ok(())
    }
}

fn open_tag(tag: &str, attributes: &[(String, String)], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    attributes_to_html(attributes, out);
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn attributes_to_html(attributes: &[(String, String)], out: &mut String) {
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn leaf_with_tag() {
        assert_eq!(
            Node::leaf("p", "Hello, world!").to_html().unwrap(),
            "<p>Hello, world!</p>"
        );
    }

    #[test]
    fn leaf_with_attributes() {
        let node = Node::leaf("a", "Google.com")
            .with_attr("href", "https://www.google.com")
            .with_attr("target", "_blank");
        assert_eq!(
            node.to_html().unwrap(),
            r#"<a href="https://www.google.com" target="_blank">Google.com</a>"#
        );
    }

    #[test]
    fn bare_text() {
        assert_eq!(
            Node::text("This is a sentence.").to_html().unwrap(),
            "This is a sentence."
        );
    }

    #[test]
    fn image_is_self_closing_and_may_be_empty() {
        let node = Node::leaf("img", "")
            .with_attr("src", "/cat.png")
            .with_attr("alt", "");
        assert_eq!(node.to_html().unwrap(), r#"<img src="/cat.png" alt="">"#);
    }

    #[test]
    fn empty_leaf_is_rejected() {
        assert_eq!(
            Node::leaf("a", "").to_html(),
            Err(RenderError::EmptyLeaf {
                tag: "a".to_string()
            })
        );
        assert_eq!(
            Node::text("").to_html(),
            Err(RenderError::EmptyLeaf { tag: String::new() })
        );
    }

    #[test]
    fn parent_with_grandchildren() {
        let node = Node::parent(
            "div",
            vec![Node::parent("span", vec![Node::leaf("b", "grandchild")])],
        );
        assert_eq!(
            node.to_html().unwrap(),
            "<div><span><b>grandchild</b></span></div>"
        );
    }

    #[test]
    fn parent_with_mixed_children() {
        let node = Node::parent(
            "p",
            vec![
                Node::leaf("b", "Bold"),
                Node::text(" normal "),
                Node::leaf("i", "italic"),
            ],
        )
        .with_attr("class", "lead");
        assert_eq!(
            node.to_html().unwrap(),
            r#"<p class="lead"><b>Bold</b> normal <i>italic</i></p>"#
        );
    }

    #[test]
    fn parent_requires_tag_and_children() {
        assert_eq!(
            Node::parent("", vec![Node::text("x")]).to_html(),
            Err(RenderError::MissingTag)
        );
        assert_eq!(
            Node::parent("ul", Vec::new()).to_html(),
            Err(RenderError::EmptyChildren {
                tag: "ul".to_string()
            })
        );
    }

    #[test]
    fn error_in_child_propagates() {
        let node = Node::parent("div", vec![Node::leaf("b", "")]);
        assert!(matches!(node.to_html(), Err(RenderError::EmptyLeaf { .. })));
    }

    #[test]
    fn content_is_not_escaped() {
        assert_eq!(
            Node::leaf("p", "a < b & c").to_html().unwrap(),
            "<p>a < b & c</p>"
        );
    }
}
